//! Terminal printers for human output

use colored::Colorize;
use declarative::{Reason, ReconciliationResult};

/// Print an info message
pub fn info(msg: &str) {
    println!("{} {}", "ℹ".blue(), msg);
}

/// Print a success message
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print a warning message
pub fn warn(msg: &str) {
    println!("{} {}", "⚠".yellow(), msg);
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a dim/muted message
pub fn dim(msg: &str) {
    println!("  {}", msg.dimmed());
}

/// Print a dim/muted message to stderr
pub fn dim_err(msg: &str) {
    eprintln!("  {}", msg.dimmed());
}

/// Print a header/title
pub fn header(title: &str) {
    println!();
    println!("{}", title.bold());
    println!("{}", "─".repeat(title.chars().count()).dimmed());
}

/// Print a key-value pair
pub fn kv(key: &str, value: &str) {
    println!("  {}: {}", key.dimmed(), value);
}

/// Version transition of one package, e.g. `1.0-1 → 1.1-1`
pub fn version_change(local: Option<&str>, remote: Option<&str>) -> String {
    match (local, remote) {
        (None, Some(remote)) => format!("not installed → {remote}"),
        (Some(local), Some(remote)) if local != remote => format!("{local} → {remote}"),
        (Some(local), _) => local.to_string(),
        (None, None) => "unknown".to_string(),
    }
}

/// One-line summary of a decision
pub fn describe(result: &ReconciliationResult) -> String {
    let versions = version_change(
        result.local_version.as_deref(),
        result.remote_version.as_deref(),
    );
    match result.reason {
        Reason::NotFoundRemotely => format!("{}: {}", result.name, result.reason),
        _ => format!("{}: {versions}", result.name),
    }
}

/// Print a decision; only packages that need work are shown
pub fn decision(result: &ReconciliationResult) {
    if result.requires_action {
        println!("{} {}", "→".cyan(), describe(result));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(local: Option<&str>, remote: Option<&str>, reason: Reason) -> ReconciliationResult {
        ReconciliationResult {
            name: "foo".to_string(),
            requires_action: reason != Reason::UpToDate,
            reason,
            local_version: local.map(str::to_string),
            remote_version: remote.map(str::to_string),
        }
    }

    #[test]
    fn test_version_change() {
        assert_eq!(version_change(None, Some("1.0-1")), "not installed → 1.0-1");
        assert_eq!(version_change(Some("1.0-1"), Some("1.1-1")), "1.0-1 → 1.1-1");
        assert_eq!(version_change(Some("1.0-1"), Some("1.0-1")), "1.0-1");
        assert_eq!(version_change(Some("1.0-1"), None), "1.0-1");
        assert_eq!(version_change(None, None), "unknown");
    }

    #[test]
    fn test_describe() {
        let install = result(None, Some("2"), Reason::NotInstalled);
        assert_eq!(describe(&install), "foo: not installed → 2");

        let upgrade = result(Some("1"), Some("2"), Reason::VersionMismatch);
        assert_eq!(describe(&upgrade), "foo: 1 → 2");

        let current = result(Some("2"), Some("2"), Reason::UpToDate);
        assert_eq!(describe(&current), "foo: 2");

        let missing = result(Some("1"), None, Reason::NotFoundRemotely);
        assert_eq!(describe(&missing), "foo: not found on AUR");
    }
}
