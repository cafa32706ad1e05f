//! Core types for aura package queries.

use crate::extract::decode_output;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field name aura prints for the package version.
pub const VERSION_KEY: &str = "Version";

/// Key/value metadata extracted from an `aura ... --info` query.
///
/// An empty mapping means the package is unknown to the queried source.
/// A missing key means the field is unknown, never an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageMetadata {
    fields: BTreeMap<String, String>,
}

impl PackageMetadata {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field, overwriting any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Look up a field.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// The `Version` field, if aura printed one.
    pub fn version(&self) -> Option<&str> {
        self.get(VERSION_KEY)
    }

    /// Whether nothing was extracted.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Iterate over fields in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render back to `Key : Value` lines, the shape aura prints.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.fields {
            out.push_str(key);
            out.push_str(" : ");
            out.push_str(value);
            out.push('\n');
        }
        out
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PackageMetadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut metadata = Self::new();
        for (k, v) in iter {
            metadata.insert(k, v);
        }
        metadata
    }
}

/// Options for `aura --aursync` installs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallOptions {
    /// Remove make dependencies that are no longer needed after the build
    pub delmakedeps: bool,
    /// Build as this user (aura refuses to build as root)
    pub build_user: Option<String>,
}

impl InstallOptions {
    /// Set `--delmakedeps`.
    pub fn with_delmakedeps(mut self, delmakedeps: bool) -> Self {
        self.delmakedeps = delmakedeps;
        self
    }

    /// Set `--builduser`.
    pub fn with_build_user(mut self, user: impl Into<String>) -> Self {
        self.build_user = Some(user.into());
        self
    }
}

/// Captured output of one external command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code (-1 when the process was killed by a signal)
    pub code: i32,
    /// Standard output, decoded with [`decode_output`]
    pub stdout: String,
    /// Standard error, lossily decoded
    pub stderr: String,
}

impl CommandOutput {
    /// Construct an output with the given exit code and stdout.
    pub fn new(code: i32, stdout: impl Into<String>) -> Self {
        Self {
            code,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Attach stderr.
    pub fn with_stderr(mut self, stderr: impl Into<String>) -> Self {
        self.stderr = stderr.into();
        self
    }

    /// Whether the command exited with status 0.
    pub fn success(&self) -> bool {
        self.code == 0
    }
}

impl From<std::process::Output> for CommandOutput {
    fn from(output: std::process::Output) -> Self {
        Self {
            code: output.status.code().unwrap_or(-1),
            stdout: decode_output(&output.stdout),
            stderr: decode_output(&output.stderr),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_command_output_from_process_output() {
        use std::os::unix::process::ExitStatusExt;

        let output = std::process::Output {
            status: std::process::ExitStatus::from_raw(0),
            stdout: b"\x9b1mVersion\x9b0m : 2\n".to_vec(),
            stderr: Vec::new(),
        };
        let output = CommandOutput::from(output);
        assert!(output.success());
        assert_eq!(crate::extract::extract(&output.stdout).version(), Some("2"));
    }

    #[test]
    fn test_metadata_version() {
        let meta: PackageMetadata = [("Name", "foo"), ("Version", "1.2-1")].into_iter().collect();
        assert_eq!(meta.version(), Some("1.2-1"));
        assert_eq!(meta.get("Name"), Some("foo"));
        assert_eq!(meta.get("Licenses"), None);
        assert_eq!(meta.len(), 2);
    }

    #[test]
    fn test_metadata_to_text_is_sorted() {
        let meta: PackageMetadata = [("Version", "2"), ("Name", "bar")].into_iter().collect();
        assert_eq!(meta.to_text(), "Name : bar\nVersion : 2\n");
    }

    #[test]
    fn test_metadata_serializes_as_map() {
        let meta: PackageMetadata = [("Version", "1")].into_iter().collect();
        let json = serde_json::to_string(&meta).unwrap();
        assert_eq!(json, r#"{"Version":"1"}"#);
    }

    #[test]
    fn test_install_options_builders() {
        let opts = InstallOptions::default()
            .with_delmakedeps(true)
            .with_build_user("nobody");
        assert!(opts.delmakedeps);
        assert_eq!(opts.build_user.as_deref(), Some("nobody"));
    }

    #[test]
    fn test_command_output_success() {
        assert!(CommandOutput::new(0, "").success());
        assert!(!CommandOutput::new(1, "").with_stderr("boom").success());
    }
}
