//! External command execution.
//!
//! [`CommandRunner`] is the seam between aurakit and the operating system.
//! [`SystemRunner`] spawns real processes; [`ScriptedRunner`] answers from a
//! table so backend behaviour can be tested without aura installed.

use crate::error::{Error, Result};
use crate::types::CommandOutput;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::{Arc, Mutex};

/// Runs an external command to completion and captures its output.
///
/// Calls are synchronous and blocking. Timeouts, if wanted, belong to the
/// implementation.
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args`.
    ///
    /// A non-zero exit is not an error here; it is reported through
    /// [`CommandOutput::code`]. Errors mean the process could not be run.
    fn run(&self, program: &Path, args: &[&str]) -> Result<CommandOutput>;
}

/// Render a command line the way it would be typed in a shell.
pub fn command_line(program: &Path, args: &[&str]) -> String {
    let mut line = program.display().to_string();
    for arg in args {
        line.push(' ');
        line.push_str(arg);
    }
    line
}

/// Runner that spawns real processes via `std::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &Path, args: &[&str]) -> Result<CommandOutput> {
        log::debug!("Running: {}", command_line(program, args));

        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|e| Error::CommandFailed {
                message: format!("failed to execute {}: {}", program.display(), e),
                stderr: String::new(),
            })?;

        let output = CommandOutput::from(output);
        log::trace!("Exit code {} for {}", output.code, program.display());
        Ok(output)
    }
}

/// Runner that replays canned outputs keyed by full command line.
///
/// Every call is recorded, so tests can assert on exactly what would have
/// been executed. Unscripted command lines fail with
/// [`Error::CommandFailed`].
#[derive(Debug, Clone, Default)]
pub struct ScriptedRunner {
    responses: Arc<Mutex<HashMap<String, CommandOutput>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedRunner {
    /// Create an empty runner.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the output for a command line such as `/usr/bin/aura --query --info foo`.
    pub fn respond(&self, command_line: impl Into<String>, output: CommandOutput) -> &Self {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(command_line.into(), output);
        self
    }

    /// Command lines run so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, program: &Path, args: &[&str]) -> Result<CommandOutput> {
        let line = command_line(program, args);
        self.calls.lock().unwrap().push(line.clone());

        let responses = self.responses.lock().unwrap();
        responses
            .get(&line)
            .cloned()
            .ok_or_else(|| Error::CommandFailed {
                message: format!("unscripted command: {line}"),
                stderr: String::new(),
            })
    }
}

/// Resolve an executable on `PATH`.
pub fn locate_binary(name: &str) -> Result<PathBuf> {
    let path = which::which(name).map_err(|_| Error::BinaryNotFound {
        name: name.to_string(),
    })?;
    log::debug!("Located {} at {}", name, path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line_rendering() {
        let line = command_line(Path::new("/usr/bin/aura"), &["--query", "--info", "foo"]);
        assert_eq!(line, "/usr/bin/aura --query --info foo");
    }

    #[test]
    fn test_scripted_runner_replays_and_records() {
        let runner = ScriptedRunner::new();
        runner.respond("/usr/bin/aura --version", CommandOutput::new(0, "aura 3.2.9"));

        let out = runner.run(Path::new("/usr/bin/aura"), &["--version"]).unwrap();
        assert_eq!(out.stdout, "aura 3.2.9");
        assert_eq!(runner.calls(), vec!["/usr/bin/aura --version"]);
    }

    #[test]
    fn test_scripted_runner_rejects_unscripted() {
        let runner = ScriptedRunner::new();
        let result = runner.run(Path::new("/usr/bin/aura"), &["-Syu"]);
        assert!(matches!(result, Err(Error::CommandFailed { .. })));
        assert_eq!(runner.calls().len(), 1);
    }

    #[test]
    fn test_locate_binary_missing() {
        let result = locate_binary("definitely-not-a-real-binary-4f1c");
        assert!(matches!(result, Err(Error::BinaryNotFound { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_captures_exit_code() {
        let runner = SystemRunner;
        let out = runner
            .run(Path::new("/bin/sh"), &["-c", "echo hi; exit 3"])
            .unwrap();
        assert_eq!(out.code, 3);
        assert_eq!(out.stdout.trim(), "hi");
    }
}
