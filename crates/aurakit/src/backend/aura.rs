//! Real aura CLI backend.

use crate::backend::Backend;
use crate::error::{Error, Result};
use crate::extract::{extract, parse_upgrade_preview};
use crate::runner::{CommandRunner, SystemRunner, locate_binary};
use crate::types::{CommandOutput, InstallOptions, PackageMetadata};
use std::path::{Path, PathBuf};

/// Name of the executable looked up on `PATH`.
pub const AURA_BINARY: &str = "aura";

/// Backend that executes real `aura` commands through a [`CommandRunner`].
pub struct AuraBackend<R: CommandRunner = SystemRunner> {
    /// Path to the aura executable
    aura_path: PathBuf,
    runner: R,
}

impl AuraBackend<SystemRunner> {
    /// Create a backend for the aura found on `PATH`.
    ///
    /// Returns an error if aura is not installed.
    pub fn new() -> Result<Self> {
        let aura_path = locate_binary(AURA_BINARY)?;
        Ok(Self::with_runner(aura_path, SystemRunner))
    }

    /// Create a backend for an aura at a known path.
    pub fn at(aura_path: impl Into<PathBuf>) -> Result<Self> {
        let aura_path = aura_path.into();
        if !aura_path.exists() {
            return Err(Error::BinaryNotFound {
                name: aura_path.display().to_string(),
            });
        }
        Ok(Self::with_runner(aura_path, SystemRunner))
    }
}

impl<R: CommandRunner> AuraBackend<R> {
    /// Create a backend with an explicit path and runner.
    pub fn with_runner(aura_path: impl Into<PathBuf>, runner: R) -> Self {
        Self {
            aura_path: aura_path.into(),
            runner,
        }
    }

    /// Path of the aura executable this backend runs.
    pub fn aura_path(&self) -> &Path {
        &self.aura_path
    }

    /// The runner commands go through.
    pub fn runner(&self) -> &R {
        &self.runner
    }

    fn run_aura(&self, args: &[&str]) -> Result<CommandOutput> {
        self.runner.run(&self.aura_path, args)
    }
}

/// Arguments for `aura --aursync` installing `name`.
fn install_args<'a>(name: &'a str, options: &'a InstallOptions, build_user: &'a str) -> Vec<&'a str> {
    let mut args = vec!["--aursync"];
    if options.build_user.is_some() {
        args.push(build_user);
    }
    args.push(name);
    if options.delmakedeps {
        args.push("--delmakedeps");
    }
    args.push("--noconfirm");
    args
}

impl<R: CommandRunner> Backend for AuraBackend<R> {
    fn query_local(&self, name: &str) -> Result<PackageMetadata> {
        let output = self.run_aura(&["--query", "--info", name])?;

        if !output.success() {
            log::debug!("{} is not installed locally (exit {})", name, output.code);
            return Ok(PackageMetadata::new());
        }

        Ok(extract(&output.stdout))
    }

    fn query_remote(&self, name: &str) -> Result<PackageMetadata> {
        // aura's exit code here is unreliable; an empty answer means unknown.
        let output = self.run_aura(&["--aursync", "--info", name])?;

        if output.stdout.trim().is_empty() {
            log::debug!("{} is unknown to the AUR", name);
            return Ok(PackageMetadata::new());
        }

        Ok(extract(&output.stdout))
    }

    fn install(&self, name: &str, options: &InstallOptions) -> Result<()> {
        let build_user = options
            .build_user
            .as_ref()
            .map(|u| format!("--builduser={u}"))
            .unwrap_or_default();
        let args = install_args(name, options, &build_user);

        let output = self.run_aura(&args)?;
        if !output.success() {
            log::warn!("aura exited with {} while installing {}", output.code, name);
            return Err(Error::InstallFailed {
                name: name.to_string(),
                stderr: output.stderr.trim().to_string(),
            });
        }

        Ok(())
    }

    fn sysupgrade_preview(&self) -> Result<Option<Vec<String>>> {
        // Exit 0 means there is something to upgrade, 1 means there is not.
        let output = self.run_aura(&["-A", "--sysupgrade", "--dryrun"])?;

        if !output.success() {
            return Ok(None);
        }

        Ok(Some(parse_upgrade_preview(&output.stdout)))
    }

    fn sysupgrade(&self) -> Result<()> {
        let output = self.run_aura(&["-A", "--sysupgrade", "--noconfirm"])?;

        if !output.success() {
            return Err(Error::UpgradeFailed {
                stderr: output.stderr.trim().to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::ScriptedRunner;

    const AURA: &str = "/usr/bin/aura";

    fn backend(runner: &ScriptedRunner) -> AuraBackend<ScriptedRunner> {
        AuraBackend::with_runner(AURA, runner.clone())
    }

    #[test]
    fn test_query_local_installed() {
        let runner = ScriptedRunner::new();
        runner.respond(
            "/usr/bin/aura --query --info foo",
            CommandOutput::new(0, "Name : foo\nVersion : 1\n"),
        );

        let meta = backend(&runner).query_local("foo").unwrap();
        assert_eq!(meta.version(), Some("1"));
    }

    #[test]
    fn test_query_local_not_installed_is_empty() {
        let runner = ScriptedRunner::new();
        runner.respond(
            "/usr/bin/aura --query --info foo",
            CommandOutput::new(1, "").with_stderr("error: package 'foo' was not found"),
        );

        assert!(backend(&runner).query_local("foo").unwrap().is_empty());
    }

    #[test]
    fn test_query_remote_blank_output_is_empty() {
        let runner = ScriptedRunner::new();
        runner.respond("/usr/bin/aura --aursync --info foo", CommandOutput::new(0, "  \n"));

        assert!(backend(&runner).query_remote("foo").unwrap().is_empty());
    }

    #[test]
    fn test_query_remote_ignores_exit_code() {
        let runner = ScriptedRunner::new();
        runner.respond(
            "/usr/bin/aura --aursync --info foo",
            CommandOutput::new(1, "\x1b[1mVersion\x1b[0m  : 2\n"),
        );

        let meta = backend(&runner).query_remote("foo").unwrap();
        assert_eq!(meta.version(), Some("2"));
    }

    #[test]
    fn test_install_command_line() {
        let runner = ScriptedRunner::new();
        runner.respond(
            "/usr/bin/aura --aursync foo --noconfirm",
            CommandOutput::new(0, "Determining dependencies..."),
        );

        backend(&runner)
            .install("foo", &InstallOptions::default())
            .unwrap();
        assert_eq!(runner.calls(), vec!["/usr/bin/aura --aursync foo --noconfirm"]);
    }

    #[test]
    fn test_install_command_line_with_options() {
        let runner = ScriptedRunner::new();
        runner.respond(
            "/usr/bin/aura --aursync --builduser=nobody foo --delmakedeps --noconfirm",
            CommandOutput::new(0, ""),
        );

        let opts = InstallOptions::default()
            .with_build_user("nobody")
            .with_delmakedeps(true);
        backend(&runner).install("foo", &opts).unwrap();
    }

    #[test]
    fn test_install_failure_carries_name_and_stderr() {
        let runner = ScriptedRunner::new();
        runner.respond(
            "/usr/bin/aura --aursync foo --noconfirm",
            CommandOutput::new(1, "").with_stderr("makepkg failed\n"),
        );

        let err = backend(&runner)
            .install("foo", &InstallOptions::default())
            .unwrap_err();
        match err {
            Error::InstallFailed { name, stderr } => {
                assert_eq!(name, "foo");
                assert_eq!(stderr, "makepkg failed");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_sysupgrade_preview_nothing_to_do() {
        let runner = ScriptedRunner::new();
        runner.respond("/usr/bin/aura -A --sysupgrade --dryrun", CommandOutput::new(1, ""));

        assert_eq!(backend(&runner).sysupgrade_preview().unwrap(), None);
    }

    #[test]
    fn test_sysupgrade_preview_lists_packages() {
        let runner = ScriptedRunner::new();
        runner.respond(
            "/usr/bin/aura -A --sysupgrade --dryrun",
            CommandOutput::new(0, "aura >>= AUR Packages to upgrade:\nfoo\nbar\n\n"),
        );

        let preview = backend(&runner).sysupgrade_preview().unwrap();
        assert_eq!(preview, Some(vec!["foo".to_string(), "bar".to_string()]));
    }

    #[test]
    fn test_sysupgrade_failure() {
        let runner = ScriptedRunner::new();
        runner.respond("/usr/bin/aura -A --sysupgrade --noconfirm", CommandOutput::new(1, ""));

        let err = backend(&runner).sysupgrade().unwrap_err();
        assert_eq!(err.to_string(), "Could not upgrade");
    }

    #[test]
    fn test_at_missing_path() {
        let result = AuraBackend::at("/nonexistent/bin/aura");
        assert!(matches!(result, Err(Error::BinaryNotFound { .. })));
    }
}
