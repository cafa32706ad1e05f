use clap::{Parser, Subcommand};
use clap_complete::Shell;
use declarative::DesiredState;
use std::path::PathBuf;

use crate::config::OutputFormat;

#[derive(Parser)]
#[command(name = "aurasync")]
#[command(author = "Alberto Cavalcante")]
#[command(version)]
#[command(about = "Bring AUR packages to a declared state with aura", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format (overrides the config file)
    #[arg(long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Config file to use instead of <config dir>/config.toml
    #[arg(long, global = true, env = "AURASYNC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Path to the aura executable (default: looked up on PATH)
    #[arg(long, global = true)]
    pub aura_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Ensure packages are installed (or at the AUR's latest version)
    Install(InstallArgs),

    /// Upgrade all installed AUR packages
    Upgrade {
        /// Only report what would be upgraded
        #[arg(long)]
        check: bool,
    },

    /// Show package metadata as aura reports it
    Info {
        /// Package name
        name: String,

        /// Query the AUR instead of the local database
        #[arg(long)]
        remote: bool,
    },

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

// ============================================================================
// Install
// ============================================================================

#[derive(Parser)]
pub struct InstallArgs {
    /// Packages to reconcile, handled in order
    #[arg(required = true)]
    pub names: Vec<String>,

    /// Desired state: present (or installed), latest
    #[arg(short, long, default_value = "present")]
    pub state: DesiredState,

    /// Remove make dependencies after building
    #[arg(long)]
    pub delmakedeps: bool,

    /// User to build packages as
    #[arg(long)]
    pub build_user: Option<String>,

    /// Only report what would change
    #[arg(long)]
    pub check: bool,

    /// Keep installing after a failure
    #[arg(long)]
    pub keep_going: bool,
}

// ============================================================================
// Config
// ============================================================================

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the config file location and effective settings
    Show,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_install_args() {
        let cli = Cli::try_parse_from([
            "aurasync",
            "-vv",
            "install",
            "foo",
            "bar",
            "--state",
            "installed",
            "--build-user",
            "nobody",
            "--keep-going",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Install(args) => {
                assert_eq!(args.names, vec!["foo", "bar"]);
                assert_eq!(args.state, DesiredState::Present);
                assert_eq!(args.build_user.as_deref(), Some("nobody"));
                assert!(args.keep_going);
                assert!(!args.check);
            }
            _ => panic!("expected install"),
        }
    }

    #[test]
    fn test_install_requires_a_name() {
        assert!(Cli::try_parse_from(["aurasync", "install"]).is_err());
    }

    #[test]
    fn test_install_rejects_unknown_state() {
        assert!(Cli::try_parse_from(["aurasync", "install", "foo", "--state", "absent"]).is_err());
    }

    #[test]
    fn test_global_format_flag() {
        let cli = Cli::try_parse_from(["aurasync", "upgrade", "--check", "--format", "json"]).unwrap();
        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert!(matches!(cli.command, Command::Upgrade { check: true }));
    }
}
