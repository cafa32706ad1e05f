mod cli;
mod commands;
mod config;
mod paths;
mod progress;
mod report;
mod ui;

use anyhow::{Context as _, Result};
use aurakit::AuraBackend;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use cli::{Cli, Command};
use config::Config;
use report::Output;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

/// Global context for the application
pub struct Context {
    pub quiet: bool,
    /// Settings from the config file
    pub config: Config,
    /// `--config`, if given
    pub config_path: Option<PathBuf>,
    /// `--aura-path`, if given
    pub aura_path: Option<PathBuf>,
}

impl Context {
    /// Backend for the configured aura, or the one on `PATH`
    pub fn backend(&self) -> Result<AuraBackend> {
        let backend = match self.aura_path.clone().or_else(|| self.config.aura_path()) {
            Some(path) => AuraBackend::at(path),
            None => AuraBackend::new(),
        };
        let backend = backend.context("Could not locate aura")?;
        log::debug!("Using aura at {}", backend.aura_path().display());
        Ok(backend)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(if cli.quiet {
            log::LevelFilter::Error
        } else {
            log_level
        })
        .format_timestamp(None)
        .init();

    let loaded = Config::load(cli.config.as_deref());
    let format = cli
        .format
        .or_else(|| loaded.as_ref().ok().map(|c| c.format))
        .unwrap_or_default();
    let mut out = report::for_format(format);

    let config = match loaded {
        Ok(config) => config,
        Err(err) => {
            fail(out.as_mut(), &err);
            return ExitCode::FAILURE;
        }
    };

    let ctx = Context {
        quiet: cli.quiet,
        config,
        config_path: cli.config,
        aura_path: cli.aura_path,
    };

    let result = match cli.command {
        Command::Install(args) => commands::install::run(&ctx, args, out.as_mut()),
        Command::Upgrade { check } => commands::upgrade::run(&ctx, check, out.as_mut()),
        Command::Info { name, remote } => commands::info::run(&ctx, &name, remote, out.as_mut()),
        Command::Config(cmd) => commands::config::run(&ctx, cmd, out.as_mut()),
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "aurasync", &mut io::stdout());
            Ok(())
        }
    };

    if let Err(err) = result {
        fail(out.as_mut(), &err);
    }

    if out.has_failed() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Report an error, with advice when it came from aura
fn fail(out: &mut dyn Output, err: &anyhow::Error) {
    log::debug!("{err:?}");
    out.report_failed(&format!("{err:#}"));

    if !out.is_human() {
        return;
    }
    if let Some(aura_err) = err
        .chain()
        .find_map(|e| e.downcast_ref::<aurakit::Error>())
    {
        let category = aura_err.category();
        ui::dim_err(&format!("{}. {}", category.description(), category.advice()));
    }
}
