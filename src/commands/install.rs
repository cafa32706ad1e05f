use anyhow::Result;
use aurakit::{Backend, InstallOptions};
use declarative::{FailurePolicy, Mode, NoProgress, ReconcileOptions, Reconciler};

use crate::Context;
use crate::cli::InstallArgs;
use crate::progress::SpinnerProgress;
use crate::report::Output;

pub fn run(ctx: &Context, args: InstallArgs, out: &mut dyn Output) -> Result<()> {
    let backend = ctx.backend()?;
    let options = options(ctx, &args);
    let spinner = out.is_human() && !ctx.quiet;

    reconcile(&backend, &args, options, spinner, out);
    Ok(())
}

/// Merge command-line flags over the config file
fn options(ctx: &Context, args: &InstallArgs) -> ReconcileOptions {
    let mut install =
        InstallOptions::default().with_delmakedeps(args.delmakedeps || ctx.config.delmakedeps);
    if let Some(user) = args
        .build_user
        .clone()
        .or_else(|| ctx.config.build_user.clone())
    {
        install = install.with_build_user(user);
    }

    let policy = if args.keep_going || ctx.config.keep_going {
        FailurePolicy::Continue
    } else {
        FailurePolicy::FailFast
    };
    let mode = if args.check { Mode::Check } else { Mode::Apply };

    ReconcileOptions::default()
        .with_install(install)
        .with_policy(policy)
        .with_mode(mode)
}

fn reconcile<B: Backend + ?Sized>(
    backend: &B,
    args: &InstallArgs,
    options: ReconcileOptions,
    spinner: bool,
    out: &mut dyn Output,
) {
    let reconciler = Reconciler::new(backend, options);

    let result = if spinner {
        reconciler.reconcile(&args.names, args.state, out, &mut SpinnerProgress::new())
    } else {
        reconciler.reconcile(&args.names, args.state, out, &mut NoProgress)
    };

    // Already delivered to `out` as a failure.
    if let Err(err) = result {
        log::debug!("reconciliation stopped: {err}");
    }
}
