use anyhow::{Context as _, Result};
use aurakit::Backend;

use crate::Context;
use crate::progress;
use crate::report::Output;

pub fn run(ctx: &Context, check: bool, out: &mut dyn Output) -> Result<()> {
    let backend = ctx.backend()?;
    let spinner = out.is_human() && !ctx.quiet;
    upgrade(&backend, check, spinner, out)
}

fn upgrade<B: Backend + ?Sized>(
    backend: &B,
    check: bool,
    spinner: bool,
    out: &mut dyn Output,
) -> Result<()> {
    let preview = backend
        .sysupgrade_preview()
        .context("Could not check for AUR upgrades")?;

    let Some(packages) = preview else {
        out.report_changed(0, "No AUR packages to upgrade");
        return Ok(());
    };

    for package in &packages {
        log::info!("Upgradable: {package}");
    }
    // aura exited 0, so the pass counts as a change even when its listing
    // could not be parsed into names.
    let changed = packages.len().max(1);

    if check {
        out.report_changed(
            changed,
            &format!("{} package(s) would be upgraded", packages.len()),
        );
        return Ok(());
    }

    let pb = spinner.then(|| progress::spinner("Upgrading AUR packages"));
    let result = backend.sysupgrade();
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    result?;
    out.report_changed(changed, "System upgraded");
    Ok(())
}
