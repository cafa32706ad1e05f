use anyhow::Result;
use serde_json::json;

use crate::Context;
use crate::cli::ConfigCommand;
use crate::config::Config;
use crate::report::Output;
use crate::ui;

pub fn run(ctx: &Context, cmd: ConfigCommand, out: &mut dyn Output) -> Result<()> {
    match cmd {
        ConfigCommand::Show => show(ctx, out),
    }
}

fn show(ctx: &Context, out: &mut dyn Output) -> Result<()> {
    let path = match &ctx.config_path {
        Some(path) => path.clone(),
        None => Config::default_path()?,
    };

    if !out.is_human() {
        let value = json!({
            "path": path,
            "exists": path.exists(),
            "config": ctx.config,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    ui::header("Configuration");
    println!();
    if path.exists() {
        ui::kv("Config file", &path.display().to_string());
    } else {
        ui::kv("Config file", &format!("{} (not found)", path.display()));
    }

    let aura = ctx
        .aura_path
        .clone()
        .or_else(|| ctx.config.aura_path())
        .map_or_else(|| "aura (from PATH)".to_string(), |p| p.display().to_string());
    ui::kv("aura", &aura);
    ui::kv(
        "build_user",
        ctx.config.build_user.as_deref().unwrap_or("(none)"),
    );
    ui::kv("delmakedeps", &ctx.config.delmakedeps.to_string());
    ui::kv("keep_going", &ctx.config.keep_going.to_string());

    let toml = ctx.config.to_toml()?;
    if !toml.trim().is_empty() {
        println!();
        for line in toml.lines() {
            ui::dim(line);
        }
    }

    Ok(())
}
