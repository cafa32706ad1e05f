//! Path resolution for aurasync
//!
//! # Environment Variables
//!
//! - `AURASYNC_CONFIG_DIR` - Override config directory (e.g., `~/dotfiles/aurasync`)
//!
//! # Path Resolution Priority
//!
//! For config_dir():
//! 1. `AURASYNC_CONFIG_DIR` environment variable
//! 2. `XDG_CONFIG_HOME/aurasync` (if set)
//! 3. `~/.config/aurasync`

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Environment variable for config directory override
pub const ENV_CONFIG_DIR: &str = "AURASYNC_CONFIG_DIR";

const APP_DIR: &str = "aurasync";

/// Get the aurasync config directory path
pub fn config_dir() -> Result<PathBuf> {
    // 1. Check environment variable override
    if let Ok(dir) = std::env::var(ENV_CONFIG_DIR) {
        let path = expand(&dir);
        log::debug!(
            "Using config dir from {}: {}",
            ENV_CONFIG_DIR,
            path.display()
        );
        return Ok(path);
    }

    // 2. Check XDG_CONFIG_HOME
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME")
        && !xdg_config.is_empty()
    {
        let path = PathBuf::from(xdg_config).join(APP_DIR);
        log::debug!("Using XDG_CONFIG_HOME: {}", path.display());
        return Ok(path);
    }

    // 3. Default: ~/.config/aurasync
    let home = dirs::home_dir().context("Could not determine home directory")?;
    let path = home.join(".config").join(APP_DIR);
    log::debug!("Using default config dir: {}", path.display());
    Ok(path)
}

/// Expand ~ and environment variables in a path string.
///
/// Unknown variables are left as they are.
pub fn expand(path: &str) -> PathBuf {
    let expanded = shellexpand::full(path).unwrap_or(std::borrow::Cow::Borrowed(path));
    PathBuf::from(expanded.as_ref())
}

// ============================================================================
// Tests
// ============================================================================
