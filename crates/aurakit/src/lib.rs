//! # aurakit
//!
//! Pure Rust library for driving the [aura](https://github.com/fosskers/aura)
//! AUR helper.
//!
//! This crate provides functionality for:
//! - Extracting `Key : Value` metadata from aura's coloured `--info` output
//! - Querying local and AUR package metadata
//! - Installing packages and running AUR sysupgrades
//! - Swapping the process layer for tests ([`runner::ScriptedRunner`],
//!   [`backend::MockBackend`])
//!
//! ## Example
//!
//! ```no_run
//! use aurakit::{Backend, AuraBackend, InstallOptions};
//!
//! let aura = AuraBackend::new().expect("aura not available");
//!
//! let remote = aura.query_remote("ripgrep-git").expect("query failed");
//! let local = aura.query_local("ripgrep-git").expect("query failed");
//!
//! if local.version() != remote.version() {
//!     aura.install("ripgrep-git", &InstallOptions::default()).expect("install failed");
//! }
//! ```
//!
//! ## Extraction
//!
//! ```
//! let meta = aurakit::extract("\x1b[1mVersion\x1b[0m : 1.0-1\nURL : https://aur.archlinux.org\n");
//! assert_eq!(meta.version(), Some("1.0-1"));
//! assert_eq!(meta.get("URL"), Some("https://aur.archlinux.org"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backend;
pub mod error;
pub mod extract;
pub mod runner;
pub mod types;

pub use backend::{Backend, MockBackend, aura::AuraBackend};
pub use error::{Error, ErrorCategory, Result};
pub use extract::{decode_output, extract, parse_upgrade_preview, strip_ansi};
pub use runner::{CommandRunner, ScriptedRunner, SystemRunner, locate_binary};
pub use types::{CommandOutput, InstallOptions, PackageMetadata, VERSION_KEY};

/// Get the default backend (aura found on `PATH`).
pub fn default_backend() -> Result<AuraBackend> {
    AuraBackend::new()
}
