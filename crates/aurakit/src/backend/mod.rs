//! Backend abstraction for aura operations.
//!
//! The [`Backend`] trait defines the interface for querying and installing
//! AUR packages, allowing for different implementations (real CLI, mock
//! for testing).
//!
//! # Testing
//!
//! Use [`MockBackend`] for testing without aura installed:
//!
//! ```
//! use aurakit::backend::{Backend, MockBackend};
//! use aurakit::InstallOptions;
//!
//! let mock = MockBackend::new();
//! mock.add_remote("foo", "1.0-1");
//!
//! assert!(mock.query_local("foo").unwrap().is_empty());
//! mock.install("foo", &InstallOptions::default()).unwrap();
//! assert_eq!(mock.query_local("foo").unwrap().version(), Some("1.0-1"));
//! ```

pub mod aura;

use crate::error::{Error, Result};
use crate::types::{InstallOptions, PackageMetadata, VERSION_KEY};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// Backend trait for aura operations.
pub trait Backend: Send + Sync {
    /// Metadata of the locally installed package.
    ///
    /// Returns an empty mapping when the package is not installed.
    fn query_local(&self, name: &str) -> Result<PackageMetadata>;

    /// Metadata of the package on the AUR.
    ///
    /// Returns an empty mapping when the AUR does not know the package.
    fn query_remote(&self, name: &str) -> Result<PackageMetadata>;

    /// Build and install (or upgrade) a package from the AUR.
    fn install(&self, name: &str, options: &InstallOptions) -> Result<()>;

    /// Packages a sysupgrade would touch, or `None` when nothing is outdated.
    fn sysupgrade_preview(&self) -> Result<Option<Vec<String>>>;

    /// Upgrade every installed AUR package.
    fn sysupgrade(&self) -> Result<()>;
}

/// Mock backend for testing without aura.
///
/// Holds local and remote package tables in memory. A successful install
/// copies the remote metadata into the local table, like a real build
/// would.
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    local: Arc<Mutex<HashMap<String, PackageMetadata>>>,
    remote: Arc<Mutex<HashMap<String, PackageMetadata>>>,
    failing: Arc<Mutex<HashSet<String>>>,
    installs: Arc<Mutex<Vec<String>>>,
    upgrade_preview: Arc<Mutex<Option<Vec<String>>>>,
    upgrade_fails: Arc<Mutex<bool>>,
    upgrades: Arc<Mutex<usize>>,
}

impl MockBackend {
    /// Create a new empty mock backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a package as installed locally at `version`.
    pub fn add_local(&self, name: &str, version: &str) -> &Self {
        let meta = version_metadata(name, version);
        self.local.lock().unwrap().insert(name.to_string(), meta);
        self
    }

    /// Publish a package on the mock AUR at `version`.
    pub fn add_remote(&self, name: &str, version: &str) -> &Self {
        let meta = version_metadata(name, version);
        self.remote.lock().unwrap().insert(name.to_string(), meta);
        self
    }

    /// Make installs of `name` fail.
    pub fn fail_install(&self, name: &str) -> &Self {
        self.failing.lock().unwrap().insert(name.to_string());
        self
    }

    /// Set what `sysupgrade_preview` returns.
    pub fn set_upgrade_preview(&self, preview: Option<Vec<String>>) -> &Self {
        *self.upgrade_preview.lock().unwrap() = preview;
        self
    }

    /// Make `sysupgrade` fail.
    pub fn fail_upgrade(&self) -> &Self {
        *self.upgrade_fails.lock().unwrap() = true;
        self
    }

    /// Packages `install` was called for, in call order (failed calls included).
    pub fn installs(&self) -> Vec<String> {
        self.installs.lock().unwrap().clone()
    }

    /// Number of `sysupgrade` calls.
    pub fn upgrade_calls(&self) -> usize {
        *self.upgrades.lock().unwrap()
    }
}

fn version_metadata(name: &str, version: &str) -> PackageMetadata {
    [("Name", name), (VERSION_KEY, version)].into_iter().collect()
}

impl Backend for MockBackend {
    fn query_local(&self, name: &str) -> Result<PackageMetadata> {
        let local = self.local.lock().unwrap();
        Ok(local.get(name).cloned().unwrap_or_default())
    }

    fn query_remote(&self, name: &str) -> Result<PackageMetadata> {
        let remote = self.remote.lock().unwrap();
        Ok(remote.get(name).cloned().unwrap_or_default())
    }

    fn install(&self, name: &str, _options: &InstallOptions) -> Result<()> {
        self.installs.lock().unwrap().push(name.to_string());

        if self.failing.lock().unwrap().contains(name) {
            return Err(Error::InstallFailed {
                name: name.to_string(),
                stderr: "==> ERROR: A failure occurred in build().".to_string(),
            });
        }

        let remote = self.query_remote(name)?;
        self.local.lock().unwrap().insert(name.to_string(), remote);
        Ok(())
    }

    fn sysupgrade_preview(&self) -> Result<Option<Vec<String>>> {
        Ok(self.upgrade_preview.lock().unwrap().clone())
    }

    fn sysupgrade(&self) -> Result<()> {
        *self.upgrades.lock().unwrap() += 1;
        if *self.upgrade_fails.lock().unwrap() {
            return Err(Error::UpgradeFailed {
                stderr: String::new(),
            });
        }
        Ok(())
    }
}
