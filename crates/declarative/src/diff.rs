//! Decision procedure: compare local and remote metadata against the
//! desired state

use crate::error::RemoteNotFound;
use crate::types::{Decision, DesiredState, Reason, ReconciliationResult};
use aurakit::PackageMetadata;

/// Decide whether a package needs an install/upgrade action.
///
/// Checked in order:
/// 1. empty `remote` is a hard failure ([`RemoteNotFound`])
/// 2. empty `local` needs an install whatever the desired state
/// 3. [`DesiredState::Present`] is satisfied by any installed version
/// 4. [`DesiredState::Latest`] compares `Version` fields as exact strings
///
/// Versions are never parsed. An upgrade and a downgrade are both a
/// mismatch.
pub fn needs_action(
    local: &PackageMetadata,
    remote: &PackageMetadata,
    desired: DesiredState,
) -> Result<Decision, RemoteNotFound> {
    if remote.is_empty() {
        return Err(RemoteNotFound);
    }

    if local.is_empty() {
        return Ok(Decision::act(Reason::NotInstalled));
    }

    match desired {
        DesiredState::Present => Ok(Decision::skip(Reason::UpToDate)),
        DesiredState::Latest => {
            if local.version() == remote.version() {
                Ok(Decision::skip(Reason::UpToDate))
            } else {
                Ok(Decision::act(Reason::VersionMismatch))
            }
        }
    }
}

impl ReconciliationResult {
    /// Build a result from a decision and the metadata it was made from
    pub fn new(
        name: impl Into<String>,
        decision: Decision,
        local: &PackageMetadata,
        remote: &PackageMetadata,
    ) -> Self {
        Self {
            name: name.into(),
            requires_action: decision.requires_action,
            reason: decision.reason,
            local_version: local.version().map(str::to_string),
            remote_version: remote.version().map(str::to_string),
        }
    }

    /// Result for a package the AUR does not know
    pub fn not_found(name: impl Into<String>, local: &PackageMetadata) -> Self {
        Self {
            name: name.into(),
            requires_action: false,
            reason: Reason::NotFoundRemotely,
            local_version: local.version().map(str::to_string),
            remote_version: None,
        }
    }

    /// Check if this result is an install of a missing package
    pub fn is_install(&self) -> bool {
        self.requires_action && self.reason == Reason::NotInstalled
    }

    /// Check if this result is an upgrade (or downgrade) of an installed package
    pub fn is_upgrade(&self) -> bool {
        self.requires_action && self.reason == Reason::VersionMismatch
    }
}
