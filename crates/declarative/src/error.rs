//! Reconciliation errors

use thiserror::Error;

/// The AUR returned no metadata for a package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("package not found remotely")]
pub struct RemoteNotFound;

/// Errors that stop a reconciliation pass
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// The package cannot be resolved at all; never retried
    #[error("No package '{name}' found on AUR.")]
    RemoteNotFound { name: String },

    /// An install/upgrade invocation failed
    #[error("Failed to install package '{name}'.")]
    ActionFailed {
        name: String,
        #[source]
        source: aurakit::Error,
    },

    /// aura could not be run to query a package
    #[error("Failed to query package '{name}': {source}")]
    Query {
        name: String,
        #[source]
        source: aurakit::Error,
    },
}

impl ReconcileError {
    /// Name of the package the error is about
    pub fn package(&self) -> &str {
        match self {
            Self::RemoteNotFound { name }
            | Self::ActionFailed { name, .. }
            | Self::Query { name, .. } => name,
        }
    }
}

/// Result type for reconciliation
pub type Result<T> = std::result::Result<T, ReconcileError>;
