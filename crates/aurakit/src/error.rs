//! Error types for aura operations.
//!
//! Errors are categorized so callers can give useful feedback. A failed
//! `aura` invocation is classified from its stderr into an [`ErrorCategory`]
//! with a short description and a piece of advice.

use thiserror::Error;

/// Categories of aura errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Network-related errors (AUR unreachable, download failed)
    Network,
    /// Package not found on the AUR
    NotFound,
    /// PKGBUILD build or dependency resolution failed
    Build,
    /// Permission denied (may need sudo or a build user)
    Permission,
    /// The aura executable could not be located
    BinaryNotFound,
    /// Other/unknown errors
    Other,
}

impl ErrorCategory {
    /// Get a user-friendly description of this error category.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Network => "Network connectivity issue",
            Self::NotFound => "Package not found",
            Self::Build => "Package build failed",
            Self::Permission => "Permission denied",
            Self::BinaryNotFound => "aura not installed",
            Self::Other => "Unexpected error",
        }
    }

    /// Get actionable advice for resolving this error category.
    pub fn advice(&self) -> &'static str {
        match self {
            Self::Network => "Check your internet connection and try again",
            Self::NotFound => "Verify the package name on https://aur.archlinux.org",
            Self::Build => "Inspect the build log; a missing makedepend is the usual cause",
            Self::Permission => "Run as root or pass a non-root build user",
            Self::BinaryNotFound => "Install aura or set aura_path in the config",
            Self::Other => "Check the error details for more information",
        }
    }
}

/// Errors that can occur while driving aura.
#[derive(Debug, Error)]
pub enum Error {
    /// The executable is not installed or not found in PATH
    #[error("{name} not found in PATH")]
    BinaryNotFound {
        /// Name of the executable that was searched for
        name: String,
    },

    /// Installing or upgrading a single package failed
    #[error("Failed to install package '{name}'.")]
    InstallFailed {
        /// Package that failed
        name: String,
        /// Standard error output from aura
        stderr: String,
    },

    /// A full AUR sysupgrade failed
    #[error("Could not upgrade")]
    UpgradeFailed {
        /// Standard error output from aura
        stderr: String,
    },

    /// The command could not be spawned at all
    #[error("command failed: {message}")]
    CommandFailed {
        /// Description of what command failed
        message: String,
        /// Standard error output, if any was captured
        stderr: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Get the error category by inspecting the captured stderr.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::BinaryNotFound { .. } => ErrorCategory::BinaryNotFound,
            Error::InstallFailed { stderr, .. }
            | Error::UpgradeFailed { stderr }
            | Error::CommandFailed { stderr, .. } => classify_stderr(stderr),
            Error::Io(_) => ErrorCategory::Other,
        }
    }

    /// Captured stderr of the failed command, empty if there was none.
    pub fn stderr(&self) -> &str {
        match self {
            Error::InstallFailed { stderr, .. }
            | Error::UpgradeFailed { stderr }
            | Error::CommandFailed { stderr, .. } => stderr,
            _ => "",
        }
    }
}

/// Classify aura's stderr into an error category.
pub fn classify_stderr(stderr: &str) -> ErrorCategory {
    let stderr_lower = stderr.to_lowercase();

    if stderr_lower.contains("could not resolve")
        || stderr_lower.contains("connection refused")
        || stderr_lower.contains("timed out")
        || stderr_lower.contains("network")
        || stderr_lower.contains("failed to download")
        || stderr_lower.contains("ssl")
    {
        return ErrorCategory::Network;
    }

    if stderr_lower.contains("no package")
        || stderr_lower.contains("not found on the aur")
        || stderr_lower.contains("target not found")
        || stderr_lower.contains("doesn't exist")
    {
        return ErrorCategory::NotFound;
    }

    if stderr_lower.contains("permission denied")
        || stderr_lower.contains("operation not permitted")
        || stderr_lower.contains("must be run as root")
        || stderr_lower.contains("you have to use sudo")
    {
        return ErrorCategory::Permission;
    }

    if stderr_lower.contains("makepkg")
        || stderr_lower.contains("build failed")
        || stderr_lower.contains("building")
        || stderr_lower.contains("dependency")
    {
        return ErrorCategory::Build;
    }

    ErrorCategory::Other
}

/// Result type for aura operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_failed_message_names_package() {
        let err = Error::InstallFailed {
            name: "foo".to_string(),
            stderr: String::new(),
        };
        assert_eq!(err.to_string(), "Failed to install package 'foo'.");
    }

    #[test]
    fn test_classify_network() {
        let err = Error::InstallFailed {
            name: "foo".to_string(),
            stderr: "curl: (6) Could not resolve host: aur.archlinux.org".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Network);
    }

    #[test]
    fn test_classify_build() {
        assert_eq!(
            classify_stderr("==> ERROR: A failure occurred in build().\nmakepkg exited"),
            ErrorCategory::Build
        );
    }

    #[test]
    fn test_classify_permission() {
        assert_eq!(
            classify_stderr("aura >>= You have to use sudo for that."),
            ErrorCategory::Permission
        );
    }

    #[test]
    fn test_binary_not_found_category() {
        let err = Error::BinaryNotFound {
            name: "aura".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::BinaryNotFound);
        assert_eq!(err.stderr(), "");
    }

    #[test]
    fn test_unknown_stderr_is_other() {
        assert_eq!(classify_stderr("something odd"), ErrorCategory::Other);
    }
}
