//! Core types for declarative package reconciliation

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Target state declared for a package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DesiredState {
    /// Installed locally, any version
    #[default]
    Present,
    /// Installed locally at the version the AUR currently offers
    Latest,
}

impl DesiredState {
    /// Lowercase name used in messages and config
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Latest => "latest",
        }
    }
}

impl fmt::Display for DesiredState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a [`DesiredState`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid state '{0}' (expected present, installed or latest)")]
pub struct ParseStateError(pub String);

impl FromStr for DesiredState {
    type Err = ParseStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "present" | "installed" => Ok(Self::Present),
            "latest" => Ok(Self::Latest),
            _ => Err(ParseStateError(s.to_string())),
        }
    }
}

/// Why a package does or does not need an action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    /// Not installed locally
    NotInstalled,
    /// Installed, but the version differs from the AUR's
    VersionMismatch,
    /// Already satisfies the desired state
    UpToDate,
    /// The AUR does not know the package
    NotFoundRemotely,
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NotInstalled => "not installed",
            Self::VersionMismatch => "version mismatch",
            Self::UpToDate => "up to date",
            Self::NotFoundRemotely => "not found on AUR",
        };
        f.write_str(s)
    }
}

/// Outcome of the decision procedure for one package
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub requires_action: bool,
    pub reason: Reason,
}

impl Decision {
    pub(crate) fn act(reason: Reason) -> Self {
        Self {
            requires_action: true,
            reason,
        }
    }

    pub(crate) fn skip(reason: Reason) -> Self {
        Self {
            requires_action: false,
            reason,
        }
    }
}

/// Per-package reconciliation result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationResult {
    pub name: String,
    pub requires_action: bool,
    pub reason: Reason,
    /// Installed version, if any
    pub local_version: Option<String>,
    /// Version on the AUR, if known
    pub remote_version: Option<String>,
}

/// Result of attempting (or skipping) the action for one package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Nothing needed doing
    Unchanged,
    /// The action ran and succeeded
    Changed,
    /// The action ran and failed
    Failed { message: String },
}

impl Outcome {
    /// Check if the outcome represents a change
    pub fn is_change(&self) -> bool {
        matches!(self, Self::Changed)
    }

    /// Check if the outcome represents a failure
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// What to do with the rest of a batch after a failed action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Stop at the first failure; later packages are never attempted
    #[default]
    FailFast,
    /// Record the failure and keep going
    Continue,
}

/// Whether a pass mutates the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Run the install/upgrade actions
    #[default]
    Apply,
    /// Only report what would change
    Check,
}

/// A failed package and its error message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    pub name: String,
    pub message: String,
}

/// Overall status of a pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Unchanged,
    Changed,
    Failed,
}

/// Aggregated result of a reconciliation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateReport {
    /// Packages that were (or in check mode would be) changed
    pub changed_count: usize,
    /// Package outcomes observed
    pub total: usize,
    /// Failures in the order they happened
    pub failures: Vec<Failure>,
}

impl AggregateReport {
    /// Failure overrides changed, changed overrides unchanged
    pub fn status(&self) -> ReportStatus {
        if !self.failures.is_empty() {
            ReportStatus::Failed
        } else if self.changed_count > 0 {
            ReportStatus::Changed
        } else {
            ReportStatus::Unchanged
        }
    }

    /// Check if the pass had no failures
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Add an outcome to the report
    pub fn add_outcome(&mut self, name: impl Into<String>, outcome: Outcome) {
        self.total += 1;
        match outcome {
            Outcome::Unchanged => {}
            Outcome::Changed => self.changed_count += 1,
            Outcome::Failed { message } => self.failures.push(Failure {
                name: name.into(),
                message,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_desired_state_parsing() {
        assert_eq!("present".parse(), Ok(DesiredState::Present));
        assert_eq!("installed".parse(), Ok(DesiredState::Present));
        assert_eq!("Latest".parse(), Ok(DesiredState::Latest));
        assert!("absent".parse::<DesiredState>().is_err());
    }

    #[test]
    fn test_desired_state_display() {
        assert_eq!(DesiredState::Present.to_string(), "present");
        assert_eq!(DesiredState::Latest.to_string(), "latest");
    }

    #[test]
    fn test_report_status_precedence() {
        let mut report = AggregateReport::default();
        assert_eq!(report.status(), ReportStatus::Unchanged);

        report.add_outcome("foo", Outcome::Changed);
        assert_eq!(report.status(), ReportStatus::Changed);

        report.add_outcome(
            "bar",
            Outcome::Failed {
                message: "boom".to_string(),
            },
        );
        assert_eq!(report.status(), ReportStatus::Failed);
        assert_eq!(report.total, 2);
        assert_eq!(report.changed_count, 1);
    }

    #[test]
    fn test_report_serializes() {
        let report = AggregateReport {
            changed_count: 1,
            total: 2,
            failures: vec![],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["changed_count"], 1);
        assert_eq!(json["total"], 2);
    }
}
