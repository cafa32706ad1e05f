//! # Declarative
//!
//! Declarative reconciliation of AUR packages.
//!
//! Callers declare a desired state for a list of packages; this crate
//! compares it with what is installed and what the AUR offers, and runs the
//! installs needed to converge.
//!
//! ## Core Concepts
//!
//! - **DesiredState**: `Present` (any version) or `Latest` (the AUR's version)
//! - **needs_action**: the decision procedure for one package
//! - **Plan**: decisions for a batch, in input order
//! - **aggregate**: folds per-package outcomes into an [`AggregateReport`],
//!   stopping at the first failure unless told to keep going
//! - **converge**: decide and install one package at a time
//! - **Reconciler**: check or converge, then report, in one call
//!
//! ## Example
//!
//! ```
//! use aurakit::MockBackend;
//! use declarative::{DesiredState, RecordingReporter, Reconciler, ReconcileOptions, NoProgress};
//!
//! let backend = MockBackend::new();
//! backend.add_remote("foo", "1.0-1");
//!
//! let reconciler = Reconciler::new(&backend, ReconcileOptions::default());
//! let mut reporter = RecordingReporter::new();
//! let report = reconciler
//!     .reconcile(&["foo"], DesiredState::Present, &mut reporter, &mut NoProgress)
//!     .unwrap();
//!
//! assert_eq!(report.changed_count, 1);
//! ```
//!
//! ## Provider Traits
//!
//! - [`Reporter`]: receives the final outcome of a pass
//! - [`ProgressCallback`]: receives per-package progress updates
//!
//! This allows the crate to be used without hard dependencies on a
//! specific output format or UI.

pub mod context;
pub mod diff;
pub mod error;
pub mod executor;
pub mod planner;
pub mod reconciler;
pub mod types;

// Re-export main types at crate root
pub use context::{NoProgress, ProgressCallback, RecordingReporter, Reported, Reporter};
pub use diff::needs_action;
pub use error::{ReconcileError, RemoteNotFound, Result};
pub use executor::{aggregate, apply, check, converge, deliver};
pub use planner::{Plan, build_plan, decide, unique_names};
pub use reconciler::{ReconcileOptions, Reconciler};
pub use types::{
    AggregateReport, Decision, DesiredState, Failure, FailurePolicy, Mode, Outcome,
    ParseStateError, Reason, ReconciliationResult, ReportStatus,
};
