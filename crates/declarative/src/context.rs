//! Reporter and progress traits
//!
//! These traits allow the declarative crate to be used without
//! depending on a specific output format or terminal UI.

use crate::types::{Outcome, ReconciliationResult};

/// Sink for the final result of a reconciliation pass
///
/// Implemented by the host program. The reconciler never exits the
/// process itself; a reported failure is the caller's cue to do so.
pub trait Reporter {
    /// Called once when the pass changed (or would change) something, or
    /// was already satisfied (`count == 0`)
    fn report_changed(&mut self, count: usize, message: &str);

    /// Called once when the pass failed
    fn report_failed(&mut self, message: &str);
}

/// A delivered report, as seen by [`RecordingReporter`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reported {
    Changed { count: usize, message: String },
    Failed { message: String },
}

/// Reporter that keeps everything it was told
///
/// Useful in tests and for callers that render the result themselves.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub reports: Vec<Reported>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last report delivered, if any
    pub fn last(&self) -> Option<&Reported> {
        self.reports.last()
    }
}

impl Reporter for RecordingReporter {
    fn report_changed(&mut self, count: usize, message: &str) {
        self.reports.push(Reported::Changed {
            count,
            message: message.to_string(),
        });
    }

    fn report_failed(&mut self, message: &str) {
        self.reports.push(Reported::Failed {
            message: message.to_string(),
        });
    }
}

/// Progress callback for reconciliation
///
/// Implement this trait to receive progress updates while planning and
/// applying.
pub trait ProgressCallback {
    /// Called after the decision for a package has been made
    fn on_decision(&mut self, result: &ReconciliationResult);

    /// Called right before the install/upgrade of a package starts
    fn on_action_start(&mut self, name: &str);

    /// Called when the install/upgrade of a package completes
    fn on_action_complete(&mut self, name: &str, outcome: &Outcome);
}

/// No-op progress callback
pub struct NoProgress;

impl ProgressCallback for NoProgress {
    fn on_decision(&mut self, _result: &ReconciliationResult) {}
    fn on_action_start(&mut self, _name: &str) {}
    fn on_action_complete(&mut self, _name: &str, _outcome: &Outcome) {}
}
