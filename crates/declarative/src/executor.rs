//! Execution engine - applies a plan and folds the outcomes into a report

use crate::context::{ProgressCallback, Reporter};
use crate::error::{ReconcileError, Result};
use crate::planner::{Plan, decide_reported, unique_names};
use crate::types::{
    AggregateReport, DesiredState, FailurePolicy, Mode, Outcome, ReconciliationResult,
    ReportStatus,
};
use aurakit::{Backend, InstallOptions};

/// Fold per-package outcomes into a report
///
/// The sequence is consumed lazily. Under [`FailurePolicy::FailFast`]
/// consumption stops right after the first failure, so nothing behind it
/// is ever evaluated.
pub fn aggregate<I, S>(outcomes: I, policy: FailurePolicy) -> AggregateReport
where
    I: IntoIterator<Item = (S, Outcome)>,
    S: Into<String>,
{
    let mut report = AggregateReport::default();

    for (name, outcome) in outcomes {
        let failed = outcome.is_failure();
        report.add_outcome(name, outcome);

        if failed && policy == FailurePolicy::FailFast {
            log::debug!("stopping after first failure");
            break;
        }
    }

    report
}

/// Run the install/upgrade for every actionable package in `plan`
///
/// Packages are handled strictly in plan order, one at a time.
pub fn apply<B, P>(
    backend: &B,
    plan: &Plan,
    options: &InstallOptions,
    policy: FailurePolicy,
    progress: &mut P,
) -> AggregateReport
where
    B: Backend + ?Sized,
    P: ProgressCallback,
{
    let outcomes = plan.results.iter().map(|result| {
        let outcome = act(backend, result, options, progress);
        (result.name.as_str(), outcome)
    });

    aggregate(outcomes, policy)
}

/// Decide and act on each package before looking at the next one
///
/// Repeated names are handled once. Each package is queried, decided and
/// (if needed) installed before the next is queried, so under
/// [`FailurePolicy::FailFast`] nothing after a failed install is touched.
/// A package unknown to the AUR stops the pass with
/// [`ReconcileError::RemoteNotFound`]; installs before it stay done.
pub fn converge<B, S, P>(
    backend: &B,
    names: &[S],
    desired: DesiredState,
    options: &InstallOptions,
    policy: FailurePolicy,
    progress: &mut P,
) -> Result<AggregateReport>
where
    B: Backend + ?Sized,
    S: AsRef<str>,
    P: ProgressCallback,
{
    let mut stopped = None;

    let outcomes = unique_names(names).into_iter().map_while(|name| {
        match decide_reported(backend, name, desired, progress) {
            Ok(result) => {
                let outcome = act(backend, &result, options, progress);
                Some((result.name, outcome))
            }
            Err(err) => {
                stopped = Some(err);
                None
            }
        }
    });
    let report = aggregate(outcomes, policy);

    match stopped {
        Some(err) => Err(err),
        None => Ok(report),
    }
}

/// Install one package if its decision calls for it
fn act<B, P>(
    backend: &B,
    result: &ReconciliationResult,
    options: &InstallOptions,
    progress: &mut P,
) -> Outcome
where
    B: Backend + ?Sized,
    P: ProgressCallback,
{
    if !result.requires_action {
        return Outcome::Unchanged;
    }

    progress.on_action_start(&result.name);
    log::info!("Installing {} ({})", result.name, result.reason);

    let outcome = match backend.install(&result.name, options) {
        Ok(()) => Outcome::Changed,
        Err(source) => {
            let category = source.category();
            log::warn!(
                "{}: {}. {}",
                result.name,
                category.description(),
                category.advice()
            );
            log::debug!("{} stderr: {}", result.name, source.stderr());
            let err = ReconcileError::ActionFailed {
                name: result.name.clone(),
                source,
            };
            Outcome::Failed {
                message: err.to_string(),
            }
        }
    };

    progress.on_action_complete(&result.name, &outcome);
    outcome
}

/// Report what [`apply`] would do, without calling the backend
pub fn check(plan: &Plan) -> AggregateReport {
    let outcomes = plan.results.iter().map(|result| {
        let outcome = if result.requires_action {
            Outcome::Changed
        } else {
            Outcome::Unchanged
        };
        (result.name.as_str(), outcome)
    });

    aggregate(outcomes, FailurePolicy::Continue)
}

/// Hand a finished report to `reporter`
///
/// Several failures (under [`FailurePolicy::Continue`]) are delivered as
/// one message with a line per package, first failure first.
pub fn deliver<R: Reporter + ?Sized>(
    report: &AggregateReport,
    mode: Mode,
    desired: DesiredState,
    reporter: &mut R,
) {
    match (report.status(), mode) {
        (ReportStatus::Failed, _) => {
            let message = report
                .failures
                .iter()
                .map(|f| f.message.as_str())
                .collect::<Vec<_>>()
                .join("\n");
            reporter.report_failed(&message);
        }
        (ReportStatus::Changed, Mode::Apply) => reporter.report_changed(
            report.changed_count,
            &format!("Installed {} package(s).", report.changed_count),
        ),
        (ReportStatus::Unchanged, Mode::Apply) => {
            reporter.report_changed(0, "All packages already installed.");
        }
        (ReportStatus::Changed, Mode::Check) => reporter.report_changed(
            report.changed_count,
            &format!("{} package(s) would be {}", report.changed_count, desired),
        ),
        (ReportStatus::Unchanged, Mode::Check) => {
            reporter.report_changed(0, &format!("package(s) already {desired}"));
        }
    }
}
