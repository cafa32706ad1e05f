//! Reconciler - one object tying planning, execution and reporting together

use crate::context::{NoProgress, ProgressCallback, Reporter};
use crate::error::Result;
use crate::executor;
use crate::planner::{Plan, build_plan};
use crate::types::{AggregateReport, DesiredState, FailurePolicy, Mode};
use aurakit::{Backend, InstallOptions};

/// Options for a reconciliation pass
#[derive(Debug, Clone, Default)]
pub struct ReconcileOptions {
    /// Passed to every install
    pub install: InstallOptions,
    /// What to do after a failed install
    pub policy: FailurePolicy,
    /// Apply or only check
    pub mode: Mode,
}

impl ReconcileOptions {
    pub fn with_install(mut self, install: InstallOptions) -> Self {
        self.install = install;
        self
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }
}

/// Brings AUR packages to a desired state through a [`Backend`]
///
/// The backend carries the aura binary path and the process runner, so a
/// reconciler holds no global state.
pub struct Reconciler<'a, B: Backend + ?Sized> {
    backend: &'a B,
    options: ReconcileOptions,
}

impl<'a, B: Backend + ?Sized> Reconciler<'a, B> {
    /// Create a new reconciler
    pub fn new(backend: &'a B, options: ReconcileOptions) -> Self {
        Self { backend, options }
    }

    /// The options this reconciler runs with
    pub fn options(&self) -> &ReconcileOptions {
        &self.options
    }

    /// Decide what each package needs, without changing anything
    pub fn plan<S: AsRef<str>>(&self, names: &[S], desired: DesiredState) -> Result<Plan> {
        build_plan(self.backend, names, desired, &mut NoProgress)
    }

    /// Count what [`Reconciler::apply`] would change
    pub fn check(&self, plan: &Plan) -> AggregateReport {
        executor::check(plan)
    }

    /// Install every package in `plan` that needs it
    pub fn apply(&self, plan: &Plan) -> AggregateReport {
        executor::apply(
            self.backend,
            plan,
            &self.options.install,
            self.options.policy,
            &mut NoProgress,
        )
    }

    /// Check or converge `names` depending on the configured mode, and
    /// deliver the outcome to `reporter`
    ///
    /// Repeated names are handled once. In [`Mode::Apply`] each package is
    /// decided and installed before the next one is queried; in
    /// [`Mode::Check`] everything is planned up front and nothing is
    /// installed. Errors that stop the pass (a package unknown to the AUR,
    /// a query that could not run) are delivered as a failure and returned.
    pub fn reconcile<S, R, P>(
        &self,
        names: &[S],
        desired: DesiredState,
        reporter: &mut R,
        progress: &mut P,
    ) -> Result<AggregateReport>
    where
        S: AsRef<str>,
        R: Reporter + ?Sized,
        P: ProgressCallback,
    {
        let result = match self.options.mode {
            Mode::Check => build_plan(self.backend, names, desired, progress)
                .map(|plan| self.check(&plan)),
            Mode::Apply => executor::converge(
                self.backend,
                names,
                desired,
                &self.options.install,
                self.options.policy,
                progress,
            ),
        };

        let report = match result {
            Ok(report) => report,
            Err(err) => {
                log::error!("{err}");
                reporter.report_failed(&err.to_string());
                return Err(err);
            }
        };

        executor::deliver(&report, self.options.mode, desired, reporter);
        Ok(report)
    }
}
