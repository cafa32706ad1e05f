//! Planner - queries the backend and decides what each package needs

use crate::context::ProgressCallback;
use crate::diff::needs_action;
use crate::error::{ReconcileError, RemoteNotFound, Result};
use crate::types::{DesiredState, Reason, ReconciliationResult};
use aurakit::Backend;
use std::collections::HashSet;

/// Decisions for a batch of packages, in input order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    /// State the batch was planned against
    pub desired: DesiredState,
    /// One result per package
    pub results: Vec<ReconciliationResult>,
}

impl Plan {
    /// Create a new empty plan
    pub fn new(desired: DesiredState) -> Self {
        Self {
            desired,
            results: Vec::new(),
        }
    }

    /// Results that need an install/upgrade
    pub fn actions(&self) -> impl Iterator<Item = &ReconciliationResult> {
        self.results.iter().filter(|r| r.requires_action)
    }

    /// Number of packages an apply would change
    pub fn would_change(&self) -> usize {
        self.actions().count()
    }

    /// Total number of packages in the plan
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Check if plan is empty
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// `names` without repeats, first occurrence kept, order preserved
pub fn unique_names<S: AsRef<str>>(names: &[S]) -> Vec<&str> {
    let mut seen = HashSet::new();
    names
        .iter()
        .map(AsRef::as_ref)
        .filter(|name| {
            let first = seen.insert(*name);
            if !first {
                log::debug!("{name}: listed more than once, ignoring repeat");
            }
            first
        })
        .collect()
}

/// Build a plan for `names`
///
/// Repeated names are planned once. A package the AUR does not know aborts
/// planning with [`ReconcileError::RemoteNotFound`] after its result has
/// been passed to `progress`; later packages are not queried.
pub fn build_plan<B, S, P>(
    backend: &B,
    names: &[S],
    desired: DesiredState,
    progress: &mut P,
) -> Result<Plan>
where
    B: Backend + ?Sized,
    S: AsRef<str>,
    P: ProgressCallback,
{
    let mut plan = Plan::new(desired);

    for name in unique_names(names) {
        let result = decide_reported(backend, name, desired, progress)?;
        plan.results.push(result);
    }

    Ok(plan)
}

/// Query one package and run [`needs_action`] on it
///
/// A package unknown to the AUR yields a `NotFoundRemotely` result rather
/// than an error, so callers can show it before stopping.
pub fn decide<B: Backend + ?Sized>(
    backend: &B,
    name: &str,
    desired: DesiredState,
) -> Result<ReconciliationResult> {
    let query_err = |source| ReconcileError::Query {
        name: name.to_string(),
        source,
    };

    let remote = backend.query_remote(name).map_err(query_err)?;
    let local = backend.query_local(name).map_err(query_err)?;

    let result = match needs_action(&local, &remote, desired) {
        Ok(decision) => ReconciliationResult::new(name, decision, &local, &remote),
        Err(RemoteNotFound) => ReconciliationResult::not_found(name, &local),
    };

    log::debug!(
        "{name}: {} (local {:?}, remote {:?})",
        result.reason,
        result.local_version,
        result.remote_version
    );
    Ok(result)
}

/// [`decide`], tell `progress`, and turn a remote miss into an error
pub(crate) fn decide_reported<B, P>(
    backend: &B,
    name: &str,
    desired: DesiredState,
    progress: &mut P,
) -> Result<ReconciliationResult>
where
    B: Backend + ?Sized,
    P: ProgressCallback,
{
    let result = decide(backend, name, desired)?;
    progress.on_decision(&result);

    if result.reason == Reason::NotFoundRemotely {
        return Err(ReconcileError::RemoteNotFound {
            name: name.to_string(),
        });
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::NoProgress;
    use aurakit::MockBackend;

    #[derive(Default)]
    struct Decisions(Vec<String>);

    impl ProgressCallback for Decisions {
        fn on_decision(&mut self, result: &ReconciliationResult) {
            self.0.push(format!("{}:{}", result.name, result.reason));
        }
        fn on_action_start(&mut self, _name: &str) {}
        fn on_action_complete(&mut self, _name: &str, _outcome: &crate::types::Outcome) {}
    }

    #[test]
    fn test_plan_keeps_input_order() {
        let backend = MockBackend::new();
        backend
            .add_remote("foo", "2")
            .add_remote("bar", "1")
            .add_local("bar", "1");

        let plan = build_plan(&backend, &["foo", "bar"], DesiredState::Latest, &mut NoProgress)
            .unwrap();

        let names: Vec<_> = plan.results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["foo", "bar"]);
        assert_eq!(plan.results[0].reason, Reason::NotInstalled);
        assert_eq!(plan.results[1].reason, Reason::UpToDate);
        assert_eq!(plan.would_change(), 1);
        assert_eq!(plan.len(), 2);
    }

    #[test]
    fn test_remote_miss_aborts_planning() {
        let backend = MockBackend::new();
        backend.add_local("foo", "1").add_remote("bar", "1");

        let mut progress = Decisions::default();
        let err = build_plan(&backend, &["foo", "bar"], DesiredState::Present, &mut progress)
            .unwrap_err();

        assert!(matches!(err, ReconcileError::RemoteNotFound { ref name } if name == "foo"));
        // bar is never looked at
        assert_eq!(progress.0, vec!["foo:not found on AUR"]);
    }

    #[test]
    fn test_repeated_names_are_planned_once() {
        let backend = MockBackend::new();
        backend.add_remote("foo", "1").add_remote("bar", "1");

        let plan = build_plan(
            &backend,
            &["foo", "bar", "foo"],
            DesiredState::Present,
            &mut NoProgress,
        )
        .unwrap();

        let names: Vec<_> = plan.results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["foo", "bar"]);
        assert_eq!(plan.would_change(), 2);
    }

    #[test]
    fn test_unique_names_keeps_first_occurrence() {
        assert_eq!(unique_names(&["b", "a", "b", "c", "a"]), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_decide_remote_miss_keeps_local_version() {
        let backend = MockBackend::new();
        backend.add_local("foo", "1");

        let result = decide(&backend, "foo", DesiredState::Latest).unwrap();
        assert_eq!(result.reason, Reason::NotFoundRemotely);
        assert!(!result.requires_action);
        assert_eq!(result.local_version.as_deref(), Some("1"));
    }

    #[test]
    fn test_empty_plan() {
        let backend = MockBackend::new();
        let names: [&str; 0] = [];
        let plan = build_plan(&backend, &names, DesiredState::Present, &mut NoProgress).unwrap();
        assert!(plan.is_empty());
        assert_eq!(plan.would_change(), 0);
    }
}
