//! Progress indicators for the aurasync CLI.

use crate::ui;
use declarative::{Outcome, ProgressCallback, ReconciliationResult};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Start a spinner with a message
pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Finish a spinner with a success line
pub fn finish_success(pb: &ProgressBar, msg: &str) {
    pb.finish_and_clear();
    ui::success(msg);
}

/// Finish a spinner with an error line
pub fn finish_error(pb: &ProgressBar, msg: &str) {
    pb.finish_and_clear();
    ui::error(msg);
}

/// Shows a spinner while each package builds
#[derive(Default)]
pub struct SpinnerProgress {
    current: Option<ProgressBar>,
}

impl SpinnerProgress {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressCallback for SpinnerProgress {
    fn on_decision(&mut self, result: &ReconciliationResult) {
        log::info!("{}: {}", result.name, result.reason);
        ui::decision(result);
    }

    fn on_action_start(&mut self, name: &str) {
        self.current = Some(spinner(&format!("Building {name}")));
    }

    fn on_action_complete(&mut self, name: &str, outcome: &Outcome) {
        let Some(pb) = self.current.take() else {
            return;
        };
        match outcome {
            Outcome::Failed { .. } => finish_error(&pb, name),
            _ => finish_success(&pb, name),
        }
    }
}
