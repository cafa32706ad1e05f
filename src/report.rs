//! Reporters: how the outcome of a command reaches the terminal

use anyhow::Result;
use aurakit::PackageMetadata;
use declarative::Reporter;
use serde_json::json;

use crate::config::OutputFormat;
use crate::ui;

/// A [`Reporter`] that also renders metadata and remembers failures
pub trait Output: Reporter {
    /// Whether a failure has been reported
    fn has_failed(&self) -> bool;

    /// Whether the output is meant for a person
    fn is_human(&self) -> bool;

    /// Print package metadata
    fn metadata(&mut self, meta: &PackageMetadata) -> Result<()>;
}

/// Create the reporter for a format
pub fn for_format(format: OutputFormat) -> Box<dyn Output> {
    match format {
        OutputFormat::Human => Box::new(HumanReporter::default()),
        OutputFormat::Json => Box::new(JsonReporter::default()),
    }
}

// ============================================================================
// Human
// ============================================================================

/// Coloured status lines
#[derive(Default)]
pub struct HumanReporter {
    failed: bool,
}

impl Reporter for HumanReporter {
    fn report_changed(&mut self, count: usize, message: &str) {
        if count > 0 {
            ui::success(message);
        } else {
            ui::info(message);
        }
    }

    fn report_failed(&mut self, message: &str) {
        self.failed = true;
        for line in message.lines() {
            ui::error(line);
        }
    }
}

impl Output for HumanReporter {
    fn has_failed(&self) -> bool {
        self.failed
    }

    fn is_human(&self) -> bool {
        true
    }

    fn metadata(&mut self, meta: &PackageMetadata) -> Result<()> {
        if meta.is_empty() {
            ui::warn("No metadata");
            return Ok(());
        }
        for (key, value) in meta.iter() {
            ui::kv(key, value);
        }
        Ok(())
    }
}

// ============================================================================
// JSON
// ============================================================================

/// One JSON object per result on stdout
#[derive(Default)]
pub struct JsonReporter {
    failed: bool,
}

fn changed_json(count: usize, message: &str) -> String {
    json!({ "changed": count > 0, "msg": message }).to_string()
}

fn failed_json(message: &str) -> String {
    json!({ "failed": true, "msg": message }).to_string()
}

impl Reporter for JsonReporter {
    fn report_changed(&mut self, count: usize, message: &str) {
        println!("{}", changed_json(count, message));
    }

    fn report_failed(&mut self, message: &str) {
        self.failed = true;
        println!("{}", failed_json(message));
    }
}

impl Output for JsonReporter {
    fn has_failed(&self) -> bool {
        self.failed
    }

    fn is_human(&self) -> bool {
        false
    }

    fn metadata(&mut self, meta: &PackageMetadata) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(meta)?);
        Ok(())
    }
}
