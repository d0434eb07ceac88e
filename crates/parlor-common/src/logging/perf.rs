//! Slow-call detection
//!
//! A drop guard that appends a performance warning when the guarded scope
//! outlives its threshold. Used around login, dashboard aggregation, report
//! generation, and whole requests.

use std::time::{Duration, Instant};

use super::event_log::{EventLog, LogCategory};

/// Drop guard measuring one labelled operation
#[must_use = "the timer only reports when dropped"]
pub struct PerfTimer<'a> {
    log: &'a EventLog,
    label: String,
    threshold: Duration,
    start: Instant,
}

impl<'a> PerfTimer<'a> {
    /// Start timing `label` against `threshold`
    pub fn new(log: &'a EventLog, label: impl Into<String>, threshold: Duration) -> Self {
        Self {
            log,
            label: label.into(),
            threshold,
            start: Instant::now(),
        }
    }
}

impl Drop for PerfTimer<'_> {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        if elapsed > self.threshold {
            self.log.warn(
                LogCategory::Performance,
                &format!(
                    "Slow operation: {} took {}ms (threshold {}ms)",
                    self.label,
                    elapsed.as_millis(),
                    self.threshold.as_millis()
                ),
            );
        }
    }
}
