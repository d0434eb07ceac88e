//! Category event log and summary reporting
//!
//! Application-level error tracking, separate from the tracing pipeline:
//! append-only per-category files, a slow-call drop guard, and an on-demand
//! summary report over the accumulated files.

mod event_log;
mod perf;
mod report;

pub use event_log::{EventLog, LogCategory};
pub use perf::PerfTimer;
pub use report::{generate_report, SummaryReport};
