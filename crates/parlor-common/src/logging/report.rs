//! On-demand summary report over the category log files
//!
//! Reads every category file in full, counts ERROR and WARNING lines, keeps
//! the tail of each file, and writes the assembled report next to the logs
//! it summarizes.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};

use super::event_log::LogCategory;

/// How many trailing lines of each category file the report quotes
const TAIL_LINES: usize = 20;

/// A generated summary report
#[derive(Debug, Clone)]
pub struct SummaryReport {
    /// Where the report file was written
    pub path: PathBuf,
    /// The full report text
    pub body: String,
}

/// Generate a summary report over `logs_dir` and write it there
///
/// Missing category files are reported with zero counts. The report file is
/// named `summary_report_<YYYYmmdd_HHMMSS>.txt`.
///
/// # Errors
/// Returns an error if the report file cannot be written
pub fn generate_report(logs_dir: &Path) -> std::io::Result<SummaryReport> {
    let generated_at = Utc::now();

    let mut body = String::new();
    body.push_str("==== Error Monitoring Summary Report ====\n");
    body.push_str(&format!(
        "Generated at: {}\n",
        generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    ));
    body.push_str(&format!("Logs directory: {}\n", logs_dir.display()));

    let mut total_errors = 0usize;
    let mut total_warnings = 0usize;

    for category in LogCategory::ALL {
        let content = fs::read_to_string(logs_dir.join(category.file_name())).unwrap_or_default();
        let errors = count_level(&content, "ERROR");
        let warnings = count_level(&content, "WARNING");
        total_errors += errors;
        total_warnings += warnings;

        body.push_str(&format!(
            "\n--- {} ({}) ---\n",
            category.label(),
            category.file_name()
        ));
        body.push_str(&format!("Errors: {errors} | Warnings: {warnings}\n"));

        let lines: Vec<&str> = content.lines().collect();
        if lines.is_empty() {
            body.push_str("(no entries)\n");
        } else {
            body.push_str(&format!("Recent entries (last {TAIL_LINES}):\n"));
            for line in &lines[lines.len().saturating_sub(TAIL_LINES)..] {
                body.push_str(line);
                body.push('\n');
            }
        }
    }

    body.push_str(&format!(
        "\nTotal: {total_errors} errors, {total_warnings} warnings across {} categories\n",
        LogCategory::ALL.len()
    ));

    fs::create_dir_all(logs_dir)?;
    let path = logs_dir.join(format!(
        "summary_report_{}.txt",
        generated_at.format("%Y%m%d_%H%M%S")
    ));
    fs::write(&path, &body)?;

    Ok(SummaryReport { path, body })
}

fn count_level(content: &str, level: &str) -> usize {
    let marker = format!(" - {level} - ");
    content.lines().filter(|line| line.contains(&marker)).count()
}
