//! Append-only, category-partitioned log files
//!
//! Each category writes to its own file under the logs directory. Lines are
//! `<timestamp> - <LEVEL> - <message>`, which the summary report later counts
//! by substring. A failed write must never fail the request that triggered
//! it, so errors are reported through tracing and swallowed.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use parking_lot::Mutex;

/// Error taxonomy bucket, one file per variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogCategory {
    Http,
    Database,
    Performance,
    Security,
    Validation,
}

impl LogCategory {
    /// All categories, in report order
    pub const ALL: [Self; 5] = [
        Self::Http,
        Self::Database,
        Self::Performance,
        Self::Security,
        Self::Validation,
    ];

    /// File name under the logs directory
    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Http => "http_log.txt",
            Self::Database => "database_log.txt",
            Self::Performance => "performance_log.txt",
            Self::Security => "security_log.txt",
            Self::Validation => "validation_log.txt",
        }
    }

    /// Human-readable category name
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Http => "HTTP",
            Self::Database => "Database",
            Self::Performance => "Performance",
            Self::Security => "Security",
            Self::Validation => "Validation",
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum LogLevel {
    Warning,
    Error,
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }
}

/// Category event log with lazily opened, cached file handles
#[derive(Debug)]
pub struct EventLog {
    dir: PathBuf,
    files: Mutex<HashMap<LogCategory, File>>,
}

impl EventLog {
    /// Open an event log rooted at `dir`, creating the directory if needed
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created
    pub fn open(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            files: Mutex::new(HashMap::new()),
        })
    }

    /// The directory holding the category files
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Append a WARNING line to a category file
    pub fn warn(&self, category: LogCategory, message: &str) {
        self.append(category, LogLevel::Warning, message);
    }

    /// Append an ERROR line to a category file
    pub fn error(&self, category: LogCategory, message: &str) {
        self.append(category, LogLevel::Error, message);
    }

    fn append(&self, category: LogCategory, level: LogLevel, message: &str) {
        let line = format!(
            "{} - {} - {}\n",
            Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            level.as_str(),
            message
        );

        let mut files = self.files.lock();
        let file = match files.entry(category) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let path = self.dir.join(category.file_name());
                match OpenOptions::new().create(true).append(true).open(&path) {
                    Ok(file) => entry.insert(file),
                    Err(err) => {
                        tracing::error!(
                            category = category.label(),
                            path = %path.display(),
                            error = %err,
                            "Failed to open event log file"
                        );
                        return;
                    }
                }
            }
        };

        if let Err(err) = file.write_all(line.as_bytes()) {
            tracing::error!(
                category = category.label(),
                error = %err,
                "Failed to append event log line"
            );
        }
    }
}
