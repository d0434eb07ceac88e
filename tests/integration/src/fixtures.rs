//! Test fixtures and data generators
//!
//! Provides reusable test data and response payload shapes for
//! integration tests.

use serde::Deserialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Password used for every fixture account
pub const TEST_PASSWORD: &str = "hunter22";

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// A username that is unique within the test process
pub fn unique_username(prefix: &str) -> String {
    format!("{prefix}{}", unique_suffix())
}

/// Message payload returned by the poll endpoint
#[derive(Debug, Deserialize)]
pub struct MessagePayload {
    pub username: String,
    pub content: String,
    pub timestamp: String,
}

/// Unread badge payload
#[derive(Debug, Deserialize)]
pub struct UnreadPayload {
    pub count: i64,
}

/// Acknowledgement payload from the send endpoint
#[derive(Debug, Deserialize)]
pub struct StatusPayload {
    pub status: String,
}

/// Health check payload
#[derive(Debug, Deserialize)]
pub struct HealthPayload {
    pub status: String,
    pub version: String,
}

/// Error envelope returned by the JSON endpoints
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}
