//! Tracing and logging setup
//!
//! Configures the `tracing` subscriber with environment-based filtering.
//! This is the structured application log; the per-category error files are
//! handled separately by [`crate::logging::EventLog`].

use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Filter applied when `RUST_LOG` is unset
const DEFAULT_FILTER: &str = "info";

/// Try to initialize the tracing subscriber
///
/// Uses `RUST_LOG` for filtering if set. Returns an error instead of
/// panicking when a subscriber is already installed, so tests can call it
/// repeatedly.
pub fn try_init_tracing() -> Result<(), TracingError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = fmt::layer().with_file(true).with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|_| TracingError::AlreadyInitialized)
}

/// Tracing initialization errors
#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    #[error("Tracing subscriber already initialized")]
    AlreadyInitialized,
}
