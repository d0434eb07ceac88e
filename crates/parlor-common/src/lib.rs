//! # parlor-common
//!
//! Shared utilities including configuration, error handling, authentication,
//! telemetry, and the category event log.

pub mod auth;
pub mod config;
pub mod error;
pub mod logging;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{hash_password, validate_password_strength, verify_password, Claims, JwtService};
pub use config::{
    AdminConfig, AppConfig, AuthConfig, ConfigError, DatabaseConfig, LoggingConfig, ServerConfig,
};
pub use error::{AppError, AppResult, ErrorResponse};
pub use logging::{generate_report, EventLog, LogCategory, PerfTimer, SummaryReport};
pub use telemetry::{try_init_tracing, TracingError};
