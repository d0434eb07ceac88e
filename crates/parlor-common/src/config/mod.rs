//! Configuration structs

mod app_config;

pub use app_config::{
    AdminConfig, AppConfig, AuthConfig, ConfigError, DatabaseConfig, LoggingConfig, ServerConfig,
};
