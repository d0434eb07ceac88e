//! Application configuration structs
//!
//! Loads configuration from environment variables. Every setting carries a
//! default suitable for a single-node development deployment.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// The shipped fallback secret. Startup warns when it is still in use.
pub const DEFAULT_SECRET_KEY: &str = "your-secret-key-change-in-production";

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
    pub admin: AdminConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// The on-disk SQLite file behind the URL, if any.
    ///
    /// Returns `None` for in-memory databases, where there is no file whose
    /// size the monitor page could report.
    #[must_use]
    pub fn file_path(&self) -> Option<PathBuf> {
        let rest = self
            .url
            .strip_prefix("sqlite://")
            .or_else(|| self.url.strip_prefix("sqlite:"))?;
        let path = rest.split('?').next().unwrap_or(rest);
        if path.is_empty() || path == ":memory:" {
            return None;
        }
        Some(PathBuf::from(path))
    }
}

/// Session token configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub secret_key: String,
    pub token_ttl_hours: i64,
}

impl AuthConfig {
    /// Whether the shipped fallback secret is still in use
    #[must_use]
    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_SECRET_KEY
    }
}

/// Event log configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub logs_dir: PathBuf,
    pub slow_request_ms: u64,
}

/// Admin bootstrap credentials for the `create-admin` command
#[derive(Debug, Clone)]
pub struct AdminConfig {
    pub username: String,
    pub password: String,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_database_url() -> String {
    "sqlite://parlor.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_token_ttl_hours() -> i64 {
    24
}

fn default_logs_dir() -> PathBuf {
    PathBuf::from("logs")
}

fn default_slow_request_ms() -> u64 {
    1000
}

fn default_admin_username() -> String {
    "admin".to_string()
}

fn default_admin_password() -> String {
    "admin_password".to_string()
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a set variable holds an unparseable value
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| default_host()),
                port: parse_var("PORT")?.unwrap_or_else(default_port),
                request_timeout_secs: parse_var("REQUEST_TIMEOUT_SECS")?
                    .unwrap_or_else(default_request_timeout_secs),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").unwrap_or_else(|_| default_database_url()),
                max_connections: parse_var("DATABASE_MAX_CONNECTIONS")?
                    .unwrap_or_else(default_max_connections),
            },
            auth: AuthConfig {
                secret_key: env::var("SECRET_KEY")
                    .unwrap_or_else(|_| DEFAULT_SECRET_KEY.to_string()),
                token_ttl_hours: parse_var("TOKEN_TTL_HOURS")?
                    .unwrap_or_else(default_token_ttl_hours),
            },
            logging: LoggingConfig {
                logs_dir: env::var("LOGS_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| default_logs_dir()),
                slow_request_ms: parse_var("SLOW_REQUEST_MS")?
                    .unwrap_or_else(default_slow_request_ms),
            },
            admin: AdminConfig {
                username: env::var("ADMIN_USERNAME").unwrap_or_else(|_| default_admin_username()),
                password: env::var("ADMIN_PASSWORD").unwrap_or_else(|_| default_admin_password()),
            },
        })
    }
}

/// Parse an optional environment variable, erroring only on unparseable values
fn parse_var<T: FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue(name, raw)),
        Err(_) => Ok(None),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
