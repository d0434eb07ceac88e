//! Server setup and initialization
//!
//! Provides the application builder and server runner.

use std::sync::Arc;
use std::time::Duration;

use axum::middleware::from_fn_with_state;
use axum::Router;
use parlor_common::{AppConfig, AppError, EventLog, JwtService};
use parlor_db::{create_pool, run_migrations, SqliteMessageRepository, SqliteUserRepository};
use parlor_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::{self, apply_middleware};
use crate::routes::create_router;
use crate::state::AppState;
use crate::templates::build_environment;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config().server.request_timeout_secs);

    // The monitor runs inside the outer stack so the request ID header
    // is already set when it looks.
    let router = create_router().layer(from_fn_with_state(state.clone(), middleware::monitor));
    let router = apply_middleware(router, timeout);
    router.with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let event_log = Arc::new(
        EventLog::open(&config.logging.logs_dir)
            .map_err(|e| AppError::Config(format!("Failed to open log directory: {e}")))?,
    );

    if config.auth.uses_default_secret() {
        warn!("SECRET_KEY is the built-in default; set it before exposing this server");
    }

    // Create database pool and bring the schema up to date
    info!("Opening SQLite database...");
    let db_config = parlor_db::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    };
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("SQLite ready");

    // Create JWT service
    let jwt_service = Arc::new(JwtService::new(
        &config.auth.secret_key,
        config.auth.token_ttl_hours,
    ));

    // Create repositories
    let user_repo = Arc::new(SqliteUserRepository::new(pool.clone()));
    let message_repo = Arc::new(SqliteMessageRepository::new(pool.clone()));

    // Build service context
    let mut builder = ServiceContextBuilder::new()
        .pool(pool)
        .user_repo(user_repo)
        .message_repo(message_repo)
        .event_log(event_log)
        .jwt_service(jwt_service);
    if let Some(path) = config.database.file_path() {
        builder = builder.database_path(path);
    }
    let service_context = builder.build().map_err(|e| AppError::Config(e.to_string()))?;

    // Compile page templates
    let templates =
        build_environment().map_err(|e| AppError::Config(format!("Template error: {e}")))?;

    Ok(AppState::new(service_context, config, templates))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: &str) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {}", e)))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.server.address();

    // Create app state
    let state = create_app_state(config).await?;

    // Build application
    let app = create_app(state);

    // Run server
    run_server(app, &addr).await
}
