//! Application state
//!
//! Holds the shared state for the Axum application including
//! the service context, configuration, and the template engine.

use std::sync::Arc;

use minijinja::Environment;
use parlor_common::{AppConfig, EventLog, JwtService};
use parlor_service::ServiceContext;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Service context containing all dependencies
    service_context: Arc<ServiceContext>,
    /// Application configuration
    config: Arc<AppConfig>,
    /// Compiled page templates
    templates: Arc<Environment<'static>>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(
        service_context: ServiceContext,
        config: AppConfig,
        templates: Environment<'static>,
    ) -> Self {
        Self {
            service_context: Arc::new(service_context),
            config: Arc::new(config),
            templates: Arc::new(templates),
        }
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get the template engine
    pub fn templates(&self) -> &Environment<'static> {
        &self.templates
    }

    /// Get the JWT service from the service context
    pub fn jwt_service(&self) -> &JwtService {
        self.service_context.jwt_service()
    }

    /// Get the event log from the service context
    pub fn event_log(&self) -> &EventLog {
        self.service_context.event_log()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &"ServiceContext")
            .field("config", &"AppConfig")
            .field("templates", &"Environment")
            .finish()
    }
}
