//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod admin;
pub mod auth;
pub mod chat;
pub mod context;
pub mod error;
pub mod monitor;
pub mod report;

// Re-export all services for convenience
pub use admin::AdminService;
pub use auth::{AuthService, BootstrapOutcome, LoginOutcome};
pub use chat::ChatService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use monitor::{MonitorService, REFRESH_SECONDS};
pub use report::ReportService;
