//! Data transfer objects for web requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for form and JSON inputs
//! - Response DTOs for JSON endpoints and template contexts
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

// Re-export commonly used request types
pub use requests::{
    ChangePasswordRequest, LoginRequest, PollQuery, RegisterRequest, ResetPasswordForm,
    SendMessageRequest,
};

// Re-export commonly used response types
pub use responses::{
    DashboardStats, HealthResponse, HourlyBucketResponse, MessageResponse, SendResponse,
    SystemStatus, TopAuthorResponse, UnreadResponse, UserRow,
};
