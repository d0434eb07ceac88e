//! # parlor-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

pub use services::{
    AdminService, AuthService, ChatService, MonitorService, ReportService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, REFRESH_SECONDS,
};
