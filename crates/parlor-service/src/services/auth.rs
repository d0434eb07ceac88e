//! Authentication service
//!
//! Handles user registration, login, token validation, self-service password
//! changes, and the CLI admin bootstrap.

use std::time::Duration;

use chrono::Utc;
use parlor_common::auth::{hash_password, validate_password_strength, verify_password};
use parlor_common::logging::{LogCategory, PerfTimer};
use parlor_common::AppError;
use parlor_core::entities::{NewUser, User};
use parlor_core::DomainError;
use tracing::{info, instrument, warn};

use crate::dto::{ChangePasswordRequest, LoginRequest, RegisterRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Logins slower than this are written to the performance log
const LOGIN_SLOW_THRESHOLD: Duration = Duration::from_millis(500);

/// Successful login: the refreshed user plus the session token
#[derive(Debug)]
pub struct LoginOutcome {
    pub user: User,
    pub token: String,
    pub ttl_seconds: i64,
}

/// Result of the admin bootstrap: the admin user and whether it was created
/// fresh (as opposed to promoting an existing account)
#[derive(Debug)]
pub struct BootstrapOutcome {
    pub user: User,
    pub created: bool,
}

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<User> {
        validate_username(&request.username)?;

        if request.password != request.confirm_password {
            return Err(ServiceError::validation("Passwords do not match"));
        }
        validate_password_strength(&request.password)?;

        if self
            .ctx
            .user_repo()
            .find_by_username(&request.username)
            .await?
            .is_some()
        {
            return Err(ServiceError::conflict("Username already exists"));
        }

        let password_hash = hash_password(&request.password)?;
        let user = self
            .ctx
            .user_repo()
            .create(&NewUser::new(request.username, password_hash))
            .await?;

        info!(user_id = user.id, "user registered");
        Ok(user)
    }

    /// Login with username and password
    ///
    /// Failure is reported uniformly as invalid credentials whether the
    /// username is unknown or the password is wrong.
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<LoginOutcome> {
        let _timer = PerfTimer::new(self.ctx.event_log(), "login", LOGIN_SLOW_THRESHOLD);

        let Some(mut user) = self
            .ctx
            .user_repo()
            .find_by_username(&request.username)
            .await?
        else {
            self.note_failed_login(&request.username);
            return Err(AppError::InvalidCredentials.into());
        };

        if !verify_password(&request.password, &user.password_hash)? {
            self.note_failed_login(&request.username);
            return Err(AppError::InvalidCredentials.into());
        }

        let now = Utc::now();
        self.ctx.user_repo().touch_last_login(user.id, now).await?;
        user.last_login_at = Some(now);

        let token = self.ctx.jwt_service().generate_token(&user)?;

        info!(user_id = user.id, "user logged in");
        Ok(LoginOutcome {
            user,
            token,
            ttl_seconds: self.ctx.jwt_service().ttl_seconds(),
        })
    }

    /// Validate a session token and load the current user
    #[instrument(skip(self, token))]
    pub async fn authenticate(&self, token: &str) -> ServiceResult<User> {
        let claims = self.ctx.jwt_service().validate_token(token)?;
        let user_id = claims.user_id()?;

        // A valid token for a vanished account is still an invalid session
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(ServiceError::App(AppError::InvalidToken))
    }

    /// Change the caller's own password
    #[instrument(skip(self, request), fields(user_id = user.id))]
    pub async fn change_password(
        &self,
        user: &User,
        request: ChangePasswordRequest,
    ) -> ServiceResult<()> {
        if request.current_password.is_empty()
            || request.new_password.is_empty()
            || request.confirm_password.is_empty()
        {
            return Err(ServiceError::validation("All fields are required"));
        }
        if request.new_password != request.confirm_password {
            return Err(ServiceError::validation("New passwords do not match"));
        }
        validate_password_strength(&request.new_password)?;

        if !verify_password(&request.current_password, &user.password_hash)? {
            warn!(username = %user.username, "password change rejected");
            self.ctx.event_log().warn(
                LogCategory::Security,
                &format!("Failed password change attempt for user: {}", user.username),
            );
            return Err(AppError::InvalidCredentials.into());
        }

        let password_hash = hash_password(&request.new_password)?;
        self.ctx
            .user_repo()
            .update_password(user.id, &password_hash)
            .await?;

        info!(user_id = user.id, "password changed");
        Ok(())
    }

    /// Create or refresh the admin account (CLI bootstrap path)
    ///
    /// An existing user with the given name is promoted to admin and gets the
    /// new password; otherwise a fresh admin account is created.
    #[instrument(skip(self, password))]
    pub async fn bootstrap_admin(
        &self,
        username: &str,
        password: &str,
    ) -> ServiceResult<BootstrapOutcome> {
        validate_password_strength(password)?;
        let password_hash = hash_password(password)?;

        if let Some(existing) = self.ctx.user_repo().find_by_username(username).await? {
            self.ctx
                .user_repo()
                .update_password(existing.id, &password_hash)
                .await?;
            self.ctx.user_repo().set_admin(existing.id, true).await?;

            let user = self
                .ctx
                .user_repo()
                .find_by_id(existing.id)
                .await?
                .ok_or_else(|| ServiceError::not_found("User", existing.id.to_string()))?;

            info!(user_id = user.id, "existing user promoted to admin");
            Ok(BootstrapOutcome {
                user,
                created: false,
            })
        } else {
            let user = self
                .ctx
                .user_repo()
                .create(&NewUser::admin(username.to_string(), password_hash))
                .await?;

            info!(user_id = user.id, "admin user created");
            Ok(BootstrapOutcome {
                user,
                created: true,
            })
        }
    }

    fn note_failed_login(&self, username: &str) {
        warn!(username, "login failed");
        self.ctx.event_log().warn(
            LogCategory::Security,
            &format!("Failed login attempt for username: {username}"),
        );
    }
}

/// Usernames are limited to ASCII letters, digits, and underscore
fn validate_username(username: &str) -> ServiceResult<()> {
    if username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        Ok(())
    } else {
        Err(DomainError::InvalidUsername(format!(
            "{username} (letters, digits, and underscore only)"
        ))
        .into())
    }
}
