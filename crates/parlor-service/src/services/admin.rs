//! Admin service
//!
//! Dashboard aggregates and user management. Every operation checks the
//! acting user's admin flag even though the web layer gates the routes.

use std::time::Duration;

use chrono::{DateTime, Timelike, Utc};
use parlor_common::auth::{hash_password, validate_password_strength};
use parlor_common::logging::PerfTimer;
use parlor_core::entities::{HourlyCount, User};
use parlor_core::DomainError;
use tracing::{info, instrument};

use crate::dto::{DashboardStats, HourlyBucketResponse, TopAuthorResponse, UserRow};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Rows in the dashboard's most-active-users table
pub const TOP_AUTHOR_LIMIT: i64 = 5;

/// Window for the recent-activity aggregates
const STATS_WINDOW_HOURS: i64 = 24;

/// Dashboard builds slower than this are written to the performance log
const DASHBOARD_SLOW_THRESHOLD: Duration = Duration::from_millis(1000);

/// Admin service
pub struct AdminService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AdminService<'a> {
    /// Create a new AdminService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Aggregate statistics for the dashboard page
    #[instrument(skip(self), fields(actor_id = actor.id))]
    pub async fn dashboard(&self, actor: &User) -> ServiceResult<DashboardStats> {
        require_admin(actor)?;
        let _timer = PerfTimer::new(
            self.ctx.event_log(),
            "admin dashboard",
            DASHBOARD_SLOW_THRESHOLD,
        );

        let since = Utc::now() - chrono::Duration::hours(STATS_WINDOW_HOURS);

        let user_count = self.ctx.user_repo().count().await?;
        let message_count = self.ctx.message_repo().count().await?;
        let messages_last_24h = self.ctx.message_repo().count_since(since).await?;
        let top_authors = self
            .ctx
            .message_repo()
            .top_authors(TOP_AUTHOR_LIMIT)
            .await?;
        let stamps = self.ctx.message_repo().created_since(since).await?;

        let buckets = hourly_histogram(&stamps);
        let hourly_max = buckets.iter().map(|b| b.count).max().unwrap_or(0).max(1);
        let hourly = buckets.into_iter().map(HourlyBucketResponse::from).collect();

        Ok(DashboardStats {
            user_count,
            message_count,
            messages_last_24h,
            top_authors: top_authors.iter().map(TopAuthorResponse::from).collect(),
            hourly,
            hourly_max,
        })
    }

    /// All users, id ascending, for the user management table
    #[instrument(skip(self), fields(actor_id = actor.id))]
    pub async fn list_users(&self, actor: &User) -> ServiceResult<Vec<UserRow>> {
        require_admin(actor)?;
        let users = self.ctx.user_repo().list_all().await?;
        Ok(users.iter().map(UserRow::from).collect())
    }

    /// Flip the target's admin flag; toggling twice restores the original
    ///
    /// Admins cannot toggle their own flag, so the instance always keeps at
    /// least the acting admin.
    #[instrument(skip(self), fields(actor_id = actor.id))]
    pub async fn toggle_admin(&self, actor: &User, target_id: i64) -> ServiceResult<User> {
        require_admin(actor)?;
        if actor.id == target_id {
            return Err(DomainError::CannotModifySelf.into());
        }

        let mut target = self
            .ctx
            .user_repo()
            .find_by_id(target_id)
            .await?
            .ok_or(DomainError::UserNotFound(target_id))?;

        target.is_admin = !target.is_admin;
        self.ctx
            .user_repo()
            .set_admin(target_id, target.is_admin)
            .await?;

        info!(target_id, is_admin = target.is_admin, "admin flag toggled");
        Ok(target)
    }

    /// Replace the target's password with a fresh hash
    #[instrument(skip(self, new_password), fields(actor_id = actor.id))]
    pub async fn reset_password(
        &self,
        actor: &User,
        target_id: i64,
        new_password: &str,
    ) -> ServiceResult<()> {
        require_admin(actor)?;
        validate_password_strength(new_password)?;

        let target = self
            .ctx
            .user_repo()
            .find_by_id(target_id)
            .await?
            .ok_or(DomainError::UserNotFound(target_id))?;

        let password_hash = hash_password(new_password)?;
        self.ctx
            .user_repo()
            .update_password(target.id, &password_hash)
            .await?;

        info!(target_id, "password reset by admin");
        Ok(())
    }
}

/// Reject non-admin actors
pub(crate) fn require_admin(actor: &User) -> ServiceResult<()> {
    if actor.is_admin {
        Ok(())
    } else {
        Err(DomainError::NotAdmin.into())
    }
}

/// Bucket timestamps by hour of day (UTC)
fn hourly_histogram(stamps: &[DateTime<Utc>]) -> Vec<HourlyCount> {
    let mut counts = [0i64; 24];
    for stamp in stamps {
        counts[stamp.hour() as usize] += 1;
    }
    counts
        .iter()
        .enumerate()
        .map(|(hour, &count)| HourlyCount::new(hour as u32, count))
        .collect()
}
