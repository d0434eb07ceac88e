//! Summary report service
//!
//! Wraps the log-directory report generator for the admin surface. The CLI
//! path calls `parlor_common::generate_report` directly.

use std::time::Duration;

use parlor_common::logging::{generate_report, PerfTimer, SummaryReport};
use parlor_core::entities::User;
use tracing::{info, instrument};

use super::admin::require_admin;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Report builds slower than this are written to the performance log
const REPORT_SLOW_THRESHOLD: Duration = Duration::from_millis(1000);

/// Summary report service
pub struct ReportService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReportService<'a> {
    /// Create a new ReportService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Generate a summary report over the configured logs directory
    #[instrument(skip(self), fields(actor_id = actor.id))]
    pub async fn generate(&self, actor: &User) -> ServiceResult<SummaryReport> {
        require_admin(actor)?;
        let _timer = PerfTimer::new(self.ctx.event_log(), "error report", REPORT_SLOW_THRESHOLD);

        let report = generate_report(self.ctx.event_log().dir())
            .map_err(|e| ServiceError::internal(format!("report generation failed: {e}")))?;

        info!(path = %report.path.display(), "summary report generated");
        Ok(report)
    }
}
