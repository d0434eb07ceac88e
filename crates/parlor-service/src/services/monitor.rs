//! System monitor service
//!
//! Point-in-time resource usage for the admin monitor page, sampled with
//! sysinfo on each request.

use chrono::Utc;
use parlor_core::entities::User;
use std::path::Path;
use sysinfo::{Disks, ProcessesToUpdate, System};
use tracing::instrument;

use crate::dto::SystemStatus;

use super::admin::require_admin;
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Meta-refresh interval of the monitor page, in seconds
pub const REFRESH_SECONDS: u64 = 30;

/// System monitor service
pub struct MonitorService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MonitorService<'a> {
    /// Create a new MonitorService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Sample CPU, memory, disk, process count, and database file size
    ///
    /// CPU usage needs two refreshes separated by sysinfo's minimum update
    /// interval, so one snapshot takes roughly 200ms.
    #[instrument(skip(self), fields(actor_id = actor.id))]
    pub async fn snapshot(&self, actor: &User) -> ServiceResult<SystemStatus> {
        require_admin(actor)?;

        let mut system = System::new();

        system.refresh_cpu_usage();
        tokio::time::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL).await;
        system.refresh_cpu_usage();
        let cpu_percent = system.global_cpu_usage();

        system.refresh_memory();
        let memory_total_bytes = system.total_memory();
        let memory_used_bytes = system.used_memory();

        system.refresh_processes(ProcessesToUpdate::All, true);
        let process_count = system.processes().len();

        let (disk_total_bytes, disk_used_bytes) = root_disk_usage();

        let database_size_bytes = self
            .ctx
            .database_path()
            .and_then(|path| std::fs::metadata(path).ok())
            .map_or(0, |meta| meta.len());

        Ok(SystemStatus {
            cpu_percent,
            memory_used_bytes,
            memory_total_bytes,
            memory_percent: percent(memory_used_bytes, memory_total_bytes),
            disk_used_bytes,
            disk_total_bytes,
            disk_percent: percent(disk_used_bytes, disk_total_bytes),
            database_size_bytes,
            process_count,
            generated_at: Utc::now(),
        })
    }
}

/// Total and used space of the disk mounted at `/`, falling back to the
/// first listed disk
fn root_disk_usage() -> (u64, u64) {
    let disks = Disks::new_with_refreshed_list();
    let root = disks
        .list()
        .iter()
        .find(|disk| disk.mount_point() == Path::new("/"))
        .or_else(|| disks.list().first());

    match root {
        Some(disk) => {
            let total = disk.total_space();
            (total, total.saturating_sub(disk.available_space()))
        }
        None => (0, 0),
    }
}

#[allow(clippy::cast_precision_loss)]
fn percent(used: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        used as f64 / total as f64 * 100.0
    }
}
