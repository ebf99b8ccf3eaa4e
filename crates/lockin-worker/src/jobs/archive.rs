//! Expired group archive sweep.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use lockin_service::MaintenanceService;

use crate::executor::{JobContext, JobExecutionError, JobHandler};

/// Job type name of the sweep.
pub const ARCHIVE_EXPIRED_GROUPS: &str = "archive_expired_groups";

/// Archives groups whose end instant has passed.
#[derive(Debug)]
pub struct ArchiveExpiredGroupsJob {
    /// Maintenance service
    maintenance: Arc<MaintenanceService>,
}

impl ArchiveExpiredGroupsJob {
    /// Create a new archive job handler
    pub fn new(maintenance: Arc<MaintenanceService>) -> Self {
        Self { maintenance }
    }
}

#[async_trait]
impl JobHandler for ArchiveExpiredGroupsJob {
    fn job_type(&self) -> &str {
        ARCHIVE_EXPIRED_GROUPS
    }

    async fn execute(&self, ctx: &JobContext) -> Result<Value, JobExecutionError> {
        let archived = self
            .maintenance
            .archive_expired_groups(ctx.fired_at)
            .await?;

        Ok(serde_json::json!({
            "task": ARCHIVE_EXPIRED_GROUPS,
            "archived": archived,
        }))
    }
}
