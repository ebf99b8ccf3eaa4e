//! Group expiry sweep.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use lockin_core::result::AppResult;
use lockin_database::repositories::GroupRepository;

/// Housekeeping operations run by the worker or an operator.
#[derive(Debug, Clone)]
pub struct MaintenanceService {
    /// Group repository.
    groups: Arc<GroupRepository>,
}

impl MaintenanceService {
    /// Creates a new maintenance service.
    pub fn new(groups: Arc<GroupRepository>) -> Self {
        Self { groups }
    }

    /// Archives every non-archived group whose end instant is at or before
    /// `now`. Returns how many groups changed.
    pub async fn archive_expired_groups(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let archived = self.groups.archive_expired(now).await?;
        if archived > 0 {
            info!(archived, cutoff = %now, "Archived expired groups");
        }
        Ok(archived)
    }
}
