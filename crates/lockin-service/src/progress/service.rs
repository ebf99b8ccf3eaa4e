//! Progress queries.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use lockin_auth::rbac::GroupPermission;
use lockin_core::error::AppError;
use lockin_core::result::AppResult;
use lockin_database::connection::commit;
use lockin_database::repositories::{GroupRepository, MemberRepository, TimeLogRepository};
use lockin_database::DatabasePool;
use lockin_entity::progress::ProgressRow;

use super::aggregator::aggregate;
use super::window::current_window;
use crate::context::RequestContext;
use crate::group::GroupAccess;

/// Computes per-member progress for a group's current goal period.
#[derive(Debug, Clone)]
pub struct ProgressService {
    /// Database pool for snapshot reads.
    db: DatabasePool,
    /// Group repository.
    groups: Arc<GroupRepository>,
    /// Member repository.
    members: Arc<MemberRepository>,
    /// Time log repository.
    time_logs: Arc<TimeLogRepository>,
    /// Group access checks.
    access: Arc<GroupAccess>,
}

impl ProgressService {
    /// Creates a new progress service.
    pub fn new(
        db: DatabasePool,
        groups: Arc<GroupRepository>,
        members: Arc<MemberRepository>,
        time_logs: Arc<TimeLogRepository>,
        access: Arc<GroupAccess>,
    ) -> Self {
        Self {
            db,
            groups,
            members,
            time_logs,
            access,
        }
    }

    /// Progress as seen by a member of the group.
    pub async fn group_progress(
        &self,
        ctx: &RequestContext,
        group_id: Uuid,
    ) -> AppResult<Vec<ProgressRow>> {
        self.access
            .require(ctx, group_id, GroupPermission::ViewProgress)
            .await?;
        self.fetch_progress(group_id, ctx.request_time).await
    }

    /// Progress for the period containing `now`.
    ///
    /// All reads share one snapshot so a concurrent log append is either fully
    /// counted or not at all.
    pub async fn fetch_progress(
        &self,
        group_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<ProgressRow>> {
        let mut tx = self.db.begin_snapshot().await?;

        let group = self
            .groups
            .find_by_id_in(&mut tx, group_id)
            .await?
            .ok_or_else(|| AppError::group_not_found(group_id))?;

        let members = self.members.find_by_group_in(&mut tx, group_id).await?;
        let logged_users: HashSet<Uuid> = self
            .time_logs
            .users_with_logs_in_group(&mut tx, group_id)
            .await?
            .into_iter()
            .collect();

        if members.is_empty() || logged_users.is_empty() {
            commit(tx).await?;
            return Ok(Vec::new());
        }

        let window = current_window(group.period, group.tz()?, group.start_at, now)?;
        let intervals = self
            .time_logs
            .intervals_in_window(&mut tx, group_id, window.start, window.end)
            .await?;
        commit(tx).await?;

        let rows = aggregate(&group, &members, &logged_users, &intervals, window);
        debug!(
            group_id = %group_id,
            period_start = %window.start,
            rows = rows.len(),
            "Progress computed"
        );
        Ok(rows)
    }
}
