//! Group listing, creation, cloning and archiving.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use lockin_auth::rbac::GroupPermission;
use lockin_core::error::AppError;
use lockin_core::result::AppResult;
use lockin_database::connection::commit;
use lockin_database::repositories::{GroupRepository, MemberRepository};
use lockin_database::DatabasePool;
use lockin_entity::group::{
    CreateGroup, GoalPeriod, Group, GroupMember, GroupStatus, MemberRole,
};

use super::access::GroupAccess;
use crate::context::RequestContext;

/// A group together with its member list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupDetail {
    /// The group row.
    #[serde(flatten)]
    pub group: Group,
    /// Members in join order.
    pub members: Vec<GroupMember>,
}

/// Request to create a new group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGroupRequest {
    /// Group name.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Start instant.
    pub start_at: DateTime<Utc>,
    /// End instant.
    pub end_at: DateTime<Utc>,
    /// IANA timezone name.
    pub timezone: String,
    /// Goal period kind.
    pub period: GoalPeriod,
    /// Minutes per period.
    pub period_target_minutes: i32,
}

/// Group CRUD service.
#[derive(Debug, Clone)]
pub struct GroupService {
    /// Database pool for transactions.
    db: DatabasePool,
    /// Group repository.
    groups: Arc<GroupRepository>,
    /// Member repository.
    members: Arc<MemberRepository>,
    /// Group access checks.
    access: Arc<GroupAccess>,
}

impl GroupService {
    /// Creates a new group service.
    pub fn new(
        db: DatabasePool,
        groups: Arc<GroupRepository>,
        members: Arc<MemberRepository>,
        access: Arc<GroupAccess>,
    ) -> Self {
        Self {
            db,
            groups,
            members,
            access,
        }
    }

    /// Lists groups the caller belongs to, newest first.
    pub async fn list_groups(
        &self,
        ctx: &RequestContext,
        status: Option<GroupStatus>,
    ) -> AppResult<Vec<Group>> {
        self.groups.find_for_user(ctx.user_id, status).await
    }

    /// Creates an `active` group and enrolls the caller as its owner.
    pub async fn create_group(
        &self,
        ctx: &RequestContext,
        req: CreateGroupRequest,
    ) -> AppResult<GroupDetail> {
        let data = CreateGroup {
            owner_id: ctx.user_id,
            name: req.name.trim().to_string(),
            description: req.description,
            start_at: req.start_at,
            end_at: req.end_at,
            timezone: req.timezone,
            period: req.period,
            period_target_minutes: req.period_target_minutes,
        };
        data.validate()?;

        let detail = self.insert_with_owner(&data).await?;

        info!(
            group_id = %detail.group.id,
            owner_id = %ctx.user_id,
            period = %detail.group.period,
            "Group created"
        );

        Ok(detail)
    }

    /// Returns a group with its members. Members only.
    pub async fn get_group(&self, ctx: &RequestContext, group_id: Uuid) -> AppResult<GroupDetail> {
        let (group, _) = self
            .access
            .require(ctx, group_id, GroupPermission::ViewGroup)
            .await?;
        let members = self.members.find_by_group(group_id).await?;
        Ok(GroupDetail { group, members })
    }

    /// Copies a group's settings into a new group owned by the caller,
    /// starting at the request instant and lasting as long as the source.
    pub async fn clone_group(
        &self,
        ctx: &RequestContext,
        group_id: Uuid,
    ) -> AppResult<GroupDetail> {
        let (source, _) = self
            .access
            .require(ctx, group_id, GroupPermission::ViewGroup)
            .await?;

        let start_at = ctx.request_time;
        let data = CreateGroup {
            owner_id: ctx.user_id,
            name: source.name.clone(),
            description: source.description.clone(),
            start_at,
            end_at: start_at + source.duration(),
            timezone: source.timezone.clone(),
            period: source.period,
            period_target_minutes: source.period_target_minutes,
        };

        let detail = self.insert_with_owner(&data).await?;

        info!(
            source_group_id = %source.id,
            group_id = %detail.group.id,
            owner_id = %ctx.user_id,
            "Group cloned"
        );

        Ok(detail)
    }

    /// Archives a group ahead of its end instant. Owner only.
    pub async fn archive_group(&self, ctx: &RequestContext, group_id: Uuid) -> AppResult<Group> {
        let (group, _) = self
            .access
            .require(ctx, group_id, GroupPermission::ArchiveGroup)
            .await?;

        if group.status == GroupStatus::Archived {
            return Ok(group);
        }

        let archived = self
            .groups
            .set_status(group_id, GroupStatus::Archived)
            .await?
            .ok_or_else(|| AppError::group_not_found(group_id))?;

        info!(group_id = %group_id, by = %ctx.user_id, "Group archived");
        Ok(archived)
    }

    async fn insert_with_owner(&self, data: &CreateGroup) -> AppResult<GroupDetail> {
        let mut tx = self.db.begin().await?;
        let group = self.groups.create(&mut tx, data).await?;
        let owner = self
            .members
            .create(&mut tx, group.id, data.owner_id, MemberRole::Owner, None)
            .await?;
        commit(tx).await?;

        Ok(GroupDetail {
            group,
            members: vec![owner],
        })
    }
}
