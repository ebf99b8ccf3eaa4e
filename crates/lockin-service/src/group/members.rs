//! Membership management and invites.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use lockin_auth::rbac::GroupPermission;
use lockin_core::error::{AppError, ErrorKind};
use lockin_core::result::AppResult;
use lockin_database::connection::commit;
use lockin_database::repositories::{MemberRepository, NotificationRepository, ProfileRepository};
use lockin_database::DatabasePool;
use lockin_entity::group::{GroupMember, MemberRole};
use lockin_entity::notification::{CreateNotification, Notification, NotificationKind};

use super::access::GroupAccess;
use crate::context::RequestContext;

/// Request to add a member directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddMemberRequest {
    /// Profile to enroll.
    pub user_id: Uuid,
    /// Role to grant.
    pub role: MemberRole,
    /// Per-member target override.
    pub override_period_target_minutes: Option<i32>,
}

/// Request to update a membership.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateMemberRequest {
    /// New role.
    pub role: Option<MemberRole>,
    /// New override; `Some(None)` clears it.
    pub override_period_target_minutes: Option<Option<i32>>,
}

/// Manages group membership rows and invite notifications.
#[derive(Debug, Clone)]
pub struct MemberService {
    /// Database pool for transactions.
    db: DatabasePool,
    /// Member repository.
    members: Arc<MemberRepository>,
    /// Profile repository.
    profiles: Arc<ProfileRepository>,
    /// Notification repository.
    notifications: Arc<NotificationRepository>,
    /// Group access checks.
    access: Arc<GroupAccess>,
}

impl MemberService {
    /// Creates a new member service.
    pub fn new(
        db: DatabasePool,
        members: Arc<MemberRepository>,
        profiles: Arc<ProfileRepository>,
        notifications: Arc<NotificationRepository>,
        access: Arc<GroupAccess>,
    ) -> Self {
        Self {
            db,
            members,
            profiles,
            notifications,
            access,
        }
    }

    /// Lists a group's members. Members only.
    pub async fn list_members(
        &self,
        ctx: &RequestContext,
        group_id: Uuid,
    ) -> AppResult<Vec<GroupMember>> {
        self.access
            .require(ctx, group_id, GroupPermission::ViewGroup)
            .await?;
        self.members.find_by_group(group_id).await
    }

    /// Adds a member. Owner/admin only; a duplicate yields `AlreadyExists`.
    pub async fn add_member(
        &self,
        ctx: &RequestContext,
        group_id: Uuid,
        req: AddMemberRequest,
    ) -> AppResult<GroupMember> {
        self.access
            .require(ctx, group_id, GroupPermission::ManageMembers)
            .await?;
        check_assignable(req.role)?;
        check_override(req.override_period_target_minutes)?;

        self.profiles
            .find_by_id(req.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        let mut tx = self.db.begin().await?;
        let member = self
            .members
            .create(
                &mut tx,
                group_id,
                req.user_id,
                req.role,
                req.override_period_target_minutes,
            )
            .await
            .map_err(|e| {
                if e.is(ErrorKind::AlreadyExists) {
                    AppError::already_exists("User is already a member of this group")
                } else {
                    e
                }
            })?;
        commit(tx).await?;

        info!(
            group_id = %group_id,
            user_id = %req.user_id,
            role = %req.role,
            by = %ctx.user_id,
            "Member added"
        );
        Ok(member)
    }

    /// Changes a member's role or target override. Owner/admin only.
    pub async fn update_member(
        &self,
        ctx: &RequestContext,
        group_id: Uuid,
        membership_id: Uuid,
        req: UpdateMemberRequest,
    ) -> AppResult<GroupMember> {
        self.access
            .require(ctx, group_id, GroupPermission::ManageMembers)
            .await?;
        let membership = self.find_in_group(group_id, membership_id).await?;

        if let Some(role) = req.role {
            if membership.role == MemberRole::Owner && role != MemberRole::Owner {
                return Err(AppError::forbidden("The group owner's role cannot be changed"));
            }
            if role != membership.role {
                check_assignable(role)?;
            }
        }
        if let Some(override_minutes) = req.override_period_target_minutes {
            check_override(override_minutes)?;
        }

        let updated = self
            .members
            .update(membership_id, req.role, req.override_period_target_minutes)
            .await?
            .ok_or_else(|| AppError::not_found("Membership not found"))?;

        info!(
            group_id = %group_id,
            membership_id = %membership_id,
            by = %ctx.user_id,
            "Member updated"
        );
        Ok(updated)
    }

    /// Removes a member. Owner/admin may remove anyone but the owner; any
    /// member may remove themselves.
    pub async fn remove_member(
        &self,
        ctx: &RequestContext,
        group_id: Uuid,
        membership_id: Uuid,
    ) -> AppResult<()> {
        let group = self.access.load_group(group_id).await?;
        let membership = self.find_in_group(group.id, membership_id).await?;

        if membership.role == MemberRole::Owner {
            return Err(AppError::forbidden("The group owner cannot be removed"));
        }
        if membership.user_id != ctx.user_id {
            self.access
                .require(ctx, group_id, GroupPermission::ManageMembers)
                .await?;
        }

        if !self.members.delete(membership_id).await? {
            return Err(AppError::not_found("Membership not found"));
        }

        info!(
            group_id = %group_id,
            user_id = %membership.user_id,
            by = %ctx.user_id,
            "Member removed"
        );
        Ok(())
    }

    /// Sends a pending `group_invite` notification. Owner/admin only.
    pub async fn invite_member(
        &self,
        ctx: &RequestContext,
        group_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Notification> {
        let (group, _) = self
            .access
            .require(ctx, group_id, GroupPermission::InviteMembers)
            .await?;

        let recipient = self
            .profiles
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        let invite = CreateNotification {
            recipient_id: recipient.id,
            kind: NotificationKind::GroupInvite,
            title: Some(format!("{} invited you", ctx.label())),
            body: Some(format!("Join {} to lock in together", group.name)),
            group_id: Some(group.id),
        };

        let mut tx = self.db.begin().await?;
        let notification = self.notifications.create(&mut tx, &invite).await?;
        commit(tx).await?;

        info!(
            group_id = %group_id,
            recipient_id = %recipient.id,
            by = %ctx.user_id,
            "Invite sent"
        );
        Ok(notification)
    }

    async fn find_in_group(&self, group_id: Uuid, membership_id: Uuid) -> AppResult<GroupMember> {
        self.members
            .find_by_id(membership_id)
            .await?
            .filter(|m| m.group_id == group_id)
            .ok_or_else(|| AppError::not_found("Membership not found"))
    }
}

fn check_assignable(role: MemberRole) -> AppResult<()> {
    if role == MemberRole::Owner {
        return Err(AppError::validation("The owner role cannot be assigned"));
    }
    Ok(())
}

fn check_override(minutes: Option<i32>) -> AppResult<()> {
    match minutes {
        Some(m) if m <= 0 => Err(AppError::validation(
            "override_period_target_minutes must be positive",
        )),
        _ => Ok(()),
    }
}
