//! Group lookup plus role check, shared by every group-scoped service.

use std::sync::Arc;

use uuid::Uuid;

use lockin_auth::rbac::{GroupPermission, RbacEnforcer};
use lockin_core::error::AppError;
use lockin_core::result::AppResult;
use lockin_database::repositories::{GroupRepository, MemberRepository};
use lockin_entity::group::{Group, GroupMember};

use crate::context::RequestContext;

/// Resolves a group and the caller's membership, then applies the RBAC table.
#[derive(Debug, Clone)]
pub struct GroupAccess {
    /// Group repository.
    groups: Arc<GroupRepository>,
    /// Member repository.
    members: Arc<MemberRepository>,
    /// RBAC enforcer.
    rbac: Arc<RbacEnforcer>,
}

impl GroupAccess {
    /// Creates a new access checker.
    pub fn new(
        groups: Arc<GroupRepository>,
        members: Arc<MemberRepository>,
        rbac: Arc<RbacEnforcer>,
    ) -> Self {
        Self {
            groups,
            members,
            rbac,
        }
    }

    /// Loads a group or fails with `GroupNotFound`.
    pub async fn load_group(&self, group_id: Uuid) -> AppResult<Group> {
        self.groups
            .find_by_id(group_id)
            .await?
            .ok_or_else(|| AppError::group_not_found(group_id))
    }

    /// Loads a group and requires the caller's role in it to grant `permission`.
    pub async fn require(
        &self,
        ctx: &RequestContext,
        group_id: Uuid,
        permission: GroupPermission,
    ) -> AppResult<(Group, GroupMember)> {
        let group = self.load_group(group_id).await?;
        let membership = self.members.find(group_id, ctx.user_id).await?;

        self.rbac
            .require_group(membership.as_ref().map(|m| m.role), permission)?;

        let membership =
            membership.ok_or_else(|| AppError::forbidden("Not a member of this group"))?;
        Ok((group, membership))
    }
}
