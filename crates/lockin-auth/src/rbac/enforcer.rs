//! RBAC enforcement logic.

use lockin_core::error::AppError;
use lockin_entity::group::MemberRole;
use lockin_entity::session::ParticipantRole;

use super::policies::{GroupPermission, RbacPolicies, SessionPermission};

/// Enforces role-based access control for group and session operations.
#[derive(Debug, Clone)]
pub struct RbacEnforcer {
    /// The policy configuration.
    policies: RbacPolicies,
}

impl RbacEnforcer {
    /// Creates a new enforcer with the default policy set.
    pub fn new() -> Self {
        Self {
            policies: RbacPolicies::new(),
        }
    }

    /// Requires `role` to grant `permission` on a group.
    ///
    /// A caller with no membership at all is always rejected.
    pub fn require_group(
        &self,
        role: Option<MemberRole>,
        permission: GroupPermission,
    ) -> Result<(), AppError> {
        match role {
            Some(role) if self.policies.group_allows(role, permission) => Ok(()),
            Some(role) => Err(AppError::forbidden(format!(
                "Role '{role}' does not have permission '{permission:?}'"
            ))),
            None => Err(AppError::forbidden("Not a member of this group")),
        }
    }

    /// Requires `role` to grant `permission` on a session.
    pub fn require_session(
        &self,
        role: ParticipantRole,
        permission: SessionPermission,
    ) -> Result<(), AppError> {
        if self.policies.session_allows(role, permission) {
            Ok(())
        } else {
            Err(AppError::forbidden(format!(
                "Role '{role}' does not have permission '{permission:?}'"
            )))
        }
    }

    /// Returns a reference to the underlying policies.
    pub fn policies(&self) -> &RbacPolicies {
        &self.policies
    }
}

impl Default for RbacEnforcer {
    fn default() -> Self {
        Self::new()
    }
}
