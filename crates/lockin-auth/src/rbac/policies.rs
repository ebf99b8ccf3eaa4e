//! Role-to-permission mapping definitions.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use lockin_entity::group::MemberRole;
use lockin_entity::session::ParticipantRole;

/// An action on a group, granted by a member role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupPermission {
    /// Read the group and its member list.
    ViewGroup,
    /// Read the current-period progress rows.
    ViewProgress,
    /// Create sessions scoped to the group.
    CreateSession,
    /// Add, update and remove members.
    ManageMembers,
    /// Send group invites.
    InviteMembers,
    /// Archive the group.
    ArchiveGroup,
}

/// An action on a session, granted by a participant role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPermission {
    /// Transition the session status.
    ChangeStatus,
    /// Append time logs on behalf of another user.
    LogForOthers,
}

/// Defines the mapping from each role to its set of allowed permissions.
#[derive(Debug, Clone)]
pub struct RbacPolicies {
    /// Member role → group permissions.
    group: HashMap<MemberRole, HashSet<GroupPermission>>,
    /// Participant role → session permissions.
    session: HashMap<ParticipantRole, HashSet<SessionPermission>>,
}

impl RbacPolicies {
    /// Creates the default policy set.
    pub fn new() -> Self {
        use GroupPermission::*;
        use SessionPermission::*;

        let mut group = HashMap::new();

        // Member: read and participate
        let member: HashSet<_> = [ViewGroup, ViewProgress, CreateSession].into_iter().collect();

        // Admin: member + membership management
        let mut admin = member.clone();
        admin.extend([ManageMembers, InviteMembers]);

        // Owner: everything
        let mut owner = admin.clone();
        owner.insert(ArchiveGroup);

        group.insert(MemberRole::Member, member);
        group.insert(MemberRole::Admin, admin);
        group.insert(MemberRole::Owner, owner);

        let mut session = HashMap::new();
        // Participants act only on their own rows
        session.insert(ParticipantRole::Participant, HashSet::new());
        session.insert(
            ParticipantRole::Host,
            [ChangeStatus, LogForOthers].into_iter().collect(),
        );

        Self { group, session }
    }

    /// Checks whether a member role grants a group permission.
    pub fn group_allows(&self, role: MemberRole, permission: GroupPermission) -> bool {
        self.group
            .get(&role)
            .is_some_and(|perms| perms.contains(&permission))
    }

    /// Checks whether a participant role grants a session permission.
    pub fn session_allows(&self, role: ParticipantRole, permission: SessionPermission) -> bool {
        self.session
            .get(&role)
            .is_some_and(|perms| perms.contains(&permission))
    }
}

impl Default for RbacPolicies {
    fn default() -> Self {
        Self::new()
    }
}
