//! Role-based access control for groups and sessions.

pub mod enforcer;
pub mod policies;

pub use enforcer::RbacEnforcer;
pub use policies::{GroupPermission, RbacPolicies, SessionPermission};
