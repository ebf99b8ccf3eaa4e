//! # lockin-auth
//!
//! Authentication and authorization for LockIN.
//!
//! ## Modules
//!
//! - `jwt`: bearer token validation and claim extraction
//! - `identity`: maps a validated caller to a local profile, creating it on first sight
//! - `rbac`: closed group/session roles with explicit permission tables

pub mod identity;
pub mod jwt;
pub mod rbac;

pub use identity::{IdentityResolver, ResolvedIdentity};
pub use jwt::{IdentityClaims, JwtDecoder};
pub use rbac::{GroupPermission, RbacEnforcer, RbacPolicies, SessionPermission};
