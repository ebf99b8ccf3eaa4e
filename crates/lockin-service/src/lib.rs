//! # lockin-service
//!
//! Business logic service layer for LockIN. Each service orchestrates
//! repositories and the RBAC tables to implement one family of use cases.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references. Every mutating operation
//! runs in a single database transaction.

pub mod context;
pub mod group;
pub mod maintenance;
pub mod notification;
pub mod profile;
pub mod progress;
pub mod session;

pub use context::RequestContext;
pub use group::{GroupAccess, GroupService, MemberService};
pub use maintenance::MaintenanceService;
pub use notification::NotificationService;
pub use profile::ProfileService;
pub use progress::ProgressService;
pub use session::SessionService;
