//! Group and membership services.

pub mod access;
pub mod members;
pub mod service;

pub use access::GroupAccess;
pub use members::{AddMemberRequest, MemberService, UpdateMemberRequest};
pub use service::{CreateGroupRequest, GroupDetail, GroupService};
