//! Group domain entities.

pub mod member;
pub mod model;
pub mod period;
pub mod status;

pub use member::{GroupMember, MemberRole};
pub use model::{CreateGroup, Group};
pub use period::GoalPeriod;
pub use status::GroupStatus;
