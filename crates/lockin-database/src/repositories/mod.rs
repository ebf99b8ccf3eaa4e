//! Repository implementations for all LockIN entities.

pub mod group;
pub mod member;
pub mod notification;
pub mod profile;
pub mod session;
pub mod time_log;

pub use group::GroupRepository;
pub use member::MemberRepository;
pub use notification::NotificationRepository;
pub use profile::ProfileRepository;
pub use session::SessionRepository;
pub use time_log::TimeLogRepository;
