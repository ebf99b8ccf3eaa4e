//! Notification domain entities.

pub mod kind;
pub mod model;
pub mod status;

pub use kind::NotificationKind;
pub use model::{CreateNotification, Notification};
pub use status::NotificationStatus;
