//! Notification inbox and invite responses.

pub mod service;

pub use service::{NotificationPage, NotificationService};
