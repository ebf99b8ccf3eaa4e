//! Session Lifecycle Manager.

pub mod service;
pub mod transition;

pub use service::{SessionDetail, SessionService};
pub use transition::{StatusChange, plan_transition};
