//! The caller's own profile.

pub mod service;

pub use service::ProfileService;
