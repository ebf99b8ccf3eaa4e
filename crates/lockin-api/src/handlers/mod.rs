//! HTTP request handlers, one module per resource.

pub mod group;
pub mod health;
pub mod maintenance;
pub mod member;
pub mod notification;
pub mod profile;
pub mod session;
