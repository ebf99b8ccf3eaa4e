//! # lockin-entity
//!
//! Domain entity models for LockIN. Every struct in this crate represents
//! a database table row or a domain value object. All entities derive
//! `Debug`, `Clone`, `Serialize`, `Deserialize`, and database entities
//! additionally derive `sqlx::FromRow`.

pub mod group;
pub mod notification;
pub mod profile;
pub mod progress;
pub mod session;
