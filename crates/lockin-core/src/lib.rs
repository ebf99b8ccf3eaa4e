//! # lockin-core
//!
//! Core crate for LockIN. Contains configuration schemas, the unified
//! error system, and small shared types such as cursor pagination.
//!
//! This crate has **no** internal dependencies on other LockIN crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
