//! Core type definitions used across the LockIN workspace.

pub mod pagination;

pub use pagination::{Cursor, CursorRequest};
