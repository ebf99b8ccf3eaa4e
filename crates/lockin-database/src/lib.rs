//! # lockin-database
//!
//! PostgreSQL connection management and concrete repository
//! implementations for all LockIN entities.
//!
//! Repositories hold a pool for standalone reads. Methods taking a
//! `&mut PgConnection` are meant to run inside a transaction opened by the
//! calling service.

pub mod connection;
pub mod error;
pub mod migration;
pub mod repositories;

pub use connection::{commit, DatabasePool, DbTransaction};
pub use error::map_db_error;
