//! Built-in job handler implementations.

pub mod archive;

pub use archive::{ARCHIVE_EXPIRED_GROUPS, ArchiveExpiredGroupsJob};
