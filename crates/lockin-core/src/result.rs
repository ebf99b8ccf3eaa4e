//! Convenience result type alias for LockIN.

use crate::error::AppError;

/// A specialized `Result` type for LockIN operations.
pub type AppResult<T> = Result<T, AppError>;
