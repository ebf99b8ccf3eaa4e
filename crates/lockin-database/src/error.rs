//! Mapping of sqlx errors onto [`AppError`] kinds.

use sqlx::error::ErrorKind as SqlxErrorKind;

use lockin_core::error::{AppError, ErrorKind};

/// Map a sqlx error into an [`AppError`], classifying constraint violations.
///
/// Unique violations become `AlreadyExists`, check violations become
/// `Validation` and foreign-key violations become `NotFound`. Everything
/// else is a `Database` error carrying `context`.
pub fn map_db_error(err: sqlx::Error, context: &str) -> AppError {
    let kind = match &err {
        sqlx::Error::Database(db_err) => match db_err.kind() {
            SqlxErrorKind::UniqueViolation => ErrorKind::AlreadyExists,
            SqlxErrorKind::CheckViolation => ErrorKind::Validation,
            SqlxErrorKind::ForeignKeyViolation => ErrorKind::NotFound,
            _ => ErrorKind::Database,
        },
        _ => ErrorKind::Database,
    };

    let message = match (&err, kind) {
        (sqlx::Error::Database(db_err), ErrorKind::AlreadyExists) => {
            format!("{context}: duplicate ({})", db_err.constraint().unwrap_or("unique"))
        }
        (sqlx::Error::Database(db_err), ErrorKind::Validation) => {
            format!("{context}: constraint {} violated", db_err.constraint().unwrap_or("check"))
        }
        (_, ErrorKind::NotFound) => format!("{context}: referenced row does not exist"),
        _ => context.to_string(),
    };

    AppError::with_source(kind, message, err)
}
