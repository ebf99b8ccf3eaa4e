//! Keyset pagination types for list endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default page size.
const DEFAULT_LIMIT: u32 = 20;
/// Maximum page size.
const MAX_LIMIT: u32 = 100;

/// Position after which the next page starts.
///
/// Lists are ordered by `(created_at DESC, id DESC)`, so the cursor is the
/// last row of the previous page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    /// Creation time of the last row already seen.
    pub created_at: DateTime<Utc>,
    /// Identifier of the last row already seen.
    pub id: Uuid,
}

/// Request parameters for keyset-paginated queries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CursorRequest {
    /// Continue after this row, or start from the newest when absent.
    pub after: Option<Cursor>,
    /// Number of rows to return.
    pub limit: u32,
}

impl CursorRequest {
    /// Create a new cursor request, clamping the limit to `1..=100`.
    pub fn new(after: Option<Cursor>, limit: u32) -> Self {
        Self {
            after,
            limit: limit.clamp(1, MAX_LIMIT),
        }
    }

    /// Build a request from the two optional cursor halves of a query string.
    ///
    /// A cursor is only honoured when both halves are present.
    pub fn from_parts(
        created_at: Option<DateTime<Utc>>,
        id: Option<Uuid>,
        limit: Option<u32>,
    ) -> Self {
        let after = match (created_at, id) {
            (Some(created_at), Some(id)) => Some(Cursor { created_at, id }),
            _ => None,
        };
        Self::new(after, limit.unwrap_or(DEFAULT_LIMIT))
    }

    /// Return the SQL `LIMIT` value.
    pub fn sql_limit(&self) -> i64 {
        i64::from(self.limit)
    }
}

impl Default for CursorRequest {
    fn default() -> Self {
        Self {
            after: None,
            limit: DEFAULT_LIMIT,
        }
    }
}
