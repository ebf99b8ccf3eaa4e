//! Cursor pagination query parameters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use lockin_core::types::CursorRequest;

/// Query parameters for keyset-paginated endpoints.
///
/// The cursor is the `(created_at, id)` of the last row already seen; both
/// halves must be given for it to apply.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CursorParams {
    /// Creation time of the last row seen.
    pub after_created_at: Option<DateTime<Utc>>,
    /// Identifier of the last row seen.
    pub after_id: Option<Uuid>,
    /// Page size (default 20, max 100).
    pub limit: Option<u32>,
}

impl CursorParams {
    /// Converts to a `CursorRequest`.
    pub fn into_cursor_request(self) -> CursorRequest {
        CursorRequest::from_parts(self.after_created_at, self.after_id, self.limit)
    }
}
