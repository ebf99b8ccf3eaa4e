//! Response DTOs.

use serde::{Deserialize, Serialize};

use lockin_entity::session::TimeLog;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Liveness response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `ok` when the process answers.
    pub status: String,
    /// Crate version.
    pub version: String,
}

/// Readiness response with dependency checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedHealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// `connected` or `unavailable`.
    pub database: String,
}

/// Result of an archive sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveSweepResponse {
    /// Number of groups archived.
    pub archived: u64,
}

/// Acknowledgement without a payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
}

/// Acknowledgement of an appended time log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeLogResponse {
    /// Always `logged`.
    pub status: String,
    /// The stored log.
    pub time_log: TimeLog,
}
