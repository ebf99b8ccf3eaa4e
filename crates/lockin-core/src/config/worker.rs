//! Background worker configuration.

use serde::{Deserialize, Serialize};

/// Scheduled maintenance worker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Whether the worker is enabled.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Six-field cron expression for the expired-group archive sweep.
    #[serde(default = "default_archive_schedule")]
    pub archive_schedule: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            archive_schedule: default_archive_schedule(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_archive_schedule() -> String {
    "0 0 * * * *".to_string()
}
