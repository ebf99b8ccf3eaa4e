//! Progress Aggregator.
//!
//! Folds a group's time logs into per-member summaries for the current goal
//! period. Recomputed on every query from committed rows only.

pub mod aggregator;
pub mod service;
pub mod window;

pub use aggregator::{aggregate, clipped_duration};
pub use service::ProgressService;
pub use window::{PeriodWindow, current_window};
