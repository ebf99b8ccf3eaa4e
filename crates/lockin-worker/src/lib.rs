//! Scheduled maintenance for LockIN.
//!
//! This crate provides:
//! - A job executor that dispatches a named job to its handler
//! - A cron scheduler that fires jobs on their configured schedules
//! - The built-in expired-group archive job

pub mod executor;
pub mod jobs;
pub mod scheduler;

pub use executor::{JobContext, JobExecutionError, JobExecutor, JobHandler};
pub use scheduler::CronScheduler;
