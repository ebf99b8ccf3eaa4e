//! Job executor: dispatches jobs to registered handlers.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

use lockin_core::error::AppError;

/// Per-run metadata handed to a handler.
#[derive(Debug, Clone, Copy)]
pub struct JobContext {
    /// Identifier of this run, for log correlation.
    pub run_id: Uuid,
    /// When the run was fired.
    pub fired_at: DateTime<Utc>,
}

impl JobContext {
    /// A context fired now.
    pub fn now() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            fired_at: Utc::now(),
        }
    }
}

/// Trait for job handler implementations
#[async_trait]
pub trait JobHandler: Send + Sync + std::fmt::Debug {
    /// Get the job type this handler processes
    fn job_type(&self) -> &str;

    /// Run the job once
    async fn execute(&self, ctx: &JobContext) -> Result<Value, JobExecutionError>;
}

/// Error from job execution
#[derive(Debug, thiserror::Error)]
pub enum JobExecutionError {
    /// No handler for the requested type
    #[error("No handler registered for job type '{0}'")]
    UnknownJob(String),

    /// Failure reported by a handler
    #[error("Job failed: {0}")]
    Failed(#[from] AppError),
}

/// Dispatches jobs to the appropriate handler based on job type
#[derive(Debug, Default)]
pub struct JobExecutor {
    /// Registered job handlers by type
    handlers: HashMap<String, Arc<dyn JobHandler>>,
}

impl JobExecutor {
    /// Create a new job executor
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a job handler
    pub fn register(&mut self, handler: Arc<dyn JobHandler>) {
        let job_type = handler.job_type().to_string();
        tracing::info!(job_type = %job_type, "Registered job handler");
        self.handlers.insert(job_type, handler);
    }

    /// Run the handler for `job_type`
    pub async fn execute(
        &self,
        job_type: &str,
        ctx: &JobContext,
    ) -> Result<Value, JobExecutionError> {
        let handler = self
            .handlers
            .get(job_type)
            .ok_or_else(|| JobExecutionError::UnknownJob(job_type.to_string()))?;

        tracing::info!(job_type, run_id = %ctx.run_id, "Executing job");
        let started = Instant::now();
        let result = handler.execute(ctx).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match &result {
            Ok(output) => {
                tracing::info!(job_type, run_id = %ctx.run_id, elapsed_ms, %output, "Job completed");
            }
            Err(e) => {
                tracing::error!(job_type, run_id = %ctx.run_id, elapsed_ms, error = %e, "Job failed");
            }
        }
        result
    }

    /// Check if a handler is registered for a job type
    pub fn has_handler(&self, job_type: &str) -> bool {
        self.handlers.contains_key(job_type)
    }
}
