//! Cron scheduler for periodic maintenance tasks.

use std::sync::Arc;

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};

use lockin_core::config::WorkerConfig;
use lockin_core::error::AppError;

use crate::executor::{JobContext, JobExecutor};
use crate::jobs::ARCHIVE_EXPIRED_GROUPS;

/// Cron-based scheduler for periodic background tasks
pub struct CronScheduler {
    /// The underlying job scheduler
    scheduler: JobScheduler,
    /// Executor the cron jobs dispatch into
    executor: Arc<JobExecutor>,
}

impl std::fmt::Debug for CronScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CronScheduler").finish()
    }
}

impl CronScheduler {
    /// Create a new cron scheduler
    pub async fn new(executor: Arc<JobExecutor>) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {e}")))?;

        Ok(Self {
            scheduler,
            executor,
        })
    }

    /// Register the configured scheduled tasks
    pub async fn register_default_tasks(&self, config: &WorkerConfig) -> Result<(), AppError> {
        self.register(ARCHIVE_EXPIRED_GROUPS, &config.archive_schedule)
            .await?;

        tracing::info!("All scheduled tasks registered");
        Ok(())
    }

    /// Fire `job_type` on a six-field cron `schedule`
    pub async fn register(&self, job_type: &str, schedule: &str) -> Result<(), AppError> {
        let job = build_job(Arc::clone(&self.executor), job_type, schedule)?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| AppError::internal(format!("Failed to add {job_type} schedule: {e}")))?;

        tracing::info!(job_type, schedule, "Registered scheduled task");
        Ok(())
    }

    /// Start the scheduler
    pub async fn start(&self) -> Result<(), AppError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {e}")))?;

        tracing::info!("Cron scheduler started");
        Ok(())
    }

    /// Shutdown the scheduler
    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {e}")))?;

        tracing::info!("Cron scheduler shut down");
        Ok(())
    }
}

fn build_job(
    executor: Arc<JobExecutor>,
    job_type: &str,
    schedule: &str,
) -> Result<CronJob, AppError> {
    let name = job_type.to_string();
    CronJob::new_async(schedule, move |_uuid, _lock| {
        let executor = Arc::clone(&executor);
        let name = name.clone();
        Box::pin(async move {
            // Failures are logged by the executor; the next tick retries.
            let _ = executor.execute(&name, &JobContext::now()).await;
        })
    })
    .map_err(|e| {
        AppError::configuration(format!("Invalid cron schedule '{schedule}' for {job_type}: {e}"))
    })
}
