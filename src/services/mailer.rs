//! Outbound mail dispatch.
//!
//! Services hand finished `EmailJob`s to a `Mailer`; the production
//! implementation enqueues them on the apalis Postgres queue drained by
//! the `worker` command.

use apalis::prelude::Storage;
use apalis_sql::postgres::PostgresStorage;
use async_trait::async_trait;

use crate::errors::{AppError, AppResult};
use crate::jobs::EmailJob;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Mail dispatch trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Queue an email for delivery
    async fn send(&self, job: EmailJob) -> AppResult<()>;
}

/// Mailer backed by the apalis job queue.
pub struct JobQueueMailer {
    storage: PostgresStorage<EmailJob>,
}

impl JobQueueMailer {
    /// Create a new queue-backed mailer
    pub fn new(storage: PostgresStorage<EmailJob>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl Mailer for JobQueueMailer {
    async fn send(&self, job: EmailJob) -> AppResult<()> {
        // PostgresStorage clones share the underlying pool
        let mut storage = self.storage.clone();
        storage
            .push(job)
            .await
            .map_err(|e| AppError::internal(format!("Failed to enqueue email job: {}", e)))?;
        Ok(())
    }
}
