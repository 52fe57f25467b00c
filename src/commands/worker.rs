//! Worker command - Background email worker.
//!
//! Connects to the database and drains the email job queue populated by
//! the HTTP server. Runs until Ctrl+C.

use apalis::prelude::*;
use apalis_sql::postgres::PostgresStorage;
use apalis_sql::sqlx::postgres::PgPoolOptions;

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::jobs::{email_job_handler, EmailJob};

/// Execute the worker command
pub async fn execute(config: Config) -> AppResult<()> {
    tracing::info!("Connecting to database for job worker...");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await
        .map_err(|e| AppError::internal(format!("Failed to connect to database: {}", e)))?;

    // Create the apalis tables on first run
    PostgresStorage::setup(&pool)
        .await
        .map_err(|e| AppError::internal(format!("Failed to setup job storage: {}", e)))?;

    let email_storage: PostgresStorage<EmailJob> = PostgresStorage::new(pool);

    tracing::info!("Email worker started. Press Ctrl+C to stop.");

    let worker = WorkerBuilder::new("email-worker")
        .backend(email_storage)
        .build_fn(email_job_handler);

    let monitor = Monitor::new().register(worker);

    tokio::select! {
        result = monitor.run() => {
            if let Err(e) = result {
                tracing::error!("Worker error: {}", e);
                return Err(AppError::internal(format!("Worker failed: {}", e)));
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received shutdown signal, stopping worker...");
        }
    }

    tracing::info!("Email worker stopped.");
    Ok(())
}
