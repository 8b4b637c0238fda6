#![deny(unused)]
//! dagsweep - retention cleanup for workflow-run log files.
//!
//! Loads configuration, connects to the object store and runs one sweep:
//! list the log files, select the ones past their retention deadline, delete
//! them and report the outcome. Scheduling recurring sweeps is left to cron
//! or the surrounding orchestrator.

use std::collections::HashSet;
use std::sync::Arc;

use futures::StreamExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dagsweep_core::{AppConfig, LogCleaner, LogObject};
use dagsweep_store::S3LogStore;

/// Configure stdout logging with an env-driven filter.
fn configure_tracing(json_logs: bool) {
    let env_filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info,dagsweep=debug".into()),
    );

    let registry = tracing_subscriber::registry().with(env_filter);
    if json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    configure_tracing(config.log.json_logs);

    tracing::info!("Starting dagsweep v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        endpoint = %config.store.endpoint,
        bucket = %config.store.bucket,
        ttl_days = config.retention.ttl_days,
        "Connecting to object store"
    );

    let store = Arc::new(S3LogStore::connect(&config.store));
    let cleaner = LogCleaner::new(store);

    let dag_filter: Option<HashSet<String>> = config
        .retention
        .dags
        .map(|names| names.into_iter().collect());

    // A listing failure aborts the whole run; there are no partial-listing
    // semantics.
    let mut listing = cleaner.list_log_files(dag_filter);
    let mut log_files: Vec<LogObject> = Vec::new();
    while let Some(item) = listing.next().await {
        log_files.push(item?);
    }
    drop(listing);
    tracing::info!(total = log_files.len(), "Listed log files");

    let expired = cleaner.choose_expired_logs(log_files, config.retention.ttl_days);
    tracing::info!(expired = expired.len(), "Selected expired log files");

    let report = cleaner.delete_expired_logs(expired).await;
    tracing::info!(
        deleted = report.deleted.len(),
        failed = report.failed.len(),
        bytes_freed = report.bytes_freed,
        "Sweep complete"
    );

    if report.all_failed() {
        anyhow::bail!("all {} deletion attempts failed", report.failed.len());
    }

    Ok(())
}
