//! Log cleanup service over an object store backend.

use std::collections::HashSet;
use std::sync::Arc;

use futures::future;
use futures::stream::BoxStream;
use futures::StreamExt;

use crate::error::Result;
use crate::retention;
use crate::traits::ObjectStore;
use crate::types::{DeletionReport, LogObject};

/// Service that lists, selects and deletes expired workflow-run log files.
pub struct LogCleaner {
    store: Arc<dyn ObjectStore>,
}

impl LogCleaner {
    /// Create a new cleaner over the given store backend.
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    /// List the log files present in the store, optionally restricted to the
    /// given workflow names.
    ///
    /// Objects whose path carries no workflow name are always excluded, and
    /// an empty filter set behaves like no filter. Objects with a malformed
    /// run date are skipped with a warning so one bad path cannot poison the
    /// whole listing. Store failures pass through as stream items.
    pub fn list_log_files(
        &self,
        dag_names: Option<HashSet<String>>,
    ) -> BoxStream<'_, Result<LogObject>> {
        let filter = dag_names.filter(|names| !names.is_empty());

        self.store
            .list_objects()
            .filter_map(move |record| {
                let item = match record {
                    Ok(object) => match LogObject::parse(object) {
                        Ok(log) => match (log.dag_name.as_deref(), &filter) {
                            (None, _) => None,
                            (Some(name), Some(names)) if !names.contains(name) => None,
                            _ => Some(Ok(log)),
                        },
                        Err(err) => {
                            tracing::warn!(error = %err, "skipping log file with malformed run date");
                            None
                        }
                    },
                    Err(err) => Some(Err(err)),
                };
                future::ready(item)
            })
            .boxed()
    }

    /// Select the log files whose run date falls before `today - ttl_days`.
    pub fn choose_expired_logs(&self, log_files: Vec<LogObject>, ttl_days: u32) -> Vec<LogObject> {
        retention::choose_expired_logs(log_files, ttl_days)
    }

    /// Remove the given log files from the store, one request per object in
    /// input order.
    ///
    /// A failed removal is recorded in the report and does not abort the
    /// batch; a single stale object must not block cleanup of the rest.
    pub async fn delete_expired_logs(&self, log_files: Vec<LogObject>) -> DeletionReport {
        if log_files.is_empty() {
            tracing::info!("no log files to delete");
            return DeletionReport::default();
        }

        let mut report = DeletionReport::default();
        for log in log_files {
            match self.store.remove_object(&log.key).await {
                Ok(()) => {
                    tracing::info!(key = %log.key, "deleted log file");
                    report.bytes_freed += log.size.max(0) as u64;
                    report.deleted.push(log.key);
                }
                Err(err) => {
                    tracing::error!(key = %log.key, error = %err, "failed to delete log file");
                    report.failed.push((log.key, err));
                }
            }
        }
        report
    }
}
