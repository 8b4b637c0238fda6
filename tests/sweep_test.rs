//! End-to-end sweep tests wiring the cleaner to the in-memory backend.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Duration, Local, NaiveDate};
use futures::StreamExt;

use dagsweep_core::{LogCleaner, LogObject, ObjectStore};
use dagsweep_store::InMemoryStore;

fn log_key(dag: &str, date: NaiveDate) -> String {
    format!(
        "{dag}/dag_id={dag}/run_id=scheduled__{date}T00:00:00/task_id=load/attempt=1.log"
    )
}

fn days_ago(days: i64) -> NaiveDate {
    Local::now().date_naive() - Duration::days(days)
}

async fn collect_logs(cleaner: &LogCleaner, filter: Option<HashSet<String>>) -> Vec<LogObject> {
    cleaner
        .list_log_files(filter)
        .map(|item| item.unwrap())
        .collect()
        .await
}

#[tokio::test]
async fn sweep_removes_only_expired_logs_of_filtered_dag() {
    let store = Arc::new(InMemoryStore::new());
    let old_etl = log_key("etl_job", days_ago(40));
    let recent_etl = log_key("etl_job", days_ago(1));
    let old_other = log_key("other_job", days_ago(40));
    store.insert(&old_etl, 512);
    store.insert(&recent_etl, 256);
    store.insert(&old_other, 128);
    store.insert("misc/readme.txt", 16);

    let cleaner = LogCleaner::new(store.clone());
    let filter: HashSet<String> = ["etl_job".to_string()].into_iter().collect();

    let listed = collect_logs(&cleaner, Some(filter)).await;
    assert_eq!(listed.len(), 2);

    let expired = cleaner.choose_expired_logs(listed, 30);
    assert_eq!(expired.len(), 1);
    assert_eq!(expired[0].key, old_etl);

    let report = cleaner.delete_expired_logs(expired).await;
    assert_eq!(report.deleted, vec![old_etl.clone()]);
    assert!(report.failed.is_empty());
    assert_eq!(report.bytes_freed, 512);

    assert!(!store.contains(&old_etl));
    assert!(store.contains(&recent_etl));
    assert!(store.contains(&old_other));
    assert!(store.contains("misc/readme.txt"));
}

#[tokio::test]
async fn unfiltered_listing_covers_every_dag_but_skips_foreign_objects() {
    let store = Arc::new(InMemoryStore::new());
    store.insert(log_key("etl_job", days_ago(5)), 1);
    store.insert(log_key("other_job", days_ago(5)), 1);
    store.insert("misc/readme.txt", 1);

    let cleaner = LogCleaner::new(store);
    let listed = collect_logs(&cleaner, None).await;

    let mut dags: Vec<_> = listed
        .iter()
        .map(|log| log.dag_name.clone().unwrap())
        .collect();
    dags.sort();
    assert_eq!(dags, vec!["etl_job", "other_job"]);
}

#[tokio::test]
async fn already_deleted_object_does_not_block_the_batch() {
    let store = Arc::new(InMemoryStore::new());
    let first = log_key("etl_job", days_ago(90));
    let gone = log_key("etl_job", days_ago(80));
    let last = log_key("etl_job", days_ago(70));
    store.insert(&first, 1);
    store.insert(&gone, 1);
    store.insert(&last, 1);

    let cleaner = LogCleaner::new(store.clone());
    let expired = cleaner.choose_expired_logs(collect_logs(&cleaner, None).await, 30);
    assert_eq!(expired.len(), 3);

    // Simulate a concurrent deletion between listing and deleting.
    store.remove_object(&gone).await.unwrap();

    let report = cleaner.delete_expired_logs(expired).await;
    assert_eq!(report.attempted(), 3);
    assert_eq!(report.deleted.len(), 2);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, gone);
}
