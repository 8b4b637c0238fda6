//! Retention policy and expiry selection.

use chrono::{Duration, Local, NaiveDate};
use serde::Deserialize;

use crate::types::LogObject;

/// Configuration for log retention.
#[derive(Debug, Clone, Deserialize)]
pub struct RetentionPolicy {
    /// Number of days a log file is kept before becoming eligible for deletion.
    pub ttl_days: u32,
    /// Restrict the sweep to these workflow names. `None` or an empty list
    /// sweeps every workflow.
    pub dags: Option<Vec<String>>,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            ttl_days: 30,
            dags: None,
        }
    }
}

/// Select the log objects whose run date falls before `today - ttl_days`.
///
/// The deadline is computed once from the local calendar date. Input order is
/// preserved. Objects with no parseable run date are skipped with a warning
/// rather than compared against the deadline.
pub fn choose_expired_logs(log_files: Vec<LogObject>, ttl_days: u32) -> Vec<LogObject> {
    choose_expired_logs_as_of(log_files, ttl_days, Local::now().date_naive())
}

/// Selection with an explicit "today", for callers that pin the clock.
pub fn choose_expired_logs_as_of(
    log_files: Vec<LogObject>,
    ttl_days: u32,
    today: NaiveDate,
) -> Vec<LogObject> {
    let deadline = today - Duration::days(i64::from(ttl_days));

    log_files
        .into_iter()
        .filter(|log| match log.run_date {
            // Strict comparison: objects dated exactly on the deadline are retained.
            Some(run_date) => run_date < deadline,
            None => {
                tracing::warn!(key = %log.key, "log file has no parseable run date, retaining");
                false
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log(key: &str) -> LogObject {
        LogObject::from_key(key).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn deadline_is_strict() {
        let today = date(2024, 6, 10);
        let on_deadline = log("dag_id=a/run_id=m__2024-06-10/f.log");
        let yesterday = log("dag_id=a/run_id=m__2024-06-09/f.log");

        // ttl_days = 0 makes the deadline today itself.
        let expired = choose_expired_logs_as_of(vec![on_deadline, yesterday.clone()], 0, today);
        assert_eq!(expired, vec![yesterday]);
    }

    #[test]
    fn hundred_day_retention_scenario() {
        let today = date(2024, 6, 10);
        let old = log("a/dag_id=x/run_id=m__2024-01-01/f.log");
        let recent = log("a/dag_id=y/run_id=n__2024-06-01/f.log");

        let expired = choose_expired_logs_as_of(vec![old.clone(), recent], 100, today);
        assert_eq!(expired, vec![old]);
    }

    #[test]
    fn selection_is_idempotent() {
        let today = date(2024, 6, 10);
        let logs = vec![
            log("dag_id=a/run_id=m__2024-01-01/f.log"),
            log("dag_id=a/run_id=m__2024-06-05/f.log"),
            log("dag_id=b/run_id=m__2023-11-20/f.log"),
        ];

        let first = choose_expired_logs_as_of(logs, 30, today);
        let second = choose_expired_logs_as_of(first.clone(), 30, today);
        assert_eq!(first, second);
    }

    #[test]
    fn dateless_objects_are_retained() {
        let today = date(2024, 6, 10);
        let dateless = log("dag_id=a/some/other/layout.log");

        let expired = choose_expired_logs_as_of(vec![dateless], 0, today);
        assert!(expired.is_empty());
    }

    #[test]
    fn preserves_input_order() {
        let today = date(2024, 6, 10);
        let a = log("dag_id=a/run_id=m__2023-01-02/f.log");
        let b = log("dag_id=b/run_id=m__2023-01-01/f.log");
        let c = log("dag_id=c/run_id=m__2023-01-03/f.log");

        let expired = choose_expired_logs_as_of(vec![a.clone(), b.clone(), c.clone()], 30, today);
        assert_eq!(expired, vec![a, b, c]);
    }
}
