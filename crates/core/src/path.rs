//! Extraction of workflow metadata from object paths.
//!
//! Log objects follow the Airflow layout convention
//! `.../dag_id=<name>/.../run_id=<run>__<YYYY-MM-DD>.../...`. Both patterns
//! are compiled once at first use and shared process-wide.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};

static DAG_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"dag_id=([A-Za-z0-9_]+)/").unwrap());

// The run identifier before the date separator must be digit-free, otherwise
// the segment is not a run-id marker and the date does not apply.
static RUN_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"run_id=\D+__(\d{4}-\d{2}-\d{2})").unwrap());

/// Extract the workflow (DAG) name from an object path.
///
/// Returns `None` when the path does not contain a `dag_id=<name>/` segment.
pub fn extract_dag_name(path: &str) -> Option<String> {
    DAG_NAME
        .captures(path)
        .map(|caps| caps[1].to_string())
}

/// Extract the run date from an object path.
///
/// Returns `Ok(None)` when the path carries no `run_id=<run>__<date>` segment
/// and `Err(Error::InvalidRunDate)` when the segment matched but the date is
/// not a real calendar date (e.g. `2024-13-45`).
pub fn extract_run_date(path: &str) -> Result<Option<NaiveDate>> {
    let Some(caps) = RUN_DATE.captures(path) else {
        return Ok(None);
    };
    let raw = &caps[1];
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| Error::invalid_run_date(path, raw))
}
