//! Core type definitions for dagsweep.

use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::path;

/// A raw object record as returned by a store listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Full object key within the bucket.
    pub key: String,
    /// Object size in bytes, when the store reports it.
    pub size: i64,
}

impl StoredObject {
    pub fn new(key: impl Into<String>, size: i64) -> Self {
        Self {
            key: key.into(),
            size,
        }
    }
}

/// One stored log file, with workflow metadata parsed out of its path.
///
/// Both derived fields are extracted exactly once, at construction. A `None`
/// means the path simply does not carry that convention; a malformed run date
/// fails construction instead of being smuggled through as absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogObject {
    /// Full object key within the bucket.
    pub key: String,
    /// Object size in bytes.
    pub size: i64,
    /// Workflow (DAG) name from the `dag_id=` segment.
    pub dag_name: Option<String>,
    /// Run date from the `run_id=` segment.
    pub run_date: Option<NaiveDate>,
}

impl LogObject {
    /// Parse a listing record into a log object descriptor.
    pub fn parse(object: StoredObject) -> Result<Self> {
        let dag_name = path::extract_dag_name(&object.key);
        let run_date = path::extract_run_date(&object.key)?;
        Ok(Self {
            key: object.key,
            size: object.size,
            dag_name,
            run_date,
        })
    }

    /// Parse a bare object key with no size information.
    pub fn from_key(key: impl Into<String>) -> Result<Self> {
        Self::parse(StoredObject::new(key, 0))
    }
}

/// Per-item outcome of a deletion batch.
#[derive(Debug, Default)]
pub struct DeletionReport {
    /// Keys removed from the store, in attempt order.
    pub deleted: Vec<String>,
    /// Keys whose removal failed, with the per-item error.
    pub failed: Vec<(String, Error)>,
    /// Total size of the removed objects in bytes (approximate).
    pub bytes_freed: u64,
}

impl DeletionReport {
    /// Number of removal attempts made.
    pub fn attempted(&self) -> usize {
        self.deleted.len() + self.failed.len()
    }

    /// Check if the batch attempted nothing at all.
    pub fn is_empty(&self) -> bool {
        self.attempted() == 0
    }

    /// Check if any object was removed.
    pub fn has_deletions(&self) -> bool {
        !self.deleted.is_empty()
    }

    /// Check if every attempted removal failed.
    pub fn all_failed(&self) -> bool {
        self.deleted.is_empty() && !self.failed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_fills_both_fields_once() {
        let object = StoredObject::new("a/dag_id=x/run_id=m__2024-01-01/f.log", 128);
        let log = LogObject::parse(object).unwrap();
        assert_eq!(log.dag_name.as_deref(), Some("x"));
        assert_eq!(log.run_date, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(log.size, 128);
    }

    #[test]
    fn parse_tolerates_missing_conventions() {
        let log = LogObject::from_key("misc/readme.txt").unwrap();
        assert_eq!(log.dag_name, None);
        assert_eq!(log.run_date, None);
    }

    #[test]
    fn report_accounting() {
        let empty = DeletionReport::default();
        assert!(empty.is_empty());
        assert!(!empty.has_deletions());
        assert!(!empty.all_failed());

        let mixed = DeletionReport {
            deleted: vec!["a".into()],
            failed: vec![("b".into(), Error::object_not_found("b"))],
            bytes_freed: 10,
        };
        assert_eq!(mixed.attempted(), 2);
        assert!(mixed.has_deletions());
        assert!(!mixed.all_failed());

        let failed = DeletionReport {
            deleted: vec![],
            failed: vec![("b".into(), Error::store_unavailable("down"))],
            bytes_freed: 0,
        };
        assert!(failed.all_failed());
    }
}
