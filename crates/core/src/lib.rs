#![deny(unused)]
//! Core domain logic for dagsweep.
//!
//! Retention decisions over workflow-run log files stored in an object
//! store: path parsing, expiry selection and the cleanup service. Backends
//! plug in through the [`ObjectStore`] port.

pub mod cleaner;
pub mod config;
pub mod error;
pub mod mocks;
pub mod path;
pub mod retention;
pub mod traits;
pub mod types;

pub use cleaner::LogCleaner;
pub use config::{AppConfig, LogConfig, StoreConfig};
pub use error::{Error, Result};
pub use retention::{choose_expired_logs, RetentionPolicy};
pub use traits::ObjectStore;
pub use types::{DeletionReport, LogObject, StoredObject};
