//! Error types for dagsweep.

use thiserror::Error;

/// Result type alias using dagsweep's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for dagsweep.
#[derive(Error, Debug)]
pub enum Error {
    /// The object store cannot be reached or rejected a request.
    #[error("Object store unavailable: {0}")]
    StoreUnavailable(String),

    /// An object targeted for deletion no longer exists in the store.
    #[error("Object not found: {0}")]
    ObjectNotFound(String),

    /// A path matched the run-id convention but carried a date that is not
    /// a valid calendar date.
    #[error("Invalid run date '{value}' in object path: {key}")]
    InvalidRunDate { key: String, value: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Create a store-unavailable error.
    pub fn store_unavailable(msg: impl Into<String>) -> Self {
        Self::StoreUnavailable(msg.into())
    }

    /// Create an object-not-found error.
    pub fn object_not_found(key: impl Into<String>) -> Self {
        Self::ObjectNotFound(key.into())
    }

    /// Create an invalid-run-date error.
    pub fn invalid_run_date(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidRunDate {
            key: key.into(),
            value: value.into(),
        }
    }
}
