//! Object store port.

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::error::Result;
use crate::types::StoredObject;

/// Capability set required from an object store backend.
///
/// The connection is established once at construction of the implementor and
/// reused for every call; no per-call connection churn.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Enumerate every object in the configured bucket, recursively.
    ///
    /// The stream is lazy, finite and single-pass; restart it by calling this
    /// method again. A listing failure surfaces as a `StoreUnavailable` item
    /// and terminates the listing.
    fn list_objects(&self) -> BoxStream<'_, Result<StoredObject>>;

    /// Remove a single object by key.
    ///
    /// Fails with `ObjectNotFound` when the key no longer exists and
    /// `StoreUnavailable` when the store cannot be reached.
    async fn remove_object(&self, key: &str) -> Result<()>;
}
