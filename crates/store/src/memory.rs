//! In-memory object store implementation using DashMap.

use async_trait::async_trait;
use dashmap::DashMap;
use futures::stream::{self, BoxStream};
use futures::StreamExt;

use dagsweep_core::{Error, ObjectStore, Result, StoredObject};

/// In-memory object store using DashMap for concurrent access.
///
/// Primarily a test double for the S3 backend; listings are returned in key
/// order so assertions stay deterministic.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    /// Object key mapped to its size in bytes.
    objects: DashMap<String, i64>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an object.
    pub fn insert(&self, key: impl Into<String>, size: i64) {
        self.objects.insert(key.into(), size);
    }

    /// Get the number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Check whether a key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.objects.contains_key(key)
    }
}

#[async_trait]
impl ObjectStore for InMemoryStore {
    fn list_objects(&self) -> BoxStream<'_, Result<StoredObject>> {
        let mut objects: Vec<StoredObject> = self
            .objects
            .iter()
            .map(|entry| StoredObject::new(entry.key().clone(), *entry.value()))
            .collect();
        objects.sort_by(|a, b| a.key.cmp(&b.key));

        stream::iter(objects.into_iter().map(Ok)).boxed()
    }

    async fn remove_object(&self, key: &str) -> Result<()> {
        match self.objects.remove(key) {
            Some(_) => Ok(()),
            None => Err(Error::object_not_found(key)),
        }
    }
}
