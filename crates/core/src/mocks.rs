//! Mock implementations of core traits for testing.
//!
//! This module provides a scripted object store that can be used across the
//! codebase for unit and integration testing without a live backend.

use std::sync::Mutex;

use async_trait::async_trait;
use futures::stream::{self, BoxStream};
use futures::StreamExt;

use crate::error::{Error, Result};
use crate::traits::ObjectStore;
use crate::types::StoredObject;

/// Scripted in-process object store.
///
/// Keys removed through the trait disappear from subsequent listings;
/// removing an absent key yields `ObjectNotFound`. A listing failure can be
/// injected to exercise `StoreUnavailable` paths.
pub struct MockObjectStore {
    objects: Mutex<Vec<StoredObject>>,
    listing_error: Mutex<Option<String>>,
    remove_calls: Mutex<usize>,
}

impl MockObjectStore {
    /// Create an empty mock store.
    pub fn new() -> Self {
        Self {
            objects: Mutex::new(Vec::new()),
            listing_error: Mutex::new(None),
            remove_calls: Mutex::new(0),
        }
    }

    /// Create a mock store pre-seeded with zero-sized objects.
    pub fn with_keys(keys: Vec<&str>) -> Self {
        let store = Self::new();
        {
            let mut objects = store.objects.lock().unwrap();
            objects.extend(keys.into_iter().map(|k| StoredObject::new(k, 0)));
        }
        store
    }

    /// Make the next listings fail with `StoreUnavailable`.
    pub fn fail_listing(&self, msg: &str) {
        *self.listing_error.lock().unwrap() = Some(msg.to_string());
    }

    /// Number of `remove_object` calls made against this mock.
    pub fn remove_calls(&self) -> usize {
        *self.remove_calls.lock().unwrap()
    }

    /// Check whether a key is still present.
    pub fn contains(&self, key: &str) -> bool {
        self.objects.lock().unwrap().iter().any(|o| o.key == key)
    }
}

impl Default for MockObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ObjectStore for MockObjectStore {
    fn list_objects(&self) -> BoxStream<'_, Result<StoredObject>> {
        if let Some(msg) = self.listing_error.lock().unwrap().clone() {
            return stream::iter(vec![Err(Error::store_unavailable(msg))]).boxed();
        }

        let objects = self.objects.lock().unwrap().clone();
        stream::iter(objects.into_iter().map(Ok)).boxed()
    }

    async fn remove_object(&self, key: &str) -> Result<()> {
        *self.remove_calls.lock().unwrap() += 1;

        let mut objects = self.objects.lock().unwrap();
        match objects.iter().position(|o| o.key == key) {
            Some(idx) => {
                objects.remove(idx);
                Ok(())
            }
            None => Err(Error::object_not_found(key)),
        }
    }
}
