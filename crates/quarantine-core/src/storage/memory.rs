//! In-process object store.
//!
//! Mirrors the S3 semantics the handler depends on: copying requires both
//! buckets and the source key to exist, an object cannot be copied onto
//! itself, and deleting a missing key in an existing bucket succeeds. Every
//! call is recorded, and the next copy, delete, or size lookup can be made to
//! fail with a chosen error.

use std::collections::BTreeMap;

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::{Mutex, RwLock};
use tracing::debug;

use super::ObjectStore;
use crate::error::StorageError;
use crate::location::ObjectLocation;

/// A storage call observed by [`MemoryObjectStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageCall {
    /// `copy_object(destination, source)`.
    Copy {
        /// Copy target.
        destination: ObjectLocation,
        /// Copy source.
        source: ObjectLocation,
    },
    /// `delete_object(location)`.
    Delete {
        /// Deleted object.
        location: ObjectLocation,
    },
    /// `object_size(location)`.
    Size {
        /// Inspected object.
        location: ObjectLocation,
    },
}

#[derive(Debug, Default)]
struct InjectedFailures {
    copy: Option<StorageError>,
    delete: Option<StorageError>,
    size: Option<StorageError>,
}

/// [`ObjectStore`] keeping buckets and objects in memory.
#[derive(Debug, Default)]
pub struct MemoryObjectStore {
    buckets: RwLock<BTreeMap<String, BTreeMap<String, Bytes>>>,
    calls: Mutex<Vec<StorageCall>>,
    failures: Mutex<InjectedFailures>,
}

impl MemoryObjectStore {
    /// Create an empty store with no buckets.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create `bucket` if it does not exist.
    pub fn create_bucket(&self, bucket: &str) {
        self.buckets.write().entry(bucket.to_owned()).or_default();
    }

    /// Store an object, creating its bucket if needed.
    pub fn put_object(&self, bucket: &str, key: &str, body: impl Into<Bytes>) {
        self.buckets
            .write()
            .entry(bucket.to_owned())
            .or_default()
            .insert(key.to_owned(), body.into());
    }

    /// Object body at `location`, if present.
    #[must_use]
    pub fn get_object(&self, location: &ObjectLocation) -> Option<Bytes> {
        self.buckets
            .read()
            .get(&location.bucket)
            .and_then(|objects| objects.get(&location.key))
            .cloned()
    }

    /// Whether an object exists at `location`.
    #[must_use]
    pub fn contains(&self, location: &ObjectLocation) -> bool {
        self.get_object(location).is_some()
    }

    /// All calls made so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<StorageCall> {
        self.calls.lock().clone()
    }

    /// Forget recorded calls.
    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    /// Make the next `copy_object` fail with `error`.
    pub fn fail_next_copy(&self, error: StorageError) {
        self.failures.lock().copy = Some(error);
    }

    /// Make the next `delete_object` fail with `error`.
    pub fn fail_next_delete(&self, error: StorageError) {
        self.failures.lock().delete = Some(error);
    }

    /// Make the next `object_size` fail with `error`.
    pub fn fail_next_size(&self, error: StorageError) {
        self.failures.lock().size = Some(error);
    }

    fn record(&self, call: StorageCall) {
        self.calls.lock().push(call);
    }
}

fn no_such_bucket(bucket: &str) -> StorageError {
    StorageError::NoSuchBucket {
        message: bucket.to_owned(),
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn copy_object(
        &self,
        destination: &ObjectLocation,
        source: &ObjectLocation,
    ) -> Result<(), StorageError> {
        self.record(StorageCall::Copy {
            destination: destination.clone(),
            source: source.clone(),
        });
        if let Some(err) = self.failures.lock().copy.take() {
            return Err(err);
        }
        if destination == source {
            return Err(StorageError::Service {
                code: Some("InvalidRequest".to_owned()),
                message: format!("cannot copy {source} onto itself"),
            });
        }

        let mut buckets = self.buckets.write();
        let body = buckets
            .get(&source.bucket)
            .ok_or_else(|| no_such_bucket(&source.bucket))?
            .get(&source.key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound {
                location: source.clone(),
            })?;
        buckets
            .get_mut(&destination.bucket)
            .ok_or_else(|| no_such_bucket(&destination.bucket))?
            .insert(destination.key.clone(), body);

        debug!(source = %source, destination = %destination, "memory copy_object completed");
        Ok(())
    }

    async fn delete_object(&self, location: &ObjectLocation) -> Result<(), StorageError> {
        self.record(StorageCall::Delete {
            location: location.clone(),
        });
        if let Some(err) = self.failures.lock().delete.take() {
            return Err(err);
        }

        self.buckets
            .write()
            .get_mut(&location.bucket)
            .ok_or_else(|| no_such_bucket(&location.bucket))?
            .remove(&location.key);

        debug!(location = %location, "memory delete_object completed");
        Ok(())
    }

    async fn object_size(&self, location: &ObjectLocation) -> Result<u64, StorageError> {
        self.record(StorageCall::Size {
            location: location.clone(),
        });
        if let Some(err) = self.failures.lock().size.take() {
            return Err(err);
        }

        self.get_object(location)
            .map(|body| body.len() as u64)
            .ok_or_else(|| StorageError::NotFound {
                location: location.clone(),
            })
    }
}
