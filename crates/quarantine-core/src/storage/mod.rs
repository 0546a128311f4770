//! Object storage backends.
//!
//! The handler only needs three operations from a backend, expressed by
//! [`ObjectStore`]. [`S3ObjectStore`] talks to S3 through `aws-sdk-s3`;
//! [`MemoryObjectStore`] keeps objects in process and records every call.
//!
//! The trait uses `#[async_trait]` so it stays object-safe for
//! `Arc<dyn ObjectStore>`.

mod memory;
mod s3;

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;

pub use memory::{MemoryObjectStore, StorageCall};
pub use s3::S3ObjectStore;

use crate::error::StorageError;
use crate::location::ObjectLocation;

/// Storage operations consumed by the quarantine handler.
#[async_trait]
pub trait ObjectStore: Send + Sync + Debug {
    /// Duplicate `source` into `destination`.
    async fn copy_object(
        &self,
        destination: &ObjectLocation,
        source: &ObjectLocation,
    ) -> Result<(), StorageError>;

    /// Remove the object at `location`.
    async fn delete_object(&self, location: &ObjectLocation) -> Result<(), StorageError>;

    /// Size in bytes of the object at `location`.
    async fn object_size(&self, location: &ObjectLocation) -> Result<u64, StorageError>;
}

#[async_trait]
impl<T: ObjectStore + ?Sized> ObjectStore for Arc<T> {
    async fn copy_object(
        &self,
        destination: &ObjectLocation,
        source: &ObjectLocation,
    ) -> Result<(), StorageError> {
        (**self).copy_object(destination, source).await
    }

    async fn delete_object(&self, location: &ObjectLocation) -> Result<(), StorageError> {
        (**self).delete_object(location).await
    }

    async fn object_size(&self, location: &ObjectLocation) -> Result<u64, StorageError> {
        (**self).object_size(location).await
    }
}
