//! S3 object addressing.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A (bucket, key) pair identifying one S3 object.
///
/// Displays as the fully qualified locator `s3://<bucket>/<key>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectLocation {
    /// Bucket name.
    pub bucket: String,
    /// Object key, unchanged by relocation.
    pub key: String,
}

impl ObjectLocation {
    /// Create a location from a bucket name and object key.
    #[must_use]
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// The same key in another bucket.
    #[must_use]
    pub fn relocate(&self, bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: self.key.clone(),
        }
    }
}

impl fmt::Display for ObjectLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s3://{}/{}", self.bucket, self.key)
    }
}
