//! Error types for the quarantine pipeline.
//!
//! [`StorageError`] is what an [`ObjectStore`](crate::storage::ObjectStore)
//! backend reports. [`QuarantineError`] is the closed taxonomy the handler
//! produces, one variant per pipeline step, so callers branch on
//! [`QuarantineError::kind`] rather than on message text.

use std::fmt;

use crate::location::ObjectLocation;

/// Error reported by an object storage backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// The addressed object does not exist.
    #[error("The specified key does not exist: {location}")]
    NotFound {
        /// The object that was not found.
        location: ObjectLocation,
    },

    /// A bucket involved in the request does not exist.
    #[error("The specified bucket does not exist: {message}")]
    NoSuchBucket {
        /// Backend message, usually naming the bucket.
        message: String,
    },

    /// The caller is not allowed to perform the request.
    #[error("Access denied: {message}")]
    AccessDenied {
        /// Backend message.
        message: String,
    },

    /// Any other backend rejection or transport failure.
    #[error("{message}")]
    Service {
        /// Service error code, when the backend returned one.
        code: Option<String>,
        /// Backend message.
        message: String,
    },
}

impl StorageError {
    /// Creates a `Service` error without an error code.
    pub fn service(message: impl Into<String>) -> Self {
        Self::Service {
            code: None,
            message: message.into(),
        }
    }
}

/// Which pipeline step produced a [`QuarantineError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The finding event was malformed or incomplete.
    Extraction,
    /// The backend rejected the copy into the quarantine bucket.
    Copy,
    /// The quarantined copy did not match the original.
    Verification,
    /// The backend rejected deletion of the original.
    Delete,
    /// Startup configuration was invalid.
    Config,
}

impl ErrorKind {
    /// Stable name used in log fields.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Extraction => "ExtractionError",
            Self::Copy => "CopyError",
            Self::Verification => "VerificationError",
            Self::Delete => "DeleteError",
            Self::Config => "ConfigError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error produced by the quarantine pipeline.
#[derive(Debug, thiserror::Error)]
pub enum QuarantineError {
    /// Bucket name or object key could not be read from the event.
    #[error("failed to extract bucket/key from event: {reason}")]
    Extraction {
        /// What was missing or malformed.
        reason: String,
    },

    /// Copy into the quarantine bucket failed; the original is untouched.
    #[error("failed to copy {origin} to {destination}: {error}")]
    Copy {
        /// The flagged object.
        origin: ObjectLocation,
        /// The intended quarantine location.
        destination: ObjectLocation,
        /// Backend error.
        #[source]
        error: StorageError,
    },

    /// The quarantined copy could not be confirmed; the original is untouched.
    #[error("failed to verify quarantined copy {destination}: {reason}")]
    Verification {
        /// The quarantine location that was checked.
        destination: ObjectLocation,
        /// Why verification failed.
        reason: String,
    },

    /// Deletion of the original failed after a successful copy.
    ///
    /// The object now exists in both the source and quarantine buckets.
    #[error("failed to delete {location}: {error}")]
    Delete {
        /// The original object that is still present.
        location: ObjectLocation,
        /// Backend error.
        #[source]
        error: StorageError,
    },

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl QuarantineError {
    /// Creates an `Extraction` error.
    pub fn extraction(reason: impl Into<String>) -> Self {
        Self::Extraction {
            reason: reason.into(),
        }
    }

    /// Returns the pipeline step this error belongs to.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Extraction { .. } => ErrorKind::Extraction,
            Self::Copy { .. } => ErrorKind::Copy,
            Self::Verification { .. } => ErrorKind::Verification,
            Self::Delete { .. } => ErrorKind::Delete,
            Self::Config(_) => ErrorKind::Config,
        }
    }

    /// Returns `true` if storage was mutated before the failure.
    ///
    /// Only failures after a completed copy leave a quarantined duplicate
    /// behind.
    #[must_use]
    pub fn has_side_effects(&self) -> bool {
        matches!(self, Self::Verification { .. } | Self::Delete { .. })
    }
}

/// Convenience result type for quarantine operations.
pub type QuarantineResult<T> = Result<T, QuarantineError>;
