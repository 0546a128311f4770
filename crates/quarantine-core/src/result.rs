//! Invocation results.

use serde::{Deserialize, Serialize};

use crate::error::QuarantineError;
use crate::location::ObjectLocation;

/// A successfully quarantined object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuarantinedObject {
    /// Where the object was found (now deleted).
    pub origin: ObjectLocation,
    /// Where the object now lives.
    pub destination: ObjectLocation,
    /// Size confirmed by post-copy verification, when enabled.
    pub verified_size: Option<u64>,
}

/// The terminal status returned to the invoking infrastructure.
///
/// Serializes as `{"status":"success","quarantined_file":"s3://..."}` or
/// `{"status":"failed","reason":"..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum OperationResult {
    /// The object was copied and the original deleted.
    Success {
        /// Fully qualified quarantine locator.
        quarantined_file: String,
    },
    /// A step failed; see `reason`.
    Failed {
        /// Human-readable failure reason.
        reason: String,
    },
}

impl OperationResult {
    /// Returns `true` for [`OperationResult::Success`].
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

impl From<Result<QuarantinedObject, QuarantineError>> for OperationResult {
    fn from(outcome: Result<QuarantinedObject, QuarantineError>) -> Self {
        match outcome {
            Ok(object) => Self::Success {
                quarantined_file: object.destination.to_string(),
            },
            Err(err) => Self::Failed {
                reason: err.to_string(),
            },
        }
    }
}
