//! The quarantine pipeline.
//!
//! [`QuarantineHandler`] runs one finding end-to-end:
//!
//! ```text
//! extract -> copy -> verify (opt-in) -> delete -> report
//! ```
//!
//! Each storage call is made exactly once. The original is deleted only after
//! a copy the backend reported as successful; a failed delete leaves the object
//! in both buckets.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::config::QuarantineConfig;
use crate::error::{QuarantineError, QuarantineResult};
use crate::event::FindingEvent;
use crate::location::ObjectLocation;
use crate::result::{OperationResult, QuarantinedObject};
use crate::storage::ObjectStore;

/// Moves flagged objects into the quarantine bucket.
#[derive(Debug)]
pub struct QuarantineHandler<S> {
    store: S,
    config: Arc<QuarantineConfig>,
}

impl<S: ObjectStore> QuarantineHandler<S> {
    /// Create a handler over `store` with the given configuration.
    pub fn new(store: S, config: QuarantineConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    /// The handler configuration.
    #[must_use]
    pub fn config(&self) -> &QuarantineConfig {
        &self.config
    }

    /// The storage backend.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Quarantine the object named by `payload` and report a terminal status.
    ///
    /// Never fails: every error becomes [`OperationResult::Failed`].
    pub async fn handle(&self, payload: &Value) -> OperationResult {
        let outcome = self.quarantine(payload).await;
        match &outcome {
            Ok(object) => info!(
                quarantined_file = %object.destination,
                "quarantine operation completed successfully"
            ),
            Err(err) => error!(
                kind = %err.kind(),
                side_effects = err.has_side_effects(),
                error = %err,
                "quarantine operation failed"
            ),
        }
        OperationResult::from(outcome)
    }

    /// Quarantine the object named by `payload`, returning the typed outcome.
    pub async fn quarantine(&self, payload: &Value) -> QuarantineResult<QuarantinedObject> {
        info!(
            finding_id = FindingEvent::peek_id(payload).unwrap_or("-"),
            "received finding event"
        );
        debug!(event = %payload, "finding event payload");

        let event = FindingEvent::from_value(payload).inspect_err(|err| {
            warn!(error = %err, "could not extract bucket/key from event");
        })?;
        let origin = event.source().inspect_err(|err| {
            warn!(error = %err, "could not extract bucket/key from event");
        })?;
        let destination = origin.relocate(self.config.quarantine_bucket.as_str());

        info!(
            finding_id = event.finding_id().unwrap_or("-"),
            finding_type = event.finding_type().unwrap_or("-"),
            severity = event.severity().unwrap_or("-"),
            source = %origin,
            "quarantining file"
        );
        if origin.bucket == destination.bucket {
            warn!(
                bucket = %origin.bucket,
                "finding refers to the quarantine bucket itself"
            );
        }

        self.store
            .copy_object(&destination, &origin)
            .await
            .map_err(|error| QuarantineError::Copy {
                origin: origin.clone(),
                destination: destination.clone(),
                error,
            })?;
        info!(destination = %destination, "file copied to quarantine bucket");

        let verified_size = if self.config.verify_copy {
            Some(self.verify(&origin, &destination).await?)
        } else {
            None
        };

        self.store
            .delete_object(&origin)
            .await
            .map_err(|error| QuarantineError::Delete {
                location: origin.clone(),
                error,
            })?;
        info!(source = %origin, "original file deleted");

        Ok(QuarantinedObject {
            origin,
            destination,
            verified_size,
        })
    }

    /// Confirm the quarantined copy has the original's size.
    async fn verify(
        &self,
        origin: &ObjectLocation,
        destination: &ObjectLocation,
    ) -> QuarantineResult<u64> {
        let failed = |reason: String| QuarantineError::Verification {
            destination: destination.clone(),
            reason,
        };

        let expected = self
            .store
            .object_size(origin)
            .await
            .map_err(|e| failed(format!("cannot read original: {e}")))?;
        let actual = self
            .store
            .object_size(destination)
            .await
            .map_err(|e| failed(format!("cannot read copy: {e}")))?;

        if expected != actual {
            return Err(failed(format!(
                "size mismatch: original {expected} bytes, copy {actual} bytes"
            )));
        }

        debug!(destination = %destination, size = actual, "quarantined copy verified");
        Ok(actual)
    }
}
