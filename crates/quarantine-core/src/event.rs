//! Finding event model.
//!
//! Macie publishes findings to EventBridge; the rule target receives the
//! whole EventBridge envelope. Only the affected bucket and key are required.
//! A handful of envelope fields are kept loosely typed for log context, so an
//! unexpected shape there never fails extraction.

use serde::Deserialize;
use serde_json::Value;

use crate::error::QuarantineError;
use crate::location::ObjectLocation;

/// A security finding naming one affected S3 object.
#[derive(Debug, Clone, Deserialize)]
pub struct FindingEvent {
    /// EventBridge event id.
    #[serde(default)]
    pub id: Option<Value>,
    /// Event source, e.g. `aws.macie`.
    #[serde(default)]
    pub source: Option<Value>,
    /// EventBridge detail type, e.g. `Macie Finding`.
    #[serde(rename = "detail-type", default)]
    pub detail_type: Option<Value>,
    /// Finding details.
    pub detail: FindingDetail,
}

/// The `detail` object of a finding event.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindingDetail {
    /// Finding id.
    #[serde(default)]
    pub id: Option<Value>,
    /// Finding type, e.g. `SensitiveData:S3Object/Personal`.
    #[serde(rename = "type", default)]
    pub finding_type: Option<Value>,
    /// Severity block (`score`, `description`).
    #[serde(default)]
    pub severity: Option<Value>,
    /// The affected resources.
    pub resources_affected: ResourcesAffected,
}

/// The resources named by a finding.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourcesAffected {
    /// Affected bucket.
    pub s3_bucket: BucketRef,
    /// Affected object.
    pub s3_object: ObjectRef,
}

/// Bucket reference in a finding.
#[derive(Debug, Clone, Deserialize)]
pub struct BucketRef {
    /// Bucket name.
    pub name: String,
}

/// Object reference in a finding.
#[derive(Debug, Clone, Deserialize)]
pub struct ObjectRef {
    /// Object key.
    pub key: String,
}

impl FindingEvent {
    /// Deserialize a finding from a raw invocation payload.
    pub fn from_value(value: &Value) -> Result<Self, QuarantineError> {
        Self::deserialize(value).map_err(|e| QuarantineError::extraction(e.to_string()))
    }

    /// Finding id read straight from a raw payload, without requiring the
    /// payload to be a well-formed finding.
    #[must_use]
    pub fn peek_id(payload: &Value) -> Option<&str> {
        payload
            .pointer("/detail/id")
            .and_then(Value::as_str)
            .or_else(|| payload.get("id").and_then(Value::as_str))
    }

    /// The flagged object.
    ///
    /// Empty bucket names and keys are rejected here since no backend can
    /// address them.
    pub fn source(&self) -> Result<ObjectLocation, QuarantineError> {
        let resources = &self.detail.resources_affected;
        if resources.s3_bucket.name.is_empty() {
            return Err(QuarantineError::extraction(
                "detail.resourcesAffected.s3Bucket.name is empty",
            ));
        }
        if resources.s3_object.key.is_empty() {
            return Err(QuarantineError::extraction(
                "detail.resourcesAffected.s3Object.key is empty",
            ));
        }
        Ok(ObjectLocation::new(
            resources.s3_bucket.name.clone(),
            resources.s3_object.key.clone(),
        ))
    }

    /// Finding id, falling back to the event id.
    #[must_use]
    pub fn finding_id(&self) -> Option<&str> {
        self.detail
            .id
            .as_ref()
            .or(self.id.as_ref())
            .and_then(Value::as_str)
    }

    /// Finding type.
    #[must_use]
    pub fn finding_type(&self) -> Option<&str> {
        self.detail.finding_type.as_ref().and_then(Value::as_str)
    }

    /// Severity description (`Low`, `Medium`, `High`).
    #[must_use]
    pub fn severity(&self) -> Option<&str> {
        self.detail
            .severity
            .as_ref()
            .and_then(|s| s.get("description"))
            .and_then(Value::as_str)
    }

    /// Event source.
    #[must_use]
    pub fn event_source(&self) -> Option<&str> {
        self.source.as_ref().and_then(Value::as_str)
    }
}
