//! Quarantine handler configuration.
//!
//! Provides [`QuarantineConfig`], resolved once at process start. Values are
//! loaded from environment variables; the quarantine bucket has no default
//! and must be set.

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::error::QuarantineError;

/// Log output format for the Lambda binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per line, for CloudWatch Logs Insights.
    #[default]
    Json,
    /// Human-readable text.
    Text,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("text") || value.eq_ignore_ascii_case("pretty") {
            Self::Text
        } else {
            Self::Json
        }
    }
}

/// Quarantine handler configuration.
///
/// # Examples
///
/// ```
/// use quarantine_core::QuarantineConfig;
///
/// let config = QuarantineConfig::builder()
///     .quarantine_bucket("quarantine-demo-bucket")
///     .build();
/// assert_eq!(config.quarantine_bucket, "quarantine-demo-bucket");
/// assert!(!config.verify_copy);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct QuarantineConfig {
    /// Destination bucket for quarantined objects.
    #[builder(setter(into))]
    pub quarantine_bucket: String,

    /// Compare object sizes after the copy and before deleting the original.
    #[builder(default = false)]
    pub verify_copy: bool,

    /// Log level filter string (e.g. `"info"`, `"debug"`).
    #[builder(default = String::from("info"))]
    pub log_level: String,

    /// Log output format.
    #[builder(default)]
    pub log_format: LogFormat,

    /// Custom S3 endpoint (LocalStack, MinIO).
    #[builder(default, setter(strip_option, into))]
    pub endpoint_url: Option<String>,

    /// Use path-style bucket addressing.
    #[builder(default = false)]
    pub force_path_style: bool,
}

impl QuarantineConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `QUARANTINE_BUCKET` | *(required)* |
    /// | `VERIFY_COPY` | `false` |
    /// | `LOG_LEVEL` | `info` |
    /// | `LOG_FORMAT` | `json` |
    /// | `AWS_ENDPOINT_URL` | *(unset)* |
    /// | `S3_FORCE_PATH_STYLE` | `false` |
    pub fn from_env() -> Result<Self, QuarantineError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, QuarantineError> {
        let quarantine_bucket = lookup("QUARANTINE_BUCKET")
            .map(|v| v.trim().to_owned())
            .unwrap_or_default();

        let mut config = Self::builder().quarantine_bucket(quarantine_bucket).build();

        if let Some(v) = lookup("VERIFY_COPY") {
            config.verify_copy = parse_bool(&v);
        }
        if let Some(v) = lookup("LOG_LEVEL") {
            config.log_level = v;
        }
        if let Some(v) = lookup("LOG_FORMAT") {
            config.log_format = LogFormat::parse(&v);
        }
        if let Some(v) = lookup("AWS_ENDPOINT_URL") {
            if !v.is_empty() {
                config.endpoint_url = Some(v);
            }
        }
        if let Some(v) = lookup("S3_FORCE_PATH_STYLE") {
            config.force_path_style = parse_bool(&v);
        }

        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration can serve invocations.
    pub fn validate(&self) -> Result<(), QuarantineError> {
        if self.quarantine_bucket.is_empty() {
            return Err(QuarantineError::Config(
                "QUARANTINE_BUCKET must be set to the quarantine bucket name".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Parse a string as a boolean, accepting `"1"` and `"true"` (case-insensitive).
fn parse_bool(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}
