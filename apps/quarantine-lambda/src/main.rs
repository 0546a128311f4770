//! Quarantine Lambda - moves S3 objects flagged by security findings.
//!
//! Deployed as an EventBridge rule target for Macie findings. Each invocation
//! copies the affected object into the quarantine bucket under the same key
//! and deletes the original, returning `{"status": "success", ...}` or
//! `{"status": "failed", "reason": ...}`.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `QUARANTINE_BUCKET` | *(required)* | Destination bucket |
//! | `VERIFY_COPY` | `false` | Compare sizes before deleting the original |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `LOG_FORMAT` | `json` | `json` or `text` |
//! | `AWS_ENDPOINT_URL` | *(unset)* | Custom S3 endpoint |
//! | `S3_FORCE_PATH_STYLE` | `false` | Path-style addressing |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

use anyhow::{Context, Result};
use aws_config::BehaviorVersion;
use lambda_runtime::{LambdaEvent, service_fn};
use quarantine_core::{
    LogFormat, OperationResult, QuarantineConfig, QuarantineHandler, S3ObjectStore,
};
use serde_json::Value;
use tracing::{Instrument, info, info_span};
use tracing_subscriber::EnvFilter;

/// Function version reported at cold start.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
fn init_tracing(log_level: &str, format: LogFormat) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(false);

    match format {
        LogFormat::Json => builder
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .init(),
        LogFormat::Text => builder.init(),
    }

    Ok(())
}

/// Build an S3 client from the ambient AWS configuration.
async fn build_s3_client(config: &QuarantineConfig) -> aws_sdk_s3::Client {
    let shared = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let mut builder = aws_sdk_s3::config::Builder::from(&shared);

    if let Some(endpoint) = &config.endpoint_url {
        builder = builder.endpoint_url(endpoint);
    }
    if config.force_path_style || config.endpoint_url.is_some() {
        builder = builder.force_path_style(true);
    }

    aws_sdk_s3::Client::from_conf(builder.build())
}

/// Handle one Lambda invocation.
async fn invoke(
    handler: &QuarantineHandler<S3ObjectStore>,
    event: LambdaEvent<Value>,
) -> Result<OperationResult, lambda_runtime::Error> {
    let (payload, context) = event.into_parts();
    let span = info_span!("invocation", request_id = %context.request_id);
    Ok(handler.handle(&payload).instrument(span).await)
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = QuarantineConfig::from_env()?;

    init_tracing(&config.log_level, config.log_format)?;

    let client = build_s3_client(&config).await;
    let handler = QuarantineHandler::new(S3ObjectStore::new(client), config);

    let config = handler.config();
    info!(
        quarantine_bucket = %config.quarantine_bucket,
        verify_copy = config.verify_copy,
        endpoint_url = config.endpoint_url.as_deref().unwrap_or("-"),
        version = VERSION,
        "starting quarantine lambda",
    );

    lambda_runtime::run(service_fn(|event: LambdaEvent<Value>| {
        invoke(&handler, event)
    }))
    .await
    .map_err(|e| anyhow::anyhow!(e))
}
