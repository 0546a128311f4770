//! S3 backend built on `aws-sdk-s3`.

use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use tracing::debug;

use super::ObjectStore;
use crate::error::StorageError;
use crate::location::ObjectLocation;

/// Characters left unescaped in an `x-amz-copy-source` key.
const COPY_SOURCE_KEY: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');

/// [`ObjectStore`] backed by an S3 client.
#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    client: Client,
}

impl S3ObjectStore {
    /// Wrap a configured S3 client.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn copy_object(
        &self,
        destination: &ObjectLocation,
        source: &ObjectLocation,
    ) -> Result<(), StorageError> {
        let output = self
            .client
            .copy_object()
            .bucket(&destination.bucket)
            .key(&destination.key)
            .copy_source(copy_source(source))
            .send()
            .await
            .map_err(|e| classify(&e, source))?;

        debug!(
            source = %source,
            destination = %destination,
            etag = output.copy_object_result().and_then(|r| r.e_tag()).unwrap_or_default(),
            "copy_object completed"
        );
        Ok(())
    }

    async fn delete_object(&self, location: &ObjectLocation) -> Result<(), StorageError> {
        self.client
            .delete_object()
            .bucket(&location.bucket)
            .key(&location.key)
            .send()
            .await
            .map_err(|e| classify(&e, location))?;

        debug!(location = %location, "delete_object completed");
        Ok(())
    }

    async fn object_size(&self, location: &ObjectLocation) -> Result<u64, StorageError> {
        let output = self
            .client
            .head_object()
            .bucket(&location.bucket)
            .key(&location.key)
            .send()
            .await
            .map_err(|e| classify(&e, location))?;

        content_size(output.content_length(), location)
    }
}

/// Interpret a HEAD `Content-Length`; an absent or negative length is an error
/// rather than zero bytes.
fn content_size(length: Option<i64>, location: &ObjectLocation) -> Result<u64, StorageError> {
    length
        .and_then(|n| u64::try_from(n).ok())
        .ok_or_else(|| StorageError::service(format!("no valid Content-Length for {location}")))
}

/// Build the `x-amz-copy-source` value: `<bucket>/<url-encoded key>`.
fn copy_source(source: &ObjectLocation) -> String {
    format!(
        "{}/{}",
        source.bucket,
        utf8_percent_encode(&source.key, COPY_SOURCE_KEY)
    )
}

/// Map an SDK failure onto a [`StorageError`].
///
/// `location` is the object a not-found error refers to.
fn classify<E>(err: &SdkError<E>, location: &ObjectLocation) -> StorageError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
{
    let status = err.raw_response().map(|r| r.status().as_u16());
    let message = err
        .message()
        .map_or_else(|| DisplayErrorContext(err).to_string(), ToOwned::to_owned);

    match err.code() {
        Some("NoSuchKey" | "NotFound") => StorageError::NotFound {
            location: location.clone(),
        },
        Some("NoSuchBucket") => StorageError::NoSuchBucket { message },
        Some("AccessDenied") => StorageError::AccessDenied { message },
        None if status == Some(404) => StorageError::NotFound {
            location: location.clone(),
        },
        None if status == Some(403) => StorageError::AccessDenied { message },
        code => StorageError::Service {
            code: code.map(ToOwned::to_owned),
            message,
        },
    }
}
