//! Event model, storage seam, and handler pipeline for S3 object quarantine.
//!
//! A security finding (an Amazon Macie finding delivered through EventBridge)
//! names one S3 object. The [`QuarantineHandler`] copies that object into a
//! fixed quarantine bucket under the same key and then deletes the original.
//!
//! # Architecture
//!
//! ```text
//! Lambda runtime (apps/quarantine-lambda)
//!        |
//!        v
//! QuarantineHandler (extract -> copy -> verify? -> delete -> report)
//!        |
//!        v
//!   ObjectStore (S3ObjectStore | MemoryObjectStore)
//! ```
//!
//! # Examples
//!
//! ```
//! use quarantine_core::{MemoryObjectStore, OperationResult, QuarantineConfig, QuarantineHandler};
//!
//! # tokio_test_block(async {
//! let store = MemoryObjectStore::new();
//! store.put_object("evidence-bucket", "malware.exe", &b"MZ"[..]);
//! store.create_bucket("quarantine-demo-bucket");
//!
//! let config = QuarantineConfig::builder()
//!     .quarantine_bucket("quarantine-demo-bucket")
//!     .build();
//! let handler = QuarantineHandler::new(store, config);
//!
//! let event = serde_json::json!({
//!     "detail": {
//!         "resourcesAffected": {
//!             "s3Bucket": { "name": "evidence-bucket" },
//!             "s3Object": { "key": "malware.exe" }
//!         }
//!     }
//! });
//! let result = handler.handle(&event).await;
//! assert_eq!(
//!     result,
//!     OperationResult::Success {
//!         quarantined_file: "s3://quarantine-demo-bucket/malware.exe".to_owned(),
//!     }
//! );
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

pub mod config;
pub mod error;
pub mod event;
pub mod handler;
pub mod location;
pub mod result;
pub mod storage;

pub use config::{LogFormat, QuarantineConfig};
pub use error::{ErrorKind, QuarantineError, QuarantineResult, StorageError};
pub use event::FindingEvent;
pub use handler::QuarantineHandler;
pub use location::ObjectLocation;
pub use result::{OperationResult, QuarantinedObject};
pub use storage::{MemoryObjectStore, ObjectStore, S3ObjectStore, StorageCall};
