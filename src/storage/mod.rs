//! Object storage for downloaded images and the metadata export.
//!
//! Backends implement [`ObjectStore`]; the run only ever creates one bucket
//! and puts whole files into it.

pub mod local;
pub mod s3;

use crate::logging::{log, LogLevel};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

pub use local::LocalStore;
pub use s3::S3Store;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid bucket name: {0}")]
    InvalidBucket(String),

    #[error("bucket not found: {0}")]
    BucketNotFound(String),

    #[error("io error: {0}")]
    Io(String),

    #[error("backend error: {0}")]
    Backend(String),
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e.to_string())
    }
}

/// Outcome of a bucket create call that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketStatus {
    Created,
    AlreadyExists,
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Creates `bucket`. An existing bucket is reported as
    /// [`BucketStatus::AlreadyExists`], not as an error.
    async fn create_bucket(
        &self,
        bucket: &str,
        region: Option<&str>,
    ) -> Result<BucketStatus, StorageError>;

    /// Uploads the file at `path` as object `key`.
    async fn put_file(&self, bucket: &str, key: &str, path: &Path) -> Result<(), StorageError>;
}

/// Which backend a run uploads to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreTarget {
    /// `region: None` leaves region resolution to the AWS provider chain.
    S3 {
        region: Option<String>,
        endpoint: Option<String>,
    },
    Local(PathBuf),
}

impl StoreTarget {
    pub async fn open(self) -> Arc<dyn ObjectStore> {
        match self {
            StoreTarget::S3 { region, endpoint } => {
                log(
                    LogLevel::Info,
                    &format!(
                        "Using S3 store (region {}{})",
                        region.as_deref().unwrap_or("from provider chain"),
                        endpoint
                            .as_deref()
                            .map(|e| format!(", endpoint {}", e))
                            .unwrap_or_default()
                    ),
                );
                Arc::new(S3Store::connect(region.as_deref(), endpoint.as_deref()).await)
            }
            StoreTarget::Local(root) => {
                log(
                    LogLevel::Info,
                    &format!("Using local store at {}", root.display()),
                );
                Arc::new(LocalStore::new(root))
            }
        }
    }
}

/// Creates the bucket if needed. Failures are logged and reported as `false`.
pub async fn ensure_bucket(store: &dyn ObjectStore, bucket: &str, region: Option<&str>) -> bool {
    match store.create_bucket(bucket, region).await {
        Ok(BucketStatus::Created) => {
            log(LogLevel::Success, &format!("Created bucket '{}'", bucket));
            true
        }
        Ok(BucketStatus::AlreadyExists) => {
            log(
                LogLevel::Info,
                &format!("Bucket '{}' already exists, reusing it", bucket),
            );
            true
        }
        Err(e) => {
            log(
                LogLevel::Error,
                &format!("Bucket setup for '{}' failed: {}", bucket, e),
            );
            false
        }
    }
}
