//! Storage abstraction trait

use async_trait::async_trait;
use std::pin::Pin;
use std::time::Duration;
use thiserror::Error;
use tokio::io::AsyncRead;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// The upload pipeline computes keys up front and hands the backend a reader
/// over staged bytes, so backends never buffer whole payloads by contract.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// The bucket objects are placed in.
    fn bucket(&self) -> &str;

    /// Upload the reader's content under `key`, tagging the stored object
    /// with `content_type`. `content_length` is the exact payload size.
    async fn put_stream(
        &self,
        key: &str,
        content_type: &str,
        content_length: u64,
        reader: Pin<Box<dyn AsyncRead + Send + Unpin>>,
    ) -> StorageResult<()>;

    /// Publicly addressable URL for `key` in this store's bucket.
    fn public_url(&self, key: &str) -> String {
        self.public_url_in(self.bucket(), key)
    }

    /// Publicly addressable URL for `key` in `bucket`, assuming the bucket
    /// is served by the same endpoint and region as this store. Records keep
    /// the bucket they were written to, so resolution must honor it even if
    /// the configured bucket has since changed.
    fn public_url_in(&self, bucket: &str, key: &str) -> String;

    /// Generate a presigned/temporary URL for direct access (GET)
    async fn presigned_get_url(&self, key: &str, expires_in: Duration) -> StorageResult<String>;
}
