//! In-memory object storage double recording every put.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};

use vodbay_storage::{ObjectStorage, StorageError, StorageResult};

/// Object captured by the in-memory store.
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub content_type: String,
    pub data: Vec<u8>,
}

pub struct InMemoryStorage {
    bucket: String,
    objects: Mutex<HashMap<String, StoredObject>>,
    fail: AtomicBool,
}

impl InMemoryStorage {
    pub fn new(bucket: &str) -> Self {
        Self {
            bucket: bucket.to_string(),
            objects: Mutex::new(HashMap::new()),
            fail: AtomicBool::new(false),
        }
    }

    /// Make every subsequent put fail with an upload error.
    pub fn fail_puts(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    pub fn object(&self, key: &str) -> Option<StoredObject> {
        self.objects.lock().unwrap().get(key).cloned()
    }

    pub fn keys(&self) -> Vec<String> {
        self.objects.lock().unwrap().keys().cloned().collect()
    }

    pub fn object_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }
}

#[async_trait]
impl ObjectStorage for InMemoryStorage {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn put_stream(
        &self,
        key: &str,
        content_type: &str,
        content_length: u64,
        mut reader: Pin<Box<dyn AsyncRead + Send + Unpin>>,
    ) -> StorageResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(StorageError::UploadFailed(
                "injected put failure".to_string(),
            ));
        }

        let mut data = Vec::with_capacity(content_length as usize);
        reader.read_to_end(&mut data).await?;

        self.objects.lock().unwrap().insert(
            key.to_string(),
            StoredObject {
                content_type: content_type.to_string(),
                data,
            },
        );
        Ok(())
    }

    fn public_url_in(&self, bucket: &str, key: &str) -> String {
        format!("https://{}.objects.test/{}", bucket, key)
    }

    async fn presigned_get_url(&self, key: &str, expires_in: Duration) -> StorageResult<String> {
        Ok(format!(
            "https://{}.objects.test/{}?X-Amz-Expires={}&X-Amz-Signature=test",
            self.bucket,
            key,
            expires_in.as_secs()
        ))
    }
}
