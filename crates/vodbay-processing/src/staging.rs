//! Request-scoped staging of upload payloads.

use std::path::{Path, PathBuf};
use std::pin::Pin;
use tempfile::{NamedTempFile, TempPath};
use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncSeekExt, AsyncWriteExt};

use vodbay_core::AppError;

/// A durable temporary file holding upload bytes or a derived artifact.
///
/// The backing file is deleted when the artifact is dropped, so every exit
/// path of a request cleans up after itself. After the last `write_chunk`,
/// callers must `rewind()` before handing the path to an external tool or
/// opening a `reader()`, so buffered writes reach the file first.
#[derive(Debug)]
pub struct StagedArtifact {
    file: File,
    path: TempPath,
    len: u64,
    limit: Option<u64>,
}

impl StagedArtifact {
    /// Create an empty artifact, in `dir` when given, otherwise in the
    /// system temp directory. Writes past `limit` bytes are rejected.
    pub async fn create_in(dir: Option<&Path>, limit: u64) -> Result<Self, AppError> {
        let tempfile = match dir {
            Some(dir) => NamedTempFile::new_in(dir),
            None => NamedTempFile::new(),
        }
        .map_err(|e| AppError::Staging(format!("Failed to create staging file: {}", e)))?;

        let (std_file, path) = tempfile.into_parts();
        Ok(Self {
            file: File::from_std(std_file),
            path,
            len: 0,
            limit: Some(limit),
        })
    }

    /// Take ownership of an existing file produced by an external tool.
    /// The file is deleted when the returned artifact drops.
    pub async fn adopt(path: PathBuf) -> Result<Self, AppError> {
        let file = File::open(&path)
            .await
            .map_err(|e| AppError::Staging(format!("Failed to open staged file: {}", e)))?;
        let len = file
            .metadata()
            .await
            .map_err(|e| AppError::Staging(format!("Failed to stat staged file: {}", e)))?
            .len();

        Ok(Self {
            file,
            path: TempPath::from_path(path),
            len,
            limit: None,
        })
    }

    pub async fn write_chunk(&mut self, chunk: &[u8]) -> Result<(), AppError> {
        let new_len = self.len + chunk.len() as u64;
        if let Some(limit) = self.limit {
            if new_len > limit {
                return Err(AppError::Staging(format!(
                    "Staged payload exceeds limit of {} bytes",
                    limit
                )));
            }
        }

        self.file
            .write_all(chunk)
            .await
            .map_err(|e| AppError::Staging(format!("Failed to write staged content: {}", e)))?;
        self.len = new_len;
        Ok(())
    }

    /// Flush pending writes and move the cursor back to the start.
    pub async fn rewind(&mut self) -> Result<(), AppError> {
        self.file
            .flush()
            .await
            .map_err(|e| AppError::Staging(format!("Failed to flush staged content: {}", e)))?;
        self.file
            .rewind()
            .await
            .map_err(|e| AppError::Staging(format!("Failed to rewind staged file: {}", e)))?;
        Ok(())
    }

    /// A fresh read handle over the full staged content.
    pub async fn reader(&self) -> Result<Pin<Box<dyn AsyncRead + Send + Unpin>>, AppError> {
        let file = File::open(&self.path)
            .await
            .map_err(|e| AppError::Staging(format!("Failed to reopen staged file: {}", e)))?;
        Ok(Box::pin(file))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;

    #[tokio::test]
    async fn test_write_rewind_read_round_trip() {
        let mut staged = StagedArtifact::create_in(None, 1024).await.unwrap();
        staged.write_chunk(b"hello ").await.unwrap();
        staged.write_chunk(b"world").await.unwrap();
        staged.rewind().await.unwrap();

        assert_eq!(staged.len(), 11);

        let mut reader = staged.reader().await.unwrap();
        let mut content = Vec::new();
        reader.read_to_end(&mut content).await.unwrap();
        assert_eq!(content, b"hello world");
    }

    #[tokio::test]
    async fn test_limit_is_enforced() {
        let mut staged = StagedArtifact::create_in(None, 8).await.unwrap();
        staged.write_chunk(b"12345").await.unwrap();

        let err = staged.write_chunk(b"67890").await.unwrap_err();
        assert!(matches!(err, AppError::Staging(_)));
        // The artifact stays usable up to what was accepted.
        assert_eq!(staged.len(), 5);
    }

    #[tokio::test]
    async fn test_file_removed_on_drop() {
        let staged = StagedArtifact::create_in(None, 64).await.unwrap();
        let path = staged.path().to_path_buf();
        assert!(path.exists());

        drop(staged);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_adopt_owns_and_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.processing");
        tokio::fs::write(&path, b"remuxed bytes").await.unwrap();

        let staged = StagedArtifact::adopt(path.clone()).await.unwrap();
        assert_eq!(staged.len(), 13);
        assert_eq!(staged.path(), path.as_path());

        drop(staged);
        assert!(!path.exists());
    }
}
