//! Container remuxing for progressive playback.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

use crate::staging::StagedArtifact;
use vodbay_core::AppError;

/// Rewrites a video container with stream-copy semantics so playback can
/// start before the full download completes.
#[async_trait]
pub trait Remuxer: Send + Sync {
    /// Produce a faststart MP4 next to `input` and return it as a staged
    /// artifact. The input file is left untouched; the output is a second
    /// resource with its own cleanup.
    async fn remux_faststart(&self, input: &Path) -> Result<StagedArtifact, AppError>;
}

/// Remuxer backed by the ffmpeg binary.
pub struct FastStartRemuxer {
    ffmpeg_path: String,
    timeout: Option<Duration>,
}

impl FastStartRemuxer {
    pub fn new(ffmpeg_path: String, timeout_secs: Option<u64>) -> Self {
        Self {
            ffmpeg_path,
            timeout: timeout_secs.map(Duration::from_secs),
        }
    }

    async fn run_tool(&self, input: &Path, output_path: &Path) -> Result<(), AppError> {
        let mut command = Command::new(&self.ffmpeg_path);
        command
            .arg("-i")
            .arg(input)
            .args(["-c", "copy", "-movflags", "faststart", "-f", "mp4"])
            .arg(output_path)
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, command.output())
                .await
                .map_err(|_| {
                    AppError::Remux(format!("ffmpeg timed out after {}s", timeout.as_secs()))
                })?,
            None => command.output().await,
        }
        .map_err(|e| AppError::Remux(format!("Failed to execute ffmpeg: {}", e)))?;

        if !output.status.success() {
            return Err(AppError::Remux(format!(
                "ffmpeg failed: {}",
                String::from_utf8_lossy(&output.stderr)
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl Remuxer for FastStartRemuxer {
    #[tracing::instrument(skip(self), fields(
        process.executable.path = %self.ffmpeg_path,
        ffmpeg.operation = "remux"
    ))]
    async fn remux_faststart(&self, input: &Path) -> Result<StagedArtifact, AppError> {
        let output_path = sibling_output_path(input);
        let start = std::time::Instant::now();

        if let Err(e) = self.run_tool(input, &output_path).await {
            // ffmpeg can leave a partial output behind on failure.
            let _ = tokio::fs::remove_file(&output_path).await;
            return Err(e);
        }

        let artifact = match StagedArtifact::adopt(output_path.clone()).await {
            Ok(artifact) => artifact,
            Err(e) => {
                let _ = tokio::fs::remove_file(&output_path).await;
                return Err(e);
            }
        };

        tracing::info!(
            size_bytes = artifact.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Remux completed"
        );

        Ok(artifact)
    }
}

fn sibling_output_path(input: &Path) -> PathBuf {
    let mut raw = input.as_os_str().to_os_string();
    raw.push(".processing");
    PathBuf::from(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sibling_output_path() {
        let output = sibling_output_path(Path::new("/tmp/upload-abc123"));
        assert_eq!(output, PathBuf::from("/tmp/upload-abc123.processing"));
    }

    #[tokio::test]
    async fn test_missing_tool_fails_and_leaves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input");
        tokio::fs::write(&input, b"not really a video").await.unwrap();

        let remuxer = FastStartRemuxer::new("/nonexistent/ffmpeg-bin".to_string(), None);
        let err = remuxer.remux_faststart(&input).await.unwrap_err();

        assert!(matches!(err, AppError::Remux(_)));
        assert!(!sibling_output_path(&input).exists());
        // The input stays in place for the caller to clean up.
        assert!(input.exists());
    }
}
