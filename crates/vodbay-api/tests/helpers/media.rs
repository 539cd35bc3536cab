//! Canned doubles behind the media processing traits.

#![allow(dead_code)]

use async_trait::async_trait;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use vodbay_core::AppError;
use vodbay_processing::{MediaInfo, MediaInspector, Remuxer, StagedArtifact};

/// Inspector reporting preset dimensions, or a preset failure.
pub struct FixedInspector {
    result: Mutex<Result<MediaInfo, String>>,
}

impl FixedInspector {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            result: Mutex::new(Ok(MediaInfo {
                width,
                height,
                codec: Some("h264".to_string()),
            })),
        }
    }

    /// 1920x1080, the classifier's landscape case.
    pub fn landscape() -> Self {
        Self::new(1920, 1080)
    }

    pub fn set_dimensions(&self, width: u32, height: u32) {
        *self.result.lock().unwrap() = Ok(MediaInfo {
            width,
            height,
            codec: Some("h264".to_string()),
        });
    }

    /// Make every subsequent inspection fail.
    pub fn fail_inspections(&self, message: &str) {
        *self.result.lock().unwrap() = Err(message.to_string());
    }
}

#[async_trait]
impl MediaInspector for FixedInspector {
    async fn inspect(&self, _path: &Path) -> Result<MediaInfo, AppError> {
        self.result
            .lock()
            .unwrap()
            .clone()
            .map_err(AppError::Inspection)
    }
}

/// Remuxer writing canned output next to the input, like the real tool.
pub struct CannedRemuxer {
    output: Vec<u8>,
    fail: AtomicBool,
}

impl CannedRemuxer {
    pub fn new(output: &[u8]) -> Self {
        Self {
            output: output.to_vec(),
            fail: AtomicBool::new(false),
        }
    }

    /// Make every subsequent remux fail.
    pub fn fail_remuxes(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl Remuxer for CannedRemuxer {
    async fn remux_faststart(&self, input: &Path) -> Result<StagedArtifact, AppError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::Remux("injected remux failure".to_string()));
        }

        let mut artifact = StagedArtifact::create_in(input.parent(), u64::MAX).await?;
        artifact.write_chunk(&self.output).await?;
        artifact.rewind().await?;
        Ok(artifact)
    }
}
