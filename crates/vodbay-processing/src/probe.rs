//! Media inspection via an external structural probe.

use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

use vodbay_core::AppError;

/// Dimensions reported for the first stream of a staged media file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaInfo {
    pub width: u32,
    pub height: u32,
    pub codec: Option<String>,
}

/// Extracts structural facts from staged media.
#[async_trait]
pub trait MediaInspector: Send + Sync {
    async fn inspect(&self, path: &Path) -> Result<MediaInfo, AppError>;
}

/// Inspector backed by the ffprobe binary.
pub struct FfprobeInspector {
    ffprobe_path: String,
    timeout: Option<Duration>,
}

impl FfprobeInspector {
    pub fn new(ffprobe_path: String, timeout_secs: Option<u64>) -> Self {
        Self {
            ffprobe_path,
            timeout: timeout_secs.map(Duration::from_secs),
        }
    }
}

#[async_trait]
impl MediaInspector for FfprobeInspector {
    #[tracing::instrument(skip(self), fields(
        process.executable.path = %self.ffprobe_path,
        ffmpeg.operation = "probe"
    ))]
    async fn inspect(&self, path: &Path) -> Result<MediaInfo, AppError> {
        let start = std::time::Instant::now();

        let mut command = Command::new(&self.ffprobe_path);
        command
            .args(["-v", "error", "-print_format", "json", "-show_streams"])
            .arg(path)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, command.output())
                .await
                .map_err(|_| {
                    AppError::Inspection(format!(
                        "ffprobe timed out after {}s",
                        timeout.as_secs()
                    ))
                })?,
            None => command.output().await,
        }
        .map_err(|e| AppError::Inspection(format!("Failed to execute ffprobe: {}", e)))?;

        if !output.status.success() {
            return Err(AppError::Inspection(format!(
                "ffprobe failed: {}",
                String::from_utf8_lossy(&output.stderr)
            )));
        }

        let info = decode_probe_output(&output.stdout)?;

        tracing::info!(
            width = info.width,
            height = info.height,
            codec = info.codec.as_deref().unwrap_or("unknown"),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Media probe completed"
        );

        Ok(info)
    }
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    width: Option<i64>,
    height: Option<i64>,
    codec_name: Option<String>,
}

/// Decode the probe tool's JSON into a descriptor.
///
/// Kept separate from the subprocess plumbing so canned tool output can
/// drive it directly in tests. A descriptor with no streams is an error;
/// a first stream without dimensions (audio, for instance) reports 0x0.
fn decode_probe_output(raw: &[u8]) -> Result<MediaInfo, AppError> {
    let probe: ProbeOutput = serde_json::from_slice(raw)
        .map_err(|e| AppError::Inspection(format!("Failed to parse probe output: {}", e)))?;

    let stream = probe
        .streams
        .first()
        .ok_or_else(|| AppError::Inspection("Probe output contains no streams".to_string()))?;

    Ok(MediaInfo {
        width: dimension(stream.width),
        height: dimension(stream.height),
        codec: stream.codec_name.clone(),
    })
}

fn dimension(value: Option<i64>) -> u32 {
    value.and_then(|v| u32::try_from(v).ok()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_video_stream() {
        let raw = br#"{
            "streams": [
                {
                    "index": 0,
                    "codec_name": "h264",
                    "codec_type": "video",
                    "width": 1920,
                    "height": 1080,
                    "pix_fmt": "yuv420p",
                    "r_frame_rate": "30/1"
                },
                {
                    "index": 1,
                    "codec_name": "aac",
                    "codec_type": "audio"
                }
            ]
        }"#;

        let info = decode_probe_output(raw).unwrap();
        assert_eq!(info.width, 1920);
        assert_eq!(info.height, 1080);
        assert_eq!(info.codec.as_deref(), Some("h264"));
    }

    #[test]
    fn test_decode_zero_streams_errors() {
        let err = decode_probe_output(br#"{"streams": []}"#).unwrap_err();
        assert!(matches!(err, AppError::Inspection(_)));

        let err = decode_probe_output(br#"{}"#).unwrap_err();
        assert!(matches!(err, AppError::Inspection(_)));
    }

    #[test]
    fn test_decode_dimensionless_stream_reports_zero() {
        let raw = br#"{"streams": [{"index": 0, "codec_name": "aac", "codec_type": "audio"}]}"#;
        let info = decode_probe_output(raw).unwrap();
        assert_eq!(info.width, 0);
        assert_eq!(info.height, 0);
    }

    #[test]
    fn test_decode_malformed_output_errors() {
        let err = decode_probe_output(b"not json at all").unwrap_err();
        assert!(matches!(err, AppError::Inspection(_)));
    }

    #[tokio::test]
    async fn test_missing_tool_fails() {
        let inspector = FfprobeInspector::new("/nonexistent/ffprobe-bin".to_string(), None);
        let err = inspector.inspect(Path::new("/tmp/input.mp4")).await.unwrap_err();
        assert!(matches!(err, AppError::Inspection(_)));
    }
}
