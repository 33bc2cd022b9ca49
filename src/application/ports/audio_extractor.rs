use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::SpeedFactor;

/// Pulls the audio track out of a media file, optionally changing its
/// playback rate, and writes it into `work_dir`.
#[async_trait]
pub trait AudioExtractor: Send + Sync {
    async fn extract_audio(
        &self,
        media_path: &Path,
        work_dir: &Path,
        speed_factor: SpeedFactor,
    ) -> Result<PathBuf, AudioExtractionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AudioExtractionError {
    #[error("ffmpeg binary not available: {0}")]
    ToolUnavailable(String),
    #[error("no audio track found")]
    NoAudioTrack,
    #[error("audio extraction failed: {0}")]
    ExtractionFailed(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
