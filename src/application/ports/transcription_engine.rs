use std::path::Path;

use async_trait::async_trait;

/// A speech-to-text capability working on an audio artifact on disk.
#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    async fn transcribe(&self, audio_path: &Path) -> Result<String, TranscriptionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("audio decoding failed: {0}")]
    DecodingFailed(String),
    #[error("transcription failed: {0}")]
    TranscriptionFailed(String),
    #[error("unsupported audio format: {0}")]
    UnsupportedFormat(String),
    #[error("model loading failed: {0}")]
    ModelLoadFailed(String),
    #[error("transcription unavailable: {0}")]
    Unavailable(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("audio artifact unreadable: {0}")]
    Io(#[from] std::io::Error),
}
