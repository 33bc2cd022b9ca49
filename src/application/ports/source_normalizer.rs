use async_trait::async_trait;

use crate::domain::{NormalizationOptions, NormalizedText, Source, UnsupportedKind};

use super::{AudioExtractionError, DocumentParseError, TranscriptionError};

/// Turns a [`Source`] into plain text.
#[async_trait]
pub trait SourceNormalizer: Send + Sync {
    async fn normalize(
        &self,
        source: &Source,
        options: &NormalizationOptions,
    ) -> Result<NormalizedText, NormalizationError>;
}

#[derive(Debug, thiserror::Error)]
pub enum NormalizationError {
    #[error("ingest: {0}")]
    Ingest(#[from] IngestError),
    #[error(transparent)]
    UnsupportedKind(#[from] UnsupportedKind),
    #[error("transcription: {0}")]
    Transcription(#[from] TranscriptionError),
}

/// The source could not be read as the kind it was declared as.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to stage source on disk: {0}")]
    Staging(#[source] std::io::Error),
    #[error("{0}")]
    Document(#[from] DocumentParseError),
    #[error("no extractable text found")]
    NoTextFound,
    #[error("{0}")]
    Audio(#[from] AudioExtractionError),
    #[error("extraction timed out")]
    TimedOut,
    #[error("extraction task failed: {0}")]
    TaskFailed(String),
}
