use std::sync::Arc;

use serde::Serialize;
use tracing::Instrument;

use crate::application::ports::{
    IngestError, NormalizationError, SourceNormalizer, TranscriptionError,
};
use crate::domain::{NormalizationOptions, PipelineResult, Source, SourceKind, UnsupportedKind};

use super::transformation_chain::{GenerationError, TransformationChain};

/// Single entry point: normalize a source, run the chain, hand back the two
/// output texts. Either both texts come back or one consolidated error.
pub struct PipelineService {
    normalizer: Arc<dyn SourceNormalizer>,
    chain: TransformationChain,
}

impl PipelineService {
    pub fn new(
        normalizer: Arc<dyn SourceNormalizer>,
        chain: TransformationChain,
    ) -> Self {
        Self { normalizer, chain }
    }

    /// Runs the pipeline on raw bytes declared as `kind` (`"document"` or
    /// `"media"`). `None` options fall back to the defaults for the kind.
    pub async fn run_pipeline(
        &self,
        data: Vec<u8>,
        kind: &str,
        options: Option<NormalizationOptions>,
    ) -> Result<PipelineResult, PipelineError> {
        let kind: SourceKind = kind.parse()?;
        let options = options.unwrap_or_else(|| NormalizationOptions::for_kind(kind));
        self.run(Source::new(data, kind), options).await
    }

    pub async fn run(
        &self,
        source: Source,
        options: NormalizationOptions,
    ) -> Result<PipelineResult, PipelineError> {
        let span = tracing::info_span!(
            "pipeline",
            invocation_id = %source.invocation_id,
            kind = %source.kind,
            size_bytes = source.size_bytes(),
        );

        async move {
            let result = self.execute(&source, &options).await;
            match &result {
                Ok(output) => tracing::info!(
                    summary_chars = output.summary.len(),
                    questions_chars = output.questions.len(),
                    "Pipeline run complete"
                ),
                Err(e) => tracing::error!(kind = e.kind().as_str(), error = %e, "Pipeline run failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn execute(
        &self,
        source: &Source,
        options: &NormalizationOptions,
    ) -> Result<PipelineResult, PipelineError> {
        let text = self.normalizer.normalize(source, options).await?;

        tracing::info!(
            chars = text.char_count(),
            recovery_failures = text.recovery_failures().len(),
            "Source normalized"
        );

        let artifact = self.chain.run(&text).await?;

        Ok(artifact.into())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("ingest failed: {0}")]
    Ingest(IngestError),
    #[error(transparent)]
    UnsupportedKind(#[from] UnsupportedKind),
    #[error("transcription failed: {0}")]
    Transcription(TranscriptionError),
    #[error("generation failed: {0}")]
    Generation(#[from] GenerationError),
}

impl From<NormalizationError> for PipelineError {
    fn from(error: NormalizationError) -> Self {
        match error {
            NormalizationError::Ingest(e) => Self::Ingest(e),
            NormalizationError::UnsupportedKind(e) => Self::UnsupportedKind(e),
            NormalizationError::Transcription(e) => Self::Transcription(e),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineErrorKind {
    Ingest,
    UnsupportedKind,
    Transcription,
    Generation,
}

impl PipelineErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ingest => "ingest",
            Self::UnsupportedKind => "unsupported_kind",
            Self::Transcription => "transcription",
            Self::Generation => "generation",
        }
    }
}

/// What a caller is shown when a run fails.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorReport {
    pub kind: PipelineErrorKind,
    pub message: String,
}

impl PipelineError {
    pub fn kind(&self) -> PipelineErrorKind {
        match self {
            Self::Ingest(_) => PipelineErrorKind::Ingest,
            Self::UnsupportedKind(_) => PipelineErrorKind::UnsupportedKind,
            Self::Transcription(_) => PipelineErrorKind::Transcription,
            Self::Generation(_) => PipelineErrorKind::Generation,
        }
    }

    pub fn report(&self) -> ErrorReport {
        ErrorReport {
            kind: self.kind(),
            message: self.to_string(),
        }
    }
}
