use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{
    AudioExtractor, IngestError, NormalizationError, SourceNormalizer, TranscriptionEngine,
};
use crate::domain::{NormalizationOptions, NormalizedText, Source};

/// Turns a recorded lecture into a transcript.
///
/// The transcript is returned as produced by the engine. It is not run
/// through the noise filter that document text goes through.
pub struct MediaNormalizer {
    extractor: Arc<dyn AudioExtractor>,
    engine: Arc<dyn TranscriptionEngine>,
}

impl MediaNormalizer {
    pub fn new(extractor: Arc<dyn AudioExtractor>, engine: Arc<dyn TranscriptionEngine>) -> Self {
        Self { extractor, engine }
    }
}

#[async_trait]
impl SourceNormalizer for MediaNormalizer {
    #[tracing::instrument(
        skip(self, source, options),
        fields(
            invocation_id = %source.invocation_id,
            size_bytes = source.size_bytes(),
            speed_factor = %options.speed_factor,
        )
    )]
    async fn normalize(
        &self,
        source: &Source,
        options: &NormalizationOptions,
    ) -> Result<NormalizedText, NormalizationError> {
        let work_dir = tempfile::Builder::new()
            .prefix(&format!("lecturelens-{}-", source.invocation_id))
            .tempdir()
            .map_err(IngestError::Staging)?;

        let media_path = work_dir.path().join("source.media");
        tokio::fs::write(&media_path, source.data())
            .await
            .map_err(IngestError::Staging)?;

        let audio_path = self
            .extractor
            .extract_audio(&media_path, work_dir.path(), options.speed_factor)
            .await
            .map_err(IngestError::from)?;

        let transcript = self.engine.transcribe(&audio_path).await?;

        if transcript.trim().is_empty() {
            tracing::warn!("Transcription produced no text");
        } else {
            tracing::info!(chars = transcript.len(), "Media transcribed");
        }

        Ok(NormalizedText::new(transcript))
    }
}
