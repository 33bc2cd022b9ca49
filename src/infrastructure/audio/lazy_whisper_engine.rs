use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};

use super::candle_whisper_engine::CandleWhisperEngine;

/// Defers loading the local Whisper model until the first transcription.
///
/// Loading happens once per process on a blocking thread; concurrent first
/// calls wait for the same load. A failed load is not cached, so the next
/// call tries again.
pub struct LazyWhisperEngine {
    model_id: String,
    engine: OnceCell<Arc<CandleWhisperEngine>>,
}

impl LazyWhisperEngine {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            engine: OnceCell::new(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.engine.initialized()
    }

    async fn engine(&self) -> Result<&Arc<CandleWhisperEngine>, TranscriptionError> {
        self.engine
            .get_or_try_init(|| async {
                let model_id = self.model_id.clone();
                tracing::info!(model = %model_id, "Loading local Whisper model on first use");
                tokio::task::spawn_blocking(move || CandleWhisperEngine::new(&model_id))
                    .await
                    .map_err(|e| TranscriptionError::ModelLoadFailed(format!("task join: {e}")))?
                    .map(Arc::new)
            })
            .await
    }
}

#[async_trait]
impl TranscriptionEngine for LazyWhisperEngine {
    async fn transcribe(&self, audio_path: &Path) -> Result<String, TranscriptionError> {
        self.engine().await?.transcribe(audio_path).await
    }
}
