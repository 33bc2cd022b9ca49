use std::sync::Arc;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};

use super::lazy_whisper_engine::LazyWhisperEngine;
use super::unavailable_transcription_engine::UnavailableTranscriptionEngine;
use super::whisper_api_engine::WhisperApiEngine;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TranscriptionProvider {
    Local,
    OpenAi,
    Azure,
}

impl TryFrom<&str> for TranscriptionProvider {
    type Error = TranscriptionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "local" | "candle" => Ok(Self::Local),
            "openai" => Ok(Self::OpenAi),
            "azure" => Ok(Self::Azure),
            other => Err(TranscriptionError::ModelLoadFailed(format!(
                "unknown transcription provider: {other}. Expected: local, openai, or azure"
            ))),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AzureDeployment {
    pub endpoint: String,
    pub deployment: String,
    pub api_version: String,
}

pub struct TranscriptionEngineFactory;

impl TranscriptionEngineFactory {
    /// Builds the engine for `provider`. A hosted provider missing its
    /// credentials yields an engine that fails each media run instead.
    pub fn create(
        provider: TranscriptionProvider,
        model: &str,
        api_key: Option<String>,
        base_url: Option<String>,
        azure: Option<AzureDeployment>,
    ) -> Arc<dyn TranscriptionEngine> {
        let api_key = api_key.filter(|key| !key.trim().is_empty());

        match (provider, api_key, azure) {
            (TranscriptionProvider::Local, _, _) => Arc::new(LazyWhisperEngine::new(model)),
            (TranscriptionProvider::OpenAi, Some(key), _) => Arc::new(WhisperApiEngine::openai(
                key,
                base_url,
                Some(model.to_string()),
            )),
            (TranscriptionProvider::Azure, Some(key), Some(deployment)) => {
                Arc::new(WhisperApiEngine::azure(
                    &deployment.endpoint,
                    &deployment.deployment,
                    &key,
                    &deployment.api_version,
                ))
            }
            (TranscriptionProvider::OpenAi, None, _) => {
                unavailable("API key required for OpenAI Whisper")
            }
            (TranscriptionProvider::Azure, None, _) => {
                unavailable("API key required for Azure OpenAI Whisper")
            }
            (TranscriptionProvider::Azure, Some(_), None) => {
                unavailable("endpoint and deployment required for Azure OpenAI Whisper")
            }
        }
    }
}

fn unavailable(reason: &str) -> Arc<dyn TranscriptionEngine> {
    tracing::warn!(reason, "Transcription not configured, media sources will fail");
    Arc::new(UnavailableTranscriptionEngine::new(reason))
}
