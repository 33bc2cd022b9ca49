use std::path::Path;

use async_trait::async_trait;
use reqwest::multipart;
use serde::Deserialize;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const OPENAI_MODEL: &str = "whisper-1";

enum Credential {
    Bearer(String),
    /// Azure OpenAI takes the key in an `api-key` header.
    ApiKeyHeader(String),
}

/// Hosted Whisper behind the OpenAI `audio/transcriptions` contract, either
/// on api.openai.com (or a compatible server) or as an Azure deployment.
pub struct WhisperApiEngine {
    client: reqwest::Client,
    endpoint: String,
    credential: Credential,
    /// Sent as the `model` field. Azure selects the model by deployment.
    model: Option<String>,
}

impl WhisperApiEngine {
    pub fn openai(api_key: String, base_url: Option<String>, model: Option<String>) -> Self {
        let base_url = base_url.unwrap_or_else(|| OPENAI_BASE_URL.to_string());
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}/audio/transcriptions", base_url.trim_end_matches('/')),
            credential: Credential::Bearer(api_key),
            model: Some(model.unwrap_or_else(|| OPENAI_MODEL.to_string())),
        }
    }

    pub fn azure(endpoint: &str, deployment: &str, api_key: &str, api_version: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!(
                "{}/openai/deployments/{deployment}/audio/transcriptions?api-version={api_version}",
                endpoint.trim_end_matches('/'),
            ),
            credential: Credential::ApiKeyHeader(api_key.to_string()),
            model: None,
        }
    }
}

#[derive(Deserialize)]
struct TranscriptionResponse {
    text: String,
}

/// Multipart `file` part for an audio artifact, typed by its extension.
async fn audio_file_part(audio_path: &Path) -> Result<multipart::Part, TranscriptionError> {
    let extension = audio_path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_lowercase();
    let mime = match extension.as_str() {
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "m4a" => "audio/mp4",
        other => {
            return Err(TranscriptionError::UnsupportedFormat(format!(
                "audio artifact extension: {other:?}"
            )));
        }
    };

    let audio_data = tokio::fs::read(audio_path).await?;
    tracing::debug!(bytes = audio_data.len(), mime, "Audio artifact loaded for upload");

    multipart::Part::bytes(audio_data)
        .file_name(format!("audio.{extension}"))
        .mime_str(mime)
        .map_err(|e| TranscriptionError::ApiRequestFailed(format!("mime: {e}")))
}

#[async_trait]
impl TranscriptionEngine for WhisperApiEngine {
    #[tracing::instrument(skip(self), fields(model = self.model.as_deref().unwrap_or("deployment")))]
    async fn transcribe(&self, audio_path: &Path) -> Result<String, TranscriptionError> {
        let mut form = multipart::Form::new()
            .text("response_format", "json")
            .part("file", audio_file_part(audio_path).await?);
        if let Some(model) = &self.model {
            form = form.text("model", model.clone());
        }

        let request = self.client.post(&self.endpoint).multipart(form);
        let request = match &self.credential {
            Credential::Bearer(key) => request.bearer_auth(key),
            Credential::ApiKeyHeader(key) => request.header("api-key", key),
        };

        let response = request
            .send()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("request: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(TranscriptionError::ApiRequestFailed(format!(
                "status {status}: {body}"
            )));
        }

        let result: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("parse response: {e}")))?;

        tracing::info!(chars = result.text.len(), "Whisper API transcription completed");

        Ok(result.text.trim().to_string())
    }
}
