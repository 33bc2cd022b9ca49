use std::time::Duration;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use reqwest::Client;
use serde::Deserialize;

use crate::application::ports::{EmbeddedImage, ImageTextRecognizer, RecognitionError};

pub const OCR_PROMPT: &str = "Transcribe all text visible in this image exactly as written. \
Preserve line breaks and reading order. Output only the transcribed text, with no commentary. \
If the image contains no text, output nothing.";

/// Image text recovery through a vision model served behind an
/// OpenAI-compatible chat endpoint (LM Studio, vLLM, Ollama).
pub struct VlmImageRecognizer {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl VlmImageRecognizer {
    pub const VLM_TIMEOUT: Duration = Duration::from_secs(300);

    pub fn new(base_url: &str, model: &str, api_key: &str) -> Result<Self, RecognitionError> {
        let client = Client::builder()
            .timeout(Self::VLM_TIMEOUT)
            .build()
            .map_err(|e| RecognitionError::Unavailable(format!("http client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
        })
    }
}

#[derive(Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[async_trait]
impl ImageTextRecognizer for VlmImageRecognizer {
    #[tracing::instrument(skip(self, image), fields(image = image.index, model = %self.model))]
    async fn recognize(&self, image: &EmbeddedImage) -> Result<String, RecognitionError> {
        let b64 = general_purpose::STANDARD.encode(&image.png);
        let data_uri = format!("data:image/png;base64,{b64}");

        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                {
                    "role": "user",
                    "content": [
                        {
                            "type": "image_url",
                            "image_url": { "url": data_uri }
                        },
                        {
                            "type": "text",
                            "text": OCR_PROMPT
                        }
                    ]
                }
            ],
            "max_tokens": 2048,
            "temperature": 0.0,
            "stream": false
        });

        let url = format!("{}/v1/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| RecognitionError::Unavailable(format!("vision endpoint: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(RecognitionError::Failed(format!(
                "vision endpoint returned {status}: {text}"
            )));
        }

        let raw_bytes = response
            .bytes()
            .await
            .map_err(|e| RecognitionError::Failed(format!("read body: {e}")))?;

        let completion: ChatCompletion = serde_json::from_slice(&raw_bytes).map_err(|e| {
            tracing::error!(
                raw_response = %String::from_utf8_lossy(&raw_bytes),
                "Failed to parse vision model JSON"
            );
            RecognitionError::Failed(format!("parse response: {e}"))
        })?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        Ok(content.trim().to_string())
    }
}
