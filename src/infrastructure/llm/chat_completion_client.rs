use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{LlmClient, LlmClientError};
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::config::{LlmProvider, LlmSettings};

/// Non-streaming client for OpenAI-compatible `/chat/completions` endpoints.
pub struct ChatCompletionClient {
    client: Client,
    provider: LlmProvider,
    base_url: String,
    api_key: String,
    api_version: Option<String>,
    model: String,
    max_tokens: Option<usize>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<usize>,
    temperature: f32,
}

#[derive(Serialize, Deserialize, Clone)]
struct ChatMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

impl ChatCompletionClient {
    fn endpoint(&self) -> String {
        match &self.api_version {
            Some(version) => format!(
                "{}/chat/completions?api-version={}",
                self.base_url, version
            ),
            None => format!("{}/chat/completions", self.base_url),
        }
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.provider {
            LlmProvider::Azure => request.header("api-key", &self.api_key),
            _ if self.api_key.is_empty() => request,
            _ => request.bearer_auth(&self.api_key),
        }
    }
}

#[async_trait]
impl LlmClient for ChatCompletionClient {
    #[tracing::instrument(skip(self, prompt), fields(model = %self.model, prompt_chars = prompt.len()))]
    async fn complete(&self, prompt: &str) -> Result<String, LlmClientError> {
        tracing::debug!(prompt = %sanitize_prompt(prompt), "Sending chat completion request");

        let request_body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: Some(prompt.to_string()),
            }],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let request = self.client.post(self.endpoint()).json(&request_body);
        let response = self
            .apply_auth(request)
            .send()
            .await
            .map_err(|e| LlmClientError::ApiRequestFailed(e.to_string()))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmClientError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmClientError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let completion_response: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmClientError::InvalidResponse(e.to_string()))?;

        let content = completion_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmClientError::InvalidResponse("empty choices".to_string()))?
            .message
            .content
            .unwrap_or_default();

        tracing::debug!(chars = content.len(), "Chat completion received");

        Ok(content)
    }
}

pub fn create_chat_client(settings: &LlmSettings) -> Result<ChatCompletionClient, LlmClientError> {
    let (base_url, api_version) = match settings.provider {
        LlmProvider::OpenAi => (
            settings
                .base_url
                .as_deref()
                .unwrap_or("https://api.openai.com/v1")
                .trim_end_matches('/')
                .to_string(),
            None,
        ),
        LlmProvider::LmStudio => (
            settings
                .base_url
                .as_deref()
                .ok_or_else(|| {
                    LlmClientError::Configuration(
                        "base_url required for lmstudio provider".to_string(),
                    )
                })?
                .trim_end_matches('/')
                .to_string(),
            None,
        ),
        LlmProvider::Azure => {
            let endpoint = settings.azure_endpoint.as_ref().ok_or_else(|| {
                LlmClientError::Configuration(
                    "azure_endpoint required for azure provider".to_string(),
                )
            })?;
            (
                format!(
                    "{}/openai/deployments/{}",
                    endpoint.trim_end_matches('/'),
                    settings.chat_model
                ),
                Some(settings.azure_api_version.clone()),
            )
        }
    };

    Ok(ChatCompletionClient {
        client: Client::new(),
        provider: settings.provider,
        base_url,
        api_key: settings.api_key.clone(),
        api_version,
        model: settings.chat_model.clone(),
        max_tokens: settings.max_tokens,
        temperature: settings.temperature,
    })
}
