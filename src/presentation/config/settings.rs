use config::Environment as EnvironmentSource;
use config::{Config, ConfigError, File};
use serde::Deserialize;

use crate::domain::DEFAULT_TRUNCATION_LIMIT;

use super::Environment;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub llm: LlmSettings,
    pub transcription: TranscriptionSettings,
    pub media: MediaSettings,
    pub document: DocumentSettings,
    pub chain: ChainSettings,
    pub logging: LoggingSettings,
}

impl Settings {
    /// Layers `appsettings.{environment}` (optional) under `APP_`-prefixed
    /// environment variables, e.g. `APP_LLM__API_KEY`.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str()))
                    .required(false),
            )
            .add_source(
                EnvironmentSource::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub max_upload_mb: usize,
}

impl ServerSettings {
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb * 1024 * 1024
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            max_upload_mb: 200,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    #[default]
    #[serde(rename = "openai")]
    OpenAi,
    Azure,
    #[serde(rename = "lmstudio")]
    LmStudio,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    pub provider: LlmProvider,
    pub base_url: Option<String>,
    pub azure_endpoint: Option<String>,
    pub azure_api_version: String,
    pub api_key: String,
    pub chat_model: String,
    pub max_tokens: Option<usize>,
    pub temperature: f32,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: LlmProvider::OpenAi,
            base_url: None,
            azure_endpoint: None,
            azure_api_version: "2024-02-01".to_string(),
            api_key: String::new(),
            chat_model: "gpt-3.5-turbo-16k".to_string(),
            max_tokens: None,
            temperature: 0.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TranscriptionSettings {
    /// `openai`, `azure` or `local`.
    pub provider: String,
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub azure_endpoint: Option<String>,
    pub azure_deployment: Option<String>,
    pub azure_api_version: String,
}

impl Default for TranscriptionSettings {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "whisper-1".to_string(),
            api_key: None,
            base_url: None,
            azure_endpoint: None,
            azure_deployment: None,
            azure_api_version: "2024-02-01".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MediaSettings {
    pub ffmpeg_path: String,
    pub speed_factor: f32,
    /// `mp3` or `wav`.
    pub audio_format: String,
}

impl Default for MediaSettings {
    fn default() -> Self {
        Self {
            ffmpeg_path: "ffmpeg".to_string(),
            speed_factor: crate::domain::DEFAULT_MEDIA_SPEED_FACTOR,
            audio_format: "mp3".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DocumentSettings {
    /// `none`, `tesseract` or `vlm`.
    pub recognizer: String,
    pub tesseract_path: String,
    pub tesseract_lang: String,
    pub vlm_base_url: String,
    pub vlm_model: String,
    pub vlm_api_key: Option<String>,
    /// Directory holding the pdfium shared library. System lookup when unset.
    pub pdfium_library_dir: Option<String>,
}

impl Default for DocumentSettings {
    fn default() -> Self {
        Self {
            recognizer: "none".to_string(),
            tesseract_path: "tesseract".to_string(),
            tesseract_lang: "eng+kor".to_string(),
            vlm_base_url: "http://localhost:1234".to_string(),
            vlm_model: "qwen2-vl-7b-instruct".to_string(),
            vlm_api_key: None,
            pdfium_library_dir: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChainSettings {
    pub truncation_limit: usize,
    /// Target language for the question set. Empty disables translation.
    pub translate_to: Option<String>,
}

impl ChainSettings {
    pub fn translation_language(&self) -> Option<&str> {
        self.translate_to
            .as_deref()
            .map(str::trim)
            .filter(|language| !language.is_empty())
    }
}

impl Default for ChainSettings {
    fn default() -> Self {
        Self {
            truncation_limit: DEFAULT_TRUNCATION_LIMIT,
            translate_to: Some("Korean".to_string()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            enable_json: false,
        }
    }
}
