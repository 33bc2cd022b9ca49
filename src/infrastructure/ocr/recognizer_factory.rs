use std::sync::Arc;

use crate::application::ports::{ImageTextRecognizer, RecognitionError};

use super::tesseract_recognizer::TesseractRecognizer;
use super::vlm_image_recognizer::VlmImageRecognizer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecognizerProvider {
    None,
    Tesseract,
    Vlm,
}

impl TryFrom<&str> for RecognizerProvider {
    type Error = RecognitionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "none" | "" => Ok(Self::None),
            "tesseract" => Ok(Self::Tesseract),
            "vlm" | "lmstudio" => Ok(Self::Vlm),
            other => Err(RecognitionError::Unavailable(format!(
                "unknown image recognizer: {other}. Expected: none, tesseract, or vlm"
            ))),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecognizerOptions {
    pub tesseract_path: String,
    pub tesseract_lang: String,
    pub vlm_base_url: String,
    pub vlm_model: String,
    pub vlm_api_key: Option<String>,
}

pub struct RecognizerFactory;

impl RecognizerFactory {
    pub fn create(
        provider: RecognizerProvider,
        options: &RecognizerOptions,
    ) -> Result<Option<Arc<dyn ImageTextRecognizer>>, RecognitionError> {
        match provider {
            RecognizerProvider::None => Ok(None),
            RecognizerProvider::Tesseract => Ok(Some(Arc::new(TesseractRecognizer::new(
                &options.tesseract_path,
                &options.tesseract_lang,
            )))),
            RecognizerProvider::Vlm => {
                let recognizer = VlmImageRecognizer::new(
                    &options.vlm_base_url,
                    &options.vlm_model,
                    options.vlm_api_key.as_deref().unwrap_or_default(),
                )?;
                Ok(Some(Arc::new(recognizer)))
            }
        }
    }
}
