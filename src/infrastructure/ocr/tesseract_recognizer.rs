use std::io::Write;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{EmbeddedImage, ImageTextRecognizer, RecognitionError};

pub struct TesseractRecognizer {
    binary: PathBuf,
    language: String,
}

impl TesseractRecognizer {
    pub fn new(binary: impl Into<PathBuf>, language: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            language: language.into(),
        }
    }
}

#[async_trait]
impl ImageTextRecognizer for TesseractRecognizer {
    #[tracing::instrument(skip(self, image), fields(image = image.index, bytes = image.png.len()))]
    async fn recognize(&self, image: &EmbeddedImage) -> Result<String, RecognitionError> {
        let mut staged = tempfile::Builder::new()
            .prefix("lecturelens-ocr-")
            .suffix(".png")
            .tempfile()?;
        staged.write_all(&image.png)?;
        staged.flush()?;

        let output = Command::new(&self.binary)
            .arg(staged.path())
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => {
                    RecognitionError::Unavailable(format!("{}: {e}", self.binary.display()))
                }
                _ => RecognitionError::Io(e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RecognitionError::Failed(format!(
                "tesseract exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        tracing::debug!(chars = text.len(), "Tesseract recognition complete");

        Ok(text)
    }
}
