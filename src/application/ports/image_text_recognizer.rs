use async_trait::async_trait;

use super::EmbeddedImage;

/// Recovers text rendered inside a raster image.
#[async_trait]
pub trait ImageTextRecognizer: Send + Sync {
    async fn recognize(&self, image: &EmbeddedImage) -> Result<String, RecognitionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RecognitionError {
    #[error("recognizer unavailable: {0}")]
    Unavailable(String),
    #[error("recognition failed: {0}")]
    Failed(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
