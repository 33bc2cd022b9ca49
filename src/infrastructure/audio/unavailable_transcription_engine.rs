use std::path::Path;

use async_trait::async_trait;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};

/// Stands in for a provider that is not configured. Every call fails with
/// [`TranscriptionError::Unavailable`], so only media runs are affected.
pub struct UnavailableTranscriptionEngine {
    reason: String,
}

impl UnavailableTranscriptionEngine {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl TranscriptionEngine for UnavailableTranscriptionEngine {
    async fn transcribe(&self, _audio_path: &Path) -> Result<String, TranscriptionError> {
        Err(TranscriptionError::Unavailable(self.reason.clone()))
    }
}
