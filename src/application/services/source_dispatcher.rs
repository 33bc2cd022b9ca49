use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{NormalizationError, SourceNormalizer};
use crate::domain::{NormalizationOptions, NormalizedText, Source, SourceKind, UnsupportedKind};

/// Routes a source to the normalizer registered for its kind.
#[derive(Default)]
pub struct SourceDispatcher {
    normalizers: HashMap<SourceKind, Arc<dyn SourceNormalizer>>,
}

impl SourceDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, kind: SourceKind, normalizer: Arc<dyn SourceNormalizer>) -> Self {
        self.normalizers.insert(kind, normalizer);
        self
    }
}

#[async_trait]
impl SourceNormalizer for SourceDispatcher {
    async fn normalize(
        &self,
        source: &Source,
        options: &NormalizationOptions,
    ) -> Result<NormalizedText, NormalizationError> {
        let normalizer = self
            .normalizers
            .get(&source.kind)
            .ok_or_else(|| UnsupportedKind(source.kind.to_string()))?;

        tracing::debug!(kind = %source.kind, "Dispatching source to normalizer");

        normalizer.normalize(source, options).await
    }
}
