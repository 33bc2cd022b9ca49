use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{
    DocumentPage, DocumentParser, ImageTextRecognizer, IngestError, NormalizationError,
    SourceNormalizer,
};
use crate::domain::{ImageRecoveryFailure, NormalizationOptions, NormalizedText, Source};

use super::text_sanitizer::sanitize_segment;

pub const EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);

const SEGMENT_SEPARATOR: &str = "\n\n";

/// Turns a paginated document into one sanitized text blob.
///
/// Each page segment (page text, then the text recovered from each of its
/// images) is cleaned on its own before the segments are joined in page
/// order, so no noise match can straddle a page boundary.
pub struct DocumentNormalizer {
    parser: Arc<dyn DocumentParser>,
    recognizer: Option<Arc<dyn ImageTextRecognizer>>,
    extraction_timeout: Duration,
}

impl DocumentNormalizer {
    pub fn new(parser: Arc<dyn DocumentParser>) -> Self {
        Self {
            parser,
            recognizer: None,
            extraction_timeout: EXTRACTION_TIMEOUT,
        }
    }

    pub fn with_recognizer(mut self, recognizer: Arc<dyn ImageTextRecognizer>) -> Self {
        self.recognizer = Some(recognizer);
        self
    }

    pub fn with_extraction_timeout(mut self, timeout: Duration) -> Self {
        self.extraction_timeout = timeout;
        self
    }

    async fn parse_pages(
        &self,
        source: &Source,
        include_images: bool,
    ) -> Result<Vec<DocumentPage>, IngestError> {
        let mut temp_file = tempfile::Builder::new()
            .prefix(&format!("lecturelens-{}-", source.invocation_id))
            .suffix(".pdf")
            .tempfile()
            .map_err(IngestError::Staging)?;

        temp_file
            .write_all(source.data())
            .map_err(IngestError::Staging)?;

        let parser = Arc::clone(&self.parser);

        // The blocking task owns the staged file, so a parse abandoned on
        // timeout still reads an existing file and removes it when done.
        let pages = tokio::time::timeout(
            self.extraction_timeout,
            tokio::task::spawn_blocking(move || parser.parse(temp_file.path(), include_images)),
        )
        .await
        .map_err(|_| IngestError::TimedOut)?
        .map_err(|e| IngestError::TaskFailed(e.to_string()))??;

        Ok(pages)
    }

    async fn recover_page_images(
        &self,
        page: &DocumentPage,
        segments: &mut Vec<String>,
        failures: &mut Vec<ImageRecoveryFailure>,
    ) {
        let images = match &page.images {
            Ok(images) => images,
            Err(e) => {
                tracing::warn!(page = page.number, error = %e, "Could not list page images");
                failures.push(ImageRecoveryFailure {
                    page_number: page.number,
                    image_index: None,
                    cause: e.to_string(),
                });
                return;
            }
        };

        let Some(recognizer) = &self.recognizer else {
            if !images.is_empty() {
                tracing::warn!(
                    page = page.number,
                    images = images.len(),
                    "Image text recovery requested but no recognizer is configured"
                );
                failures.extend(images.iter().map(|image| ImageRecoveryFailure {
                    page_number: page.number,
                    image_index: Some(image.index),
                    cause: "no image text recognizer configured".to_string(),
                }));
            }
            return;
        };

        for image in images {
            match recognizer.recognize(image).await {
                Ok(text) => {
                    let cleaned = sanitize_segment(&text);
                    if !cleaned.is_empty() {
                        segments.push(cleaned);
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        page = page.number,
                        image = image.index,
                        error = %e,
                        "Image text recovery failed, contributing nothing"
                    );
                    failures.push(ImageRecoveryFailure {
                        page_number: page.number,
                        image_index: Some(image.index),
                        cause: e.to_string(),
                    });
                }
            }
        }
    }
}

#[async_trait]
impl SourceNormalizer for DocumentNormalizer {
    #[tracing::instrument(
        skip(self, source, options),
        fields(
            invocation_id = %source.invocation_id,
            size_bytes = source.size_bytes(),
            recover_image_text = options.recover_image_text,
        )
    )]
    async fn normalize(
        &self,
        source: &Source,
        options: &NormalizationOptions,
    ) -> Result<NormalizedText, NormalizationError> {
        let pages = self
            .parse_pages(source, options.recover_image_text)
            .await?;

        tracing::info!(page_count = pages.len(), "Document text extraction complete");

        let mut segments: Vec<String> = Vec::new();
        let mut failures: Vec<ImageRecoveryFailure> = Vec::new();

        for page in &pages {
            let cleaned = sanitize_segment(&page.text);
            if !cleaned.is_empty() {
                segments.push(cleaned);
            }

            if options.recover_image_text {
                self.recover_page_images(page, &mut segments, &mut failures)
                    .await;
            }
        }

        if segments.is_empty() {
            return Err(IngestError::NoTextFound.into());
        }

        if !failures.is_empty() {
            tracing::info!(
                failures = failures.len(),
                "Document normalized with partial image text recovery"
            );
        }

        Ok(NormalizedText::new(segments.join(SEGMENT_SEPARATOR)).with_recovery_failures(failures))
    }
}
