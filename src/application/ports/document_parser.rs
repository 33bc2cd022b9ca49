use std::path::Path;

/// Splits a document on disk into its pages.
///
/// Implementations are synchronous and expected to be driven from a
/// blocking thread.
pub trait DocumentParser: Send + Sync {
    fn parse(
        &self,
        path: &Path,
        include_images: bool,
    ) -> Result<Vec<DocumentPage>, DocumentParseError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentPage {
    /// 1-based.
    pub number: u32,
    pub text: String,
    /// Raster images embedded in the page. Always `Ok(vec![])` when images
    /// were not requested.
    pub images: Result<Vec<EmbeddedImage>, DocumentParseError>,
}

impl DocumentPage {
    pub fn text_only(number: u32, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
            images: Ok(Vec::new()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedImage {
    /// Position of the image among the page's image objects.
    pub index: usize,
    pub png: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentParseError {
    #[error("failed to parse document: {0}")]
    Malformed(String),
    #[error("image extraction failed: {0}")]
    ImageExtraction(String),
}
