use std::path::{Path, PathBuf};

use crate::application::ports::{DocumentPage, DocumentParseError, DocumentParser};

use super::pdf_image_extractor::extract_page_images;

/// Page text via `pdf-extract`, embedded images via pdfium.
#[derive(Debug, Clone, Default)]
pub struct PdfAdapter {
    pdfium_library_dir: Option<PathBuf>,
}

impl PdfAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load pdfium from `dir` instead of the system library path.
    pub fn with_pdfium_library_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.pdfium_library_dir = Some(dir.into());
        self
    }

    fn extract_page_texts(path: &Path) -> Result<Vec<String>, DocumentParseError> {
        pdf_extract::extract_text_by_pages(path)
            .map_err(|e| DocumentParseError::Malformed(format!("failed to parse PDF: {e}")))
    }
}

impl DocumentParser for PdfAdapter {
    fn parse(
        &self,
        path: &Path,
        include_images: bool,
    ) -> Result<Vec<DocumentPage>, DocumentParseError> {
        let texts = Self::extract_page_texts(path)?;

        let mut images_by_page = if include_images {
            match extract_page_images(path, self.pdfium_library_dir.as_deref()) {
                Ok(pages) => pages.into_iter().map(Some).collect(),
                Err(e) => {
                    tracing::warn!(error = %e, "Embedded image extraction unavailable");
                    vec![Some(Err(e)); texts.len()]
                }
            }
        } else {
            Vec::new()
        };
        images_by_page.resize(texts.len(), None);

        let pages = texts
            .into_iter()
            .zip(images_by_page)
            .enumerate()
            .map(|(index, (text, images))| DocumentPage {
                number: (index + 1) as u32,
                text,
                images: images.unwrap_or_else(|| Ok(Vec::new())),
            })
            .collect();

        Ok(pages)
    }
}
