mod document_normalizer;
mod pdf_adapter;
mod pdf_image_extractor;
mod text_sanitizer;

pub use document_normalizer::{DocumentNormalizer, EXTRACTION_TIMEOUT};
pub use pdf_adapter::PdfAdapter;
pub use text_sanitizer::{NOISE_PATTERN, sanitize_segment, strip_noise, tidy_extracted_text};
