mod audio_extractor;
mod document_parser;
mod image_text_recognizer;
mod llm_client;
mod source_normalizer;
mod transcription_engine;

pub use audio_extractor::{AudioExtractionError, AudioExtractor};
pub use document_parser::{DocumentPage, DocumentParseError, DocumentParser, EmbeddedImage};
pub use image_text_recognizer::{ImageTextRecognizer, RecognitionError};
pub use llm_client::{LlmClient, LlmClientError};
pub use source_normalizer::{IngestError, NormalizationError, SourceNormalizer};
pub use transcription_engine::{TranscriptionEngine, TranscriptionError};
