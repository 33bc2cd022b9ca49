mod recognizer_factory;
mod tesseract_recognizer;
mod vlm_image_recognizer;

pub use recognizer_factory::{RecognizerFactory, RecognizerOptions, RecognizerProvider};
pub use tesseract_recognizer::TesseractRecognizer;
pub use vlm_image_recognizer::{OCR_PROMPT, VlmImageRecognizer};
