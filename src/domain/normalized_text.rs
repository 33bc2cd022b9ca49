/// Plain text produced by a normalizer, ready for the transformation chain.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NormalizedText {
    text: String,
    recovery_failures: Vec<ImageRecoveryFailure>,
}

impl NormalizedText {
    pub fn new(text: String) -> Self {
        Self {
            text,
            recovery_failures: Vec::new(),
        }
    }

    pub fn with_recovery_failures(mut self, failures: Vec<ImageRecoveryFailure>) -> Self {
        self.recovery_failures = failures;
        self
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Images whose text could not be recovered. Each contributed nothing to
    /// the text but did not fail the document.
    pub fn recovery_failures(&self) -> &[ImageRecoveryFailure] {
        &self.recovery_failures
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecoveryFailure {
    pub page_number: u32,
    /// `None` when images could not be listed for the page at all.
    pub image_index: Option<usize>,
    pub cause: String,
}
