use serde::Serialize;

pub const DEFAULT_TRUNCATION_LIMIT: usize = 10_000;

#[derive(Debug, Clone, PartialEq)]
pub struct ChainOptions {
    /// Maximum number of characters of normalized text sent to the
    /// summarization stage.
    pub truncation_limit: usize,
    pub translation: Option<TranslationTarget>,
}

impl ChainOptions {
    pub fn with_translation(mut self, language: impl Into<String>) -> Self {
        self.translation = Some(TranslationTarget::new(language));
        self
    }

    pub fn with_truncation_limit(mut self, limit: usize) -> Self {
        self.truncation_limit = limit;
        self
    }
}

impl Default for ChainOptions {
    fn default() -> Self {
        Self {
            truncation_limit: DEFAULT_TRUNCATION_LIMIT,
            translation: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationTarget {
    pub language: String,
}

impl TranslationTarget {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
        }
    }
}

/// The dependent outputs of one chain run.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainArtifact {
    pub summary: String,
    pub question_set: String,
    pub translated_question_set: Option<String>,
}

impl ChainArtifact {
    /// The question text a reader should see: the translation when one was
    /// produced, the generated set otherwise.
    pub fn questions(&self) -> &str {
        self.translated_question_set
            .as_deref()
            .unwrap_or(&self.question_set)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineResult {
    pub summary: String,
    pub questions: String,
}

impl From<ChainArtifact> for PipelineResult {
    fn from(artifact: ChainArtifact) -> Self {
        let ChainArtifact {
            summary,
            question_set,
            translated_question_set,
        } = artifact;
        Self {
            summary,
            questions: translated_question_set.unwrap_or(question_set),
        }
    }
}
