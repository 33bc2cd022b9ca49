use std::fmt;
use std::sync::Arc;

use crate::application::ports::{LlmClient, LlmClientError};
use crate::domain::{
    ChainArtifact, ChainOptions, EXPECTED_QUESTION_COUNT, NormalizedText, QuestionSet,
};

use super::prompt_templates::{generate_questions_prompt, summarize_prompt, translate_prompt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainStage {
    Summarize,
    GenerateQuestions,
    Translate,
}

impl ChainStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChainStage::Summarize => "summarize",
            ChainStage::GenerateQuestions => "generate_questions",
            ChainStage::Translate => "translate",
        }
    }
}

impl fmt::Display for ChainStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("{stage} stage failed: {cause}")]
pub struct GenerationError {
    pub stage: ChainStage,
    pub cause: GenerationFailure,
}

#[derive(Debug, thiserror::Error)]
pub enum GenerationFailure {
    #[error(transparent)]
    Client(#[from] LlmClientError),
    #[error("model returned an empty completion")]
    EmptyCompletion,
}

/// Truncate, summarize, generate questions, then optionally translate.
///
/// Every stage is one generation call fed by the previous stage's output.
/// Nothing is retried; the first failing stage ends the run.
pub struct TransformationChain {
    llm: Arc<dyn LlmClient>,
    options: ChainOptions,
}

impl TransformationChain {
    pub fn new(llm: Arc<dyn LlmClient>, options: ChainOptions) -> Self {
        Self { llm, options }
    }

    #[tracing::instrument(skip(self, text), fields(source_chars = text.char_count()))]
    pub async fn run(&self, text: &NormalizedText) -> Result<ChainArtifact, GenerationError> {
        let docs = truncate_chars(text.as_str(), self.options.truncation_limit);
        if docs.len() < text.as_str().len() {
            tracing::info!(
                limit = self.options.truncation_limit,
                "Source text truncated before summarization"
            );
        }

        let summary = self
            .run_stage(ChainStage::Summarize, &summarize_prompt(docs))
            .await?;

        let question_set = self
            .run_stage(
                ChainStage::GenerateQuestions,
                &generate_questions_prompt(&summary),
            )
            .await?;

        let pairs = QuestionSet::new(&question_set).pair_count();
        if pairs != EXPECTED_QUESTION_COUNT {
            tracing::warn!(
                pairs,
                expected = EXPECTED_QUESTION_COUNT,
                "Generated question set does not follow the requested layout"
            );
        }

        let translated_question_set = match &self.options.translation {
            Some(target) => Some(
                self.run_stage(
                    ChainStage::Translate,
                    &translate_prompt(&target.language, &question_set),
                )
                .await?,
            ),
            None => None,
        };

        Ok(ChainArtifact {
            summary,
            question_set,
            translated_question_set,
        })
    }

    /// One generation call. An empty or whitespace-only completion counts as
    /// a failure of the stage.
    pub async fn run_stage(
        &self,
        stage: ChainStage,
        prompt: &str,
    ) -> Result<String, GenerationError> {
        tracing::debug!(stage = %stage, prompt_chars = prompt.chars().count(), "Running chain stage");

        let completion = self
            .llm
            .complete(prompt)
            .await
            .map_err(|e| GenerationError {
                stage,
                cause: e.into(),
            })?;

        if completion.trim().is_empty() {
            return Err(GenerationError {
                stage,
                cause: GenerationFailure::EmptyCompletion,
            });
        }

        tracing::info!(stage = %stage, chars = completion.len(), "Chain stage complete");

        Ok(completion)
    }
}

/// The first `limit` Unicode scalar values of `text`.
pub fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => &text[..cut],
        None => text,
    }
}
