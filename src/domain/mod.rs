mod chain_artifact;
mod invocation_id;
mod normalization_options;
mod normalized_text;
mod question_set;
mod source;

pub use chain_artifact::{
    ChainArtifact, ChainOptions, DEFAULT_TRUNCATION_LIMIT, PipelineResult, TranslationTarget,
};
pub use invocation_id::InvocationId;
pub use normalization_options::{
    DEFAULT_MEDIA_SPEED_FACTOR, InvalidSpeedFactor, NormalizationOptions, SpeedFactor,
};
pub use normalized_text::{ImageRecoveryFailure, NormalizedText};
pub use question_set::{EXPECTED_QUESTION_COUNT, QuestionSet};
pub use source::{Source, SourceKind, UnsupportedKind};
