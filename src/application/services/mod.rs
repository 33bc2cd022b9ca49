mod pipeline_service;
pub mod prompt_templates;
mod source_dispatcher;
mod transformation_chain;

pub use pipeline_service::{ErrorReport, PipelineError, PipelineErrorKind, PipelineService};
pub use source_dispatcher::SourceDispatcher;
pub use transformation_chain::{
    ChainStage, GenerationError, GenerationFailure, TransformationChain, truncate_chars,
};
