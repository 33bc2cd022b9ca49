mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    ChainSettings, DocumentSettings, LlmProvider, LlmSettings, LoggingSettings, MediaSettings,
    ServerSettings, Settings, TranscriptionSettings,
};
