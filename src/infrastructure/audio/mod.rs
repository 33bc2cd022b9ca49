mod audio_decoder;
mod candle_whisper_engine;
mod ffmpeg_audio_extractor;
mod lazy_whisper_engine;
mod media_normalizer;
mod transcription_engine_factory;
mod unavailable_transcription_engine;
mod whisper_api_engine;

pub use audio_decoder::{TARGET_SAMPLE_RATE, decode_audio_file, pcm_duration_secs};
pub use candle_whisper_engine::CandleWhisperEngine;
pub use ffmpeg_audio_extractor::{
    AudioFormat, FfmpegAudioExtractor, atempo_filter_chain, check_ffmpeg_binary,
};
pub use lazy_whisper_engine::LazyWhisperEngine;
pub use media_normalizer::MediaNormalizer;
pub use transcription_engine_factory::{
    AzureDeployment, TranscriptionEngineFactory, TranscriptionProvider,
};
pub use unavailable_transcription_engine::UnavailableTranscriptionEngine;
pub use whisper_api_engine::WhisperApiEngine;
