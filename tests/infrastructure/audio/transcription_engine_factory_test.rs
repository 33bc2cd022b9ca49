use std::path::Path;
use std::sync::Arc;

use lecturelens::application::ports::{
    NormalizationError, SourceNormalizer, TranscriptionError,
};
use lecturelens::domain::{NormalizationOptions, Source, SourceKind};
use lecturelens::infrastructure::audio::{
    AzureDeployment, LazyWhisperEngine, MediaNormalizer, TranscriptionEngineFactory,
    TranscriptionProvider,
};
use lecturelens::presentation::Settings;

use crate::helpers::RecordingAudioExtractor;

#[test]
fn given_provider_names_when_parsing_then_maps_to_provider() {
    assert_eq!(
        TranscriptionProvider::try_from("candle").unwrap(),
        TranscriptionProvider::Local
    );
    assert_eq!(
        TranscriptionProvider::try_from("OpenAI").unwrap(),
        TranscriptionProvider::OpenAi
    );
    assert_eq!(
        TranscriptionProvider::try_from("azure").unwrap(),
        TranscriptionProvider::Azure
    );
    assert!(TranscriptionProvider::try_from("deepgram").is_err());
}

#[test]
fn given_local_provider_when_created_then_model_is_not_loaded_yet() {
    let engine = LazyWhisperEngine::new("openai/whisper-tiny");

    assert!(!engine.is_loaded());
    TranscriptionEngineFactory::create(
        TranscriptionProvider::Local,
        "openai/whisper-tiny",
        None,
        None,
        None,
    );
}

#[tokio::test]
async fn given_openai_without_key_when_transcribing_then_reports_unavailable() {
    let engine = TranscriptionEngineFactory::create(
        TranscriptionProvider::OpenAi,
        "whisper-1",
        None,
        None,
        None,
    );

    let result = engine.transcribe(Path::new("audio.mp3")).await;

    match result {
        Err(TranscriptionError::Unavailable(reason)) => assert!(reason.contains("API key")),
        other => panic!("expected unavailable engine, got {other:?}"),
    }
}

#[tokio::test]
async fn given_blank_openai_key_when_transcribing_then_reports_unavailable() {
    let engine = TranscriptionEngineFactory::create(
        TranscriptionProvider::OpenAi,
        "whisper-1",
        Some("  ".to_string()),
        None,
        None,
    );

    let result = engine.transcribe(Path::new("audio.mp3")).await;

    assert!(matches!(result, Err(TranscriptionError::Unavailable(_))));
}

#[tokio::test]
async fn given_azure_without_deployment_when_transcribing_then_reports_unavailable() {
    let engine = TranscriptionEngineFactory::create(
        TranscriptionProvider::Azure,
        "whisper",
        Some("key".to_string()),
        None,
        None,
    );

    let result = engine.transcribe(Path::new("audio.mp3")).await;

    match result {
        Err(TranscriptionError::Unavailable(reason)) => assert!(reason.contains("deployment")),
        other => panic!("expected unavailable engine, got {other:?}"),
    }
}

#[tokio::test]
async fn given_azure_with_deployment_when_transcribing_then_engine_is_usable() {
    let engine = TranscriptionEngineFactory::create(
        TranscriptionProvider::Azure,
        "whisper",
        Some("key".to_string()),
        None,
        Some(AzureDeployment {
            endpoint: "http://127.0.0.1:9".to_string(),
            deployment: "whisper".to_string(),
            api_version: "2024-02-01".to_string(),
        }),
    );

    // The unknown extension is rejected by the real engine before any request.
    let result = engine.transcribe(Path::new("audio.ogg")).await;

    assert!(matches!(result, Err(TranscriptionError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn given_default_settings_when_normalizing_media_then_run_fails_with_transcription_error() {
    let settings = Settings::default();
    let transcription = &settings.transcription;
    let provider = TranscriptionProvider::try_from(transcription.provider.as_str()).unwrap();
    let engine = TranscriptionEngineFactory::create(
        provider,
        &transcription.model,
        transcription.api_key.clone(),
        transcription.base_url.clone(),
        None,
    );
    let normalizer = MediaNormalizer::new(Arc::new(RecordingAudioExtractor::new()), engine);

    let result = normalizer
        .normalize(
            &Source::new(vec![0u8; 64], SourceKind::Media),
            &NormalizationOptions::for_kind(SourceKind::Media),
        )
        .await;

    assert!(matches!(
        result,
        Err(NormalizationError::Transcription(TranscriptionError::Unavailable(_)))
    ));
}
