use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use lecturelens::application::ports::SourceNormalizer;
use lecturelens::application::services::{PipelineService, SourceDispatcher, TransformationChain};
use lecturelens::domain::{ChainOptions, SourceKind};
use lecturelens::infrastructure::audio::{
    AudioFormat, AzureDeployment, FfmpegAudioExtractor, MediaNormalizer,
    TranscriptionEngineFactory, TranscriptionProvider, check_ffmpeg_binary,
};
use lecturelens::infrastructure::llm::create_chat_client;
use lecturelens::infrastructure::observability::{TracingConfig, init_tracing};
use lecturelens::infrastructure::ocr::{RecognizerFactory, RecognizerOptions, RecognizerProvider};
use lecturelens::infrastructure::text_processing::{DocumentNormalizer, PdfAdapter};
use lecturelens::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let mut settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(
        &TracingConfig::default()
            .with_level(settings.logging.level.clone())
            .with_json_format(settings.logging.enable_json),
    )?;

    if settings.llm.api_key.is_empty() {
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            settings.llm.api_key = key;
        }
    }
    if settings.transcription.api_key.is_none() {
        settings.transcription.api_key = std::env::var("OPENAI_API_KEY").ok();
    }

    tracing::info!(environment = %environment, "Application starting");

    let document_normalizer = build_document_normalizer(&settings)?;
    let media_normalizer = build_media_normalizer(&settings).await?;

    let dispatcher = SourceDispatcher::new()
        .register(SourceKind::Document, document_normalizer)
        .register(SourceKind::Media, media_normalizer);

    let llm_client = Arc::new(create_chat_client(&settings.llm)?);

    let mut chain_options =
        ChainOptions::default().with_truncation_limit(settings.chain.truncation_limit);
    if let Some(language) = settings.chain.translation_language() {
        chain_options = chain_options.with_translation(language);
    }

    tracing::info!(
        provider = ?settings.llm.provider,
        model = %settings.llm.chat_model,
        truncation_limit = chain_options.truncation_limit,
        translate_to = settings.chain.translation_language().unwrap_or("none"),
        "Transformation chain configured"
    );

    let pipeline_service = Arc::new(PipelineService::new(
        Arc::new(dispatcher),
        TransformationChain::new(llm_client, chain_options),
    ));

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let state = AppState {
        pipeline_service,
        settings,
    };

    let router = create_router(state);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}

fn build_document_normalizer(settings: &Settings) -> anyhow::Result<Arc<dyn SourceNormalizer>> {
    let document = &settings.document;

    let mut parser = PdfAdapter::new();
    if let Some(dir) = &document.pdfium_library_dir {
        parser = parser.with_pdfium_library_dir(dir);
    }

    let provider = RecognizerProvider::try_from(document.recognizer.as_str())?;
    let recognizer = RecognizerFactory::create(
        provider,
        &RecognizerOptions {
            tesseract_path: document.tesseract_path.clone(),
            tesseract_lang: document.tesseract_lang.clone(),
            vlm_base_url: document.vlm_base_url.clone(),
            vlm_model: document.vlm_model.clone(),
            vlm_api_key: document.vlm_api_key.clone(),
        },
    )?;

    tracing::info!(recognizer = ?provider, "Document normalizer configured");

    let mut normalizer = DocumentNormalizer::new(Arc::new(parser));
    if let Some(recognizer) = recognizer {
        normalizer = normalizer.with_recognizer(recognizer);
    }

    Ok(Arc::new(normalizer))
}

async fn build_media_normalizer(settings: &Settings) -> anyhow::Result<Arc<dyn SourceNormalizer>> {
    let media = &settings.media;

    match check_ffmpeg_binary(Path::new(&media.ffmpeg_path)).await {
        Ok(version) => tracing::info!(version = %version, "ffmpeg available"),
        Err(e) => tracing::warn!(error = %e, "ffmpeg unavailable, media sources will fail"),
    }

    let format = AudioFormat::try_from(media.audio_format.as_str())?;
    let extractor = Arc::new(FfmpegAudioExtractor::new(&media.ffmpeg_path, format));

    let transcription = &settings.transcription;
    let provider = TranscriptionProvider::try_from(transcription.provider.as_str())?;
    let azure = match (&transcription.azure_endpoint, &transcription.azure_deployment) {
        (Some(endpoint), Some(deployment)) => Some(AzureDeployment {
            endpoint: endpoint.clone(),
            deployment: deployment.clone(),
            api_version: transcription.azure_api_version.clone(),
        }),
        _ => None,
    };

    let engine = TranscriptionEngineFactory::create(
        provider,
        &transcription.model,
        transcription.api_key.clone(),
        transcription.base_url.clone(),
        azure,
    );

    tracing::info!(
        provider = ?provider,
        model = %transcription.model,
        format = format.extension(),
        "Media normalizer configured"
    );

    Ok(Arc::new(MediaNormalizer::new(extractor, engine)))
}
