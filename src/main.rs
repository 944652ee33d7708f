use async_openai::{config::OpenAIConfig, Client};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use voxbridge::controllers::pipeline::PipelineController;
use voxbridge::domain::pipeline::{PipelineService, PipelineSettings};
use voxbridge::domain::translation::TranslationInvoker;
use voxbridge::domain::voice::{EngineCache, VoiceLocator};
use voxbridge::infrastructure::config::{Config, LogFormat};
use voxbridge::infrastructure::http::{create_router, start_http_server};
use voxbridge::infrastructure::repositories::{OpenAiTranslationRepository, SherpaTtsEngineFactory};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!("configuration: {}", e))?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        environment = ?config.environment,
        "Starting voxbridge on {}:{}",
        config.host,
        config.port
    );
    if config.is_development() && config.openai_base_url.is_none() {
        tracing::debug!("Development mode is calling the hosted OpenAI API");
    }

    // Voice assets are provisioned before startup; report what is there
    let locator = Arc::new(VoiceLocator::new(config.voice_assets_dir.clone()));
    let installed = locator.list_installed();
    tracing::info!(
        root = %config.voice_assets_dir.display(),
        voices = ?installed.iter().map(|asset| asset.language.as_str()).collect::<Vec<_>>(),
        "Voice assets discovered"
    );
    if installed.is_empty() {
        tracing::warn!("No voice assets installed; every job will return text only");
    }

    // Translation backend
    let mut openai_config = OpenAIConfig::new().with_api_key(config.openai_api_key.clone());
    if let Some(base_url) = &config.openai_base_url {
        openai_config = openai_config.with_api_base(base_url.clone());
    }
    let openai_client = Arc::new(Client::with_config(openai_config));
    tracing::info!(
        transcription_model = %config.transcription_model,
        translation_model = %config.translation_model,
        "OpenAI translation client initialized"
    );

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Engines
    let translation_engine = Arc::new(OpenAiTranslationRepository::new(
        openai_client,
        config.transcription_model.clone(),
        config.translation_model.clone(),
    ));
    let tts_factory = Arc::new(SherpaTtsEngineFactory::new(config.tts_num_threads));

    // 2. Services
    let engine_cache = Arc::new(EngineCache::new(locator, tts_factory));
    let pipeline_service = Arc::new(PipelineService::new(
        TranslationInvoker::new(translation_engine),
        engine_cache,
        PipelineSettings {
            default_target_language: config.default_target_language.clone(),
            tts_speed: config.tts_speed,
            max_audio_bytes: config.max_audio_bytes,
        },
    ));

    // 3. Controllers
    let pipeline_controller = Arc::new(PipelineController::new(pipeline_service.clone()));

    let router = create_router(pipeline_service, pipeline_controller, config.max_audio_bytes);

    start_http_server(Arc::new(config), router)
        .await
        .map_err(|e| anyhow::anyhow!("server: {}", e))?;

    Ok(())
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "voxbridge=debug,tower_http=debug".into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
