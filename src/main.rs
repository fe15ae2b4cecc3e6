use async_openai::{config::OpenAIConfig, Client};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use podgen_backend::controllers::{
    health::HealthController, podcast::PodcastController, upload::UploadController,
    voices::VoicesController,
};
use podgen_backend::domain::{
    ingest::IngestService,
    podcast::PodcastService,
    script::ScriptService,
    speech::{LanguageCode, SpeechService},
};
use podgen_backend::infrastructure::config::{Config, LogFormat, TtsProvider};
use podgen_backend::infrastructure::http::start_http_server;
use podgen_backend::infrastructure::repositories::{
    OpenAiScriptRepository, OpenAiSpeechRepository, PollySpeechRepository, ScriptRepository,
    SpeechRepository,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting PodGen Backend on {}:{}",
        config.host,
        config.port
    );

    let openai_client = Arc::new(Client::with_config(
        OpenAIConfig::new().with_api_key(config.openai_api_key.clone()),
    ));

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate repositories (inject provider clients)
    tracing::info!("Instantiating repositories...");
    let script_repo: Arc<dyn ScriptRepository> = Arc::new(OpenAiScriptRepository::new(
        openai_client.clone(),
        config.script_model.clone(),
    ));

    let speech_repo: Arc<dyn SpeechRepository> = match config.tts_provider {
        TtsProvider::OpenAi => Arc::new(OpenAiSpeechRepository::new(
            openai_client.clone(),
            config.tts_model.clone(),
        )),
        TtsProvider::Polly => {
            tracing::info!(
                region = %config.aws_region,
                "Initializing AWS Polly client"
            );
            let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
                .region(aws_config::Region::new(config.aws_region.clone()))
                .load()
                .await;
            let polly_client = Arc::new(aws_sdk_polly::Client::new(&aws_config));
            Arc::new(PollySpeechRepository::new(
                polly_client,
                LanguageCode::from_iso(&config.tts_language),
            ))
        }
    };

    // 2. Instantiate services (inject repositories)
    tracing::info!("Instantiating services...");
    let ingest_service = Arc::new(IngestService::new(Duration::from_secs(
        config.fetch_timeout_secs,
    )));
    let script_service = Arc::new(ScriptService::new(
        script_repo.clone(),
        Duration::from_secs(config.script_timeout_secs),
    ));
    let speech_service = Arc::new(SpeechService::new(
        speech_repo.clone(),
        Duration::from_secs(config.tts_timeout_secs),
        config.tts_voice.clone(),
    ));
    let podcast_service = Arc::new(PodcastService::new(
        ingest_service.clone(),
        script_service.clone(),
        speech_service.clone(),
        PathBuf::from(&config.audio_dir),
    ));

    // 3. Instantiate controllers (inject services)
    tracing::info!("Instantiating controllers...");
    let health_controller = Arc::new(HealthController::new(
        script_repo.clone(),
        speech_service.clone(),
    ));
    let podcast_controller = Arc::new(PodcastController::new(
        podcast_service,
        ingest_service.clone(),
        PathBuf::from(&config.upload_dir),
        PathBuf::from(&config.audio_dir),
    ));
    let upload_controller = Arc::new(UploadController::new(ingest_service));
    let voices_controller = Arc::new(VoicesController::new(speech_service));

    // Start HTTP server with all routes
    start_http_server(
        Arc::new(config),
        health_controller,
        podcast_controller,
        upload_controller,
        voices_controller,
    )
    .await?;

    Ok(())
}

fn init_logging(config: &Config) {
    let default_filter = if config.is_development() {
        "podgen_backend=debug,tower_http=debug"
    } else {
        "podgen_backend=info,tower_http=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

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
