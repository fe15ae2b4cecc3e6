
use podgen_backend::controllers::{
    health::HealthController, podcast::PodcastController, upload::UploadController,
    voices::VoicesController,
};
use podgen_backend::domain::{
    ingest::IngestService, podcast::PodcastService, script::ScriptService, speech::SpeechService,
};
use podgen_backend::domain::speech::VoiceDescriptor;
use podgen_backend::infrastructure::config::{Config, Environment, LogFormat, TtsProvider};
use podgen_backend::infrastructure::http::build_router;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use uuid::Uuid;

use api_client::TestClient;
use fakes::{CallLog, FakeScriptRepository, FakeSpeechRepository, ScriptBehavior};

pub struct TestApp {
    pub client: TestClient,
    pub calls: Arc<CallLog>,
    pub audio_dir: PathBuf,
    pub upload_dir: PathBuf,
}

/// Spawn the application with well-behaved fakes
pub async fn spawn_app() -> TestApp {
    spawn_app_with(ScriptBehavior::Succeed, FakeSpeechRepository::default_voices()).await
}

/// Spawn the application with configurable fake provider behavior
pub async fn spawn_app_with(
    script_behavior: ScriptBehavior,
    voices: Vec<VoiceDescriptor>,
) -> TestApp {
    let run_id = Uuid::new_v4();
    let audio_dir = std::env::temp_dir().join(format!("podgen-e2e-audio-{}", run_id));
    let upload_dir = std::env::temp_dir().join(format!("podgen-e2e-uploads-{}", run_id));

    let config = Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        openai_api_key: "test-key".to_string(),
        script_model: "gpt-4o-mini".to_string(),
        tts_provider: TtsProvider::OpenAi,
        tts_model: "tts-1".to_string(),
        tts_voice: None,
        tts_language: "en".to_string(),
        aws_region: "eu-west-1".to_string(),
        script_timeout_secs: 5,
        tts_timeout_secs: 5,
        fetch_timeout_secs: 5,
        upload_dir: upload_dir.to_string_lossy().to_string(),
        audio_dir: audio_dir.to_string_lossy().to_string(),
        cors_origins: vec!["http://localhost:3000".to_string()],
        environment: Environment::Development,
        log_format: LogFormat::Pretty,
    };

    let calls = Arc::new(CallLog::default());
    let script_repo = Arc::new(FakeScriptRepository {
        behavior: script_behavior,
        log: calls.clone(),
    });
    let speech_repo = Arc::new(FakeSpeechRepository {
        voices,
        log: calls.clone(),
    });

    let ingest_service = Arc::new(IngestService::new(Duration::from_secs(
        config.fetch_timeout_secs,
    )));
    let script_service = Arc::new(ScriptService::new(
        script_repo.clone(),
        Duration::from_secs(config.script_timeout_secs),
    ));
    let speech_service = Arc::new(SpeechService::new(
        speech_repo,
        Duration::from_secs(config.tts_timeout_secs),
        config.tts_voice.clone(),
    ));
    let podcast_service = Arc::new(PodcastService::new(
        ingest_service.clone(),
        script_service,
        speech_service.clone(),
        audio_dir.clone(),
    ));

    let health_controller = Arc::new(HealthController::new(script_repo, speech_service.clone()));
    let podcast_controller = Arc::new(PodcastController::new(
        podcast_service,
        ingest_service.clone(),
        upload_dir.clone(),
        audio_dir.clone(),
    ));
    let upload_controller = Arc::new(UploadController::new(ingest_service));
    let voices_controller = Arc::new(VoicesController::new(speech_service));

    let app = build_router(
        &config,
        health_controller,
        podcast_controller,
        upload_controller,
        voices_controller,
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp {
        client: TestClient::new(&format!("http://{}", addr)),
        calls,
        audio_dir,
        upload_dir,
    }
}
