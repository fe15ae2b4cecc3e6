//! Terminal front end for the podcast pipeline.
//!
//! Runs the same orchestrator as the HTTP API on a single background task
//! and renders progress milestones and the terminal message, mirroring the
//! one-worker-with-callbacks model of the interactive client.
//!
//! Usage: podcast-cli [FILE] [--style STYLE] [--type TYPE] [--voice VOICE]
//! Reads content from FILE, or from stdin when no file is given.

use async_openai::{config::OpenAIConfig, Client};
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use podgen_backend::domain::{
    ingest::{ContentType, IngestService},
    podcast::{ContentSubmission, PodcastService, RunStatus},
    script::ScriptService,
    speech::{LanguageCode, SpeechService},
};
use podgen_backend::infrastructure::config::{Config, TtsProvider};
use podgen_backend::infrastructure::repositories::{
    OpenAiScriptRepository, OpenAiSpeechRepository, PollySpeechRepository, ScriptRepository,
    SpeechRepository,
};

struct CliArgs {
    file: Option<PathBuf>,
    style: String,
    content_type: ContentType,
    voice: Option<String>,
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let mut parsed = CliArgs {
        file: None,
        style: "casual".to_string(),
        content_type: ContentType::Text,
        voice: None,
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--style" => {
                parsed.style = args.next().ok_or("--style requires a value")?;
            }
            "--type" => {
                let value = args.next().ok_or("--type requires a value")?;
                parsed.content_type = ContentType::parse(&value)
                    .ok_or_else(|| format!("unknown content type '{}'", value))?;
            }
            "--voice" => {
                parsed.voice = Some(args.next().ok_or("--voice requires a value")?);
            }
            "--help" | "-h" => {
                return Err(
                    "usage: podcast-cli [FILE] [--style STYLE] [--type TYPE] [--voice VOICE]"
                        .to_string(),
                );
            }
            other if !other.starts_with('-') => {
                parsed.file = Some(PathBuf::from(other));
            }
            other => return Err(format!("unknown flag '{}'", other)),
        }
    }

    Ok(parsed)
}

fn read_content(file: Option<&PathBuf>) -> Result<String, String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| format!("could not read {}: {}", path.display(), e)),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| format!("could not read stdin: {}", e))?;
            Ok(buffer)
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "podgen_backend=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().compact())
        .init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::FAILURE;
        }
    };

    let content = match read_content(args.file.as_ref()) {
        Ok(content) => content,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::FAILURE;
        }
    };

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let podcast_service = build_pipeline(&config).await;

    let submission = ContentSubmission {
        raw_content: content,
        content_type: args.content_type,
        style: args.style,
        voice: args.voice,
    };

    println!("Generating podcast...");

    // One background worker per invocation; this task only renders progress
    let (progress_tx, mut progress_rx) = tokio::sync::mpsc::unbounded_channel();
    let worker = tokio::spawn(async move {
        podcast_service.run(submission, Some(&progress_tx)).await
    });

    while let Some(progress) = progress_rx.recv().await {
        match progress.status {
            RunStatus::Pending => println!("  [  0%] starting"),
            RunStatus::ScriptReady => println!("  [ 50%] script generated"),
            RunStatus::AudioReady => println!("  [100%] audio synthesized"),
            RunStatus::Failed => println!("  [ !! ] failed"),
        }
    }

    match worker.await {
        Ok(Ok(outcome)) => {
            println!("Podcast generated successfully!");
            println!("  script length: {} characters", outcome.script.text.len());
            println!("  audio file:    {}", outcome.artifact.path.display());
            ExitCode::SUCCESS
        }
        Ok(Err(e)) => {
            eprintln!("Error ({} stage): {}", e.stage(), e);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: pipeline worker panicked: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn build_pipeline(config: &Config) -> Arc<PodcastService> {
    let openai_client = Arc::new(Client::with_config(
        OpenAIConfig::new().with_api_key(config.openai_api_key.clone()),
    ));

    let script_repo: Arc<dyn ScriptRepository> = Arc::new(OpenAiScriptRepository::new(
        openai_client.clone(),
        config.script_model.clone(),
    ));

    let speech_repo: Arc<dyn SpeechRepository> = match config.tts_provider {
        TtsProvider::OpenAi => Arc::new(OpenAiSpeechRepository::new(
            openai_client,
            config.tts_model.clone(),
        )),
        TtsProvider::Polly => {
            let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
                .region(aws_config::Region::new(config.aws_region.clone()))
                .load()
                .await;
            Arc::new(PollySpeechRepository::new(
                Arc::new(aws_sdk_polly::Client::new(&aws_config)),
                LanguageCode::from_iso(&config.tts_language),
            ))
        }
    };

    Arc::new(PodcastService::new(
        Arc::new(IngestService::new(Duration::from_secs(
            config.fetch_timeout_secs,
        ))),
        Arc::new(ScriptService::new(
            script_repo,
            Duration::from_secs(config.script_timeout_secs),
        )),
        Arc::new(SpeechService::new(
            speech_repo,
            Duration::from_secs(config.tts_timeout_secs),
            config.tts_voice.clone(),
        )),
        PathBuf::from(&config.audio_dir),
    ))
}
