use super::error::PipelineError;
use super::{ContentSubmission, PodcastOutcome, Progress, ProgressSender, RunStatus, StoredArtifact};
use crate::domain::ingest::IngestService;
use crate::domain::script::ScriptService;
use crate::domain::speech::SpeechService;
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

/// Sequences ingest, script generation and audio synthesis for one
/// submission and persists the resulting artifact.
///
/// No stage is retried and no partial progress survives a failure; the
/// caller resubmits from scratch. Concurrent runs are independent, unique
/// artifact filenames avoid collisions in the shared audio directory.
pub struct PodcastService {
    ingest_service: Arc<IngestService>,
    script_service: Arc<ScriptService>,
    speech_service: Arc<SpeechService>,
    audio_dir: PathBuf,
}

impl PodcastService {
    pub fn new(
        ingest_service: Arc<IngestService>,
        script_service: Arc<ScriptService>,
        speech_service: Arc<SpeechService>,
        audio_dir: PathBuf,
    ) -> Self {
        Self {
            ingest_service,
            script_service,
            speech_service,
            audio_dir,
        }
    }

    /// Run the full pipeline for one submission.
    ///
    /// Progress milestones are advisory: 50 once the script is ready, 100
    /// once audio is ready. Audio synthesis never starts unless script
    /// generation succeeded.
    pub async fn run(
        &self,
        submission: ContentSubmission,
        progress: Option<&ProgressSender>,
    ) -> Result<PodcastOutcome, PipelineError> {
        let run_id = Uuid::new_v4();

        tracing::info!(
            run_id = %run_id,
            content_type = %submission.content_type,
            style = %submission.style,
            content_length = submission.raw_content.len(),
            "Starting podcast pipeline"
        );

        emit(progress, 0, RunStatus::Pending);

        let result = self.run_stages(&submission, progress, run_id).await;

        if let Err(e) = &result {
            tracing::error!(
                run_id = %run_id,
                stage = %e.stage(),
                kind = e.kind(),
                error = %e,
                "Podcast pipeline failed"
            );
            emit(progress, 0, RunStatus::Failed);
        }

        result
    }

    async fn run_stages(
        &self,
        submission: &ContentSubmission,
        progress: Option<&ProgressSender>,
        run_id: Uuid,
    ) -> Result<PodcastOutcome, PipelineError> {
        let content = self
            .ingest_service
            .ingest(&submission.raw_content, submission.content_type)
            .await?;

        let script = self
            .script_service
            .generate(&content, &submission.style, submission.content_type)
            .await?;

        emit(progress, 50, RunStatus::ScriptReady);

        let voice = self
            .speech_service
            .select_voice(submission.voice.clone(), &script.text);

        let audio = self.speech_service.synthesize(&script, &voice).await?;

        let artifact = self.persist(run_id, audio).await?;

        emit(progress, 100, RunStatus::AudioReady);

        tracing::info!(
            run_id = %run_id,
            file = %artifact.file_name,
            audio_size = artifact.bytes.len(),
            "Podcast pipeline completed"
        );

        Ok(PodcastOutcome { script, artifact })
    }

    async fn persist(
        &self,
        run_id: Uuid,
        audio: crate::domain::speech::AudioArtifact,
    ) -> Result<StoredArtifact, PipelineError> {
        tokio::fs::create_dir_all(&self.audio_dir)
            .await
            .map_err(|e| PipelineError::Delivery(e.to_string()))?;

        let extension = match audio.mime_type {
            "audio/wav" => "wav",
            _ => "mp3",
        };
        let file_name = format!("{}.{}", run_id, extension);
        let path = self.audio_dir.join(&file_name);

        tokio::fs::write(&path, &audio.bytes)
            .await
            .map_err(|e| PipelineError::Delivery(e.to_string()))?;

        Ok(StoredArtifact {
            file_name,
            path,
            mime_type: audio.mime_type,
            duration_hint_secs: audio.duration_hint_secs,
            bytes: audio.bytes,
        })
    }
}

fn emit(progress: Option<&ProgressSender>, percent: u8, status: RunStatus) {
    if let Some(sender) = progress {
        // Receiver may already be gone; progress is advisory
        let _ = sender.send(Progress { percent, status });
    }
}
