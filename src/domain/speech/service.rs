use super::error::SpeechError;
use super::language::detect_language;
use super::{AudioArtifact, VoiceDescriptor, VoiceSelection};
use crate::domain::script::GeneratedScript;
use crate::infrastructure::repositories::SpeechRepository;
use std::sync::Arc;
use std::time::Duration;

const CHARACTERS_PER_MINUTE: f32 = 1000.0;

/// Converts a generated script into audio through the external
/// text-to-speech service.
pub struct SpeechService {
    speech_repo: Arc<dyn SpeechRepository>,
    timeout: Duration,
    default_voice: Option<String>,
}

impl SpeechService {
    pub fn new(
        speech_repo: Arc<dyn SpeechRepository>,
        timeout: Duration,
        default_voice: Option<String>,
    ) -> Self {
        Self {
            speech_repo,
            timeout,
            default_voice,
        }
    }

    /// Synthesize the script with the given voice selection.
    ///
    /// When the caller supplied no voice id the provider picks a default for
    /// the selected language. An explicitly invalid voice id fails with
    /// `SynthesisFailed`; it is never silently replaced.
    pub async fn synthesize(
        &self,
        script: &GeneratedScript,
        voice: &VoiceSelection,
    ) -> Result<AudioArtifact, SpeechError> {
        tracing::info!(
            voice = voice.voice_id.as_deref().unwrap_or("<default>"),
            language = %voice.language,
            script_length = script.text.len(),
            "Starting audio synthesis"
        );

        let bytes = tokio::time::timeout(
            self.timeout,
            self.speech_repo
                .synthesize(&script.text, voice.voice_id.as_deref(), voice.language),
        )
        .await
        .map_err(|_| {
            SpeechError::SynthesisFailed(format!(
                "audio synthesis timed out after {}s",
                self.timeout.as_secs()
            ))
        })?
        .map_err(SpeechError::SynthesisFailed)?;

        if bytes.is_empty() {
            return Err(SpeechError::SynthesisFailed(
                "text-to-speech service returned no audio data".to_string(),
            ));
        }

        let duration_hint_secs =
            (script.text.len() as f32 / CHARACTERS_PER_MINUTE * 60.0) as u64;

        Ok(AudioArtifact {
            bytes,
            mime_type: self.speech_repo.mime_type(),
            duration_hint_secs,
        })
    }

    /// Build the voice selection for a run, detecting the script language
    /// when the caller did not pin one. A per-request voice wins over the
    /// configured default.
    pub fn select_voice(&self, requested_voice: Option<String>, script_text: &str) -> VoiceSelection {
        let language = detect_language(script_text);
        VoiceSelection {
            voice_id: requested_voice
                .filter(|v| !v.trim().is_empty())
                .or_else(|| self.default_voice.clone()),
            language,
        }
    }

    /// List the voices the provider offers for our language/quality tier.
    /// An empty list is a valid answer; transport failures are not.
    pub async fn list_voices(&self) -> Result<Vec<VoiceDescriptor>, SpeechError> {
        self.speech_repo
            .list_voices()
            .await
            .map_err(SpeechError::Transport)
    }

    /// Live connectivity round trip against the provider
    pub async fn ping(&self) -> Result<(), SpeechError> {
        self.speech_repo.ping().await.map_err(SpeechError::Transport)
    }
}
