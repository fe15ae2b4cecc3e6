use super::speech_repository::{split_into_batches, SpeechRepository};
use crate::domain::speech::{LanguageCode, VoiceDescriptor};
use async_openai::{
    config::OpenAIConfig,
    types::{CreateSpeechRequest, SpeechModel, Voice},
    Client,
};
use async_trait::async_trait;
use std::sync::Arc;

/// OpenAI has a limit of 4096 characters per request
const MAX_BATCH_SIZE: usize = 4096;

/// Fixed prosody: normal speaking rate, not a per-request tunable
const SPEAKING_RATE: f32 = 1.0;

/// OpenAI implementation of the speech repository
pub struct OpenAiSpeechRepository {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
}

impl OpenAiSpeechRepository {
    pub fn new(client: Arc<Client<OpenAIConfig>>, model: String) -> Self {
        Self { client, model }
    }

    /// The voice catalogue OpenAI offers. Fixed; there is no listing endpoint.
    fn voice_catalogue() -> [(Voice, &'static str, &'static str); 6] {
        [
            (Voice::Alloy, "Alloy", "Neutral, balanced delivery"),
            (Voice::Echo, "Echo", "Warm, clear articulation"),
            (Voice::Fable, "Fable", "Expressive, storytelling tone"),
            (Voice::Onyx, "Onyx", "Deep, authoritative"),
            (Voice::Nova, "Nova", "Soft, friendly"),
            (Voice::Shimmer, "Shimmer", "Bright, crisp articulation"),
        ]
    }

    /// Resolve a caller-pinned voice id. Unknown ids are an error, never a
    /// silent fallback.
    fn resolve_voice(voice: &str) -> Result<Voice, String> {
        match voice.to_lowercase().as_str() {
            "alloy" => Ok(Voice::Alloy),
            "echo" => Ok(Voice::Echo),
            "fable" => Ok(Voice::Fable),
            "onyx" => Ok(Voice::Onyx),
            "nova" => Ok(Voice::Nova),
            "shimmer" => Ok(Voice::Shimmer),
            other => Err(format!("unknown voice id '{}'", other)),
        }
    }

    /// Default voice per language, used when the caller pins none
    fn default_voice_for_language(language: LanguageCode) -> Voice {
        match language {
            LanguageCode::English => Voice::Alloy,
            LanguageCode::Spanish => Voice::Echo,
            LanguageCode::French => Voice::Nova,
            LanguageCode::German => Voice::Onyx,
            LanguageCode::Italian => Voice::Fable,
            LanguageCode::Portuguese => Voice::Shimmer,
        }
    }

    /// Call the OpenAI speech API for a single text batch
    async fn call_openai(&self, text: &str, voice: Voice) -> Result<Vec<u8>, String> {
        tracing::info!(
            model = %self.model,
            voice = ?voice,
            text_length = text.len(),
            "Calling OpenAI speech API"
        );

        let model = match self.model.as_str() {
            "tts-1" => SpeechModel::Tts1,
            "tts-1-hd" => SpeechModel::Tts1Hd,
            other => SpeechModel::Other(other.to_string()),
        };

        let request = CreateSpeechRequest {
            model,
            input: text.to_string(),
            voice,
            response_format: None, // Defaults to MP3
            speed: Some(SPEAKING_RATE),
        };

        let response = self.client.audio().speech(request).await.map_err(|e| {
            tracing::error!(
                error = %e,
                model = %self.model,
                text_length = text.len(),
                "OpenAI speech API call failed"
            );
            format!("OpenAI speech error: {}", e)
        })?;

        Ok(response.bytes.to_vec())
    }
}

#[async_trait]
impl SpeechRepository for OpenAiSpeechRepository {
    async fn synthesize(
        &self,
        text: &str,
        voice: Option<&str>,
        language: LanguageCode,
    ) -> Result<Vec<u8>, String> {
        let start_time = std::time::Instant::now();

        let voice = match voice {
            Some(v) => Self::resolve_voice(v)?,
            None => Self::default_voice_for_language(language),
        };

        let batches = split_into_batches(text, MAX_BATCH_SIZE);
        tracing::info!(
            provider = "openai",
            voice = ?voice,
            batch_count = batches.len(),
            text_length = text.len(),
            "Text split into batches"
        );

        let mut merged_audio = Vec::new();
        for (index, batch) in batches.iter().enumerate() {
            let audio_data = self.call_openai(batch, voice.clone()).await?;
            merged_audio.extend(audio_data);

            tracing::debug!(
                batch_index = index,
                total_audio_size = merged_audio.len(),
                "Batch synthesized and merged"
            );
        }

        tracing::info!(
            provider = "openai",
            model = %self.model,
            latency_ms = start_time.elapsed().as_millis(),
            characters_count = text.len(),
            batch_count = batches.len(),
            audio_size_bytes = merged_audio.len(),
            "Audio synthesis completed"
        );

        Ok(merged_audio)
    }

    async fn list_voices(&self) -> Result<Vec<VoiceDescriptor>, String> {
        Ok(Self::voice_catalogue()
            .into_iter()
            .map(|(_voice, name, description)| VoiceDescriptor {
                id: name.to_lowercase(),
                name: name.to_string(),
                description: description.to_string(),
            })
            .collect())
    }

    // The voice catalogue is fixed, so a connectivity probe has to hit a
    // real endpoint instead
    async fn ping(&self) -> Result<(), String> {
        self.client
            .models()
            .list()
            .await
            .map(|_| ())
            .map_err(|e| format!("OpenAI connectivity check failed: {}", e))
    }

    fn mime_type(&self) -> &'static str {
        "audio/mpeg"
    }
}
