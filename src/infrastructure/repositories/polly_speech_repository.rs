use super::speech_repository::{split_into_batches, SpeechRepository};
use crate::domain::speech::{LanguageCode, VoiceDescriptor};
use async_trait::async_trait;
use aws_sdk_polly::{
    types::{Engine, LanguageCode as PollyLanguageCode, OutputFormat, VoiceId},
    Client as PollyClient,
};
use std::sync::Arc;

/// AWS Polly has a limit of 3000 characters per request
const MAX_BATCH_SIZE: usize = 3000;

/// AWS Polly implementation of the speech repository.
/// Always uses the neural engine and MP3 output.
pub struct PollySpeechRepository {
    polly_client: Arc<PollyClient>,
    /// Language whose voices the catalogue endpoint lists
    catalogue_language: LanguageCode,
}

impl PollySpeechRepository {
    pub fn new(polly_client: Arc<PollyClient>, catalogue_language: LanguageCode) -> Self {
        Self {
            polly_client,
            catalogue_language,
        }
    }

    /// Default neural voice per language, used when the caller pins none
    fn default_voice_for_language(language: LanguageCode) -> &'static str {
        match language {
            LanguageCode::English => "Joanna",
            LanguageCode::Spanish => "Lupe",
            LanguageCode::French => "Lea",
            LanguageCode::German => "Vicki",
            LanguageCode::Italian => "Bianca",
            LanguageCode::Portuguese => "Ines",
        }
    }

    fn polly_language_code(language: LanguageCode) -> PollyLanguageCode {
        match language {
            LanguageCode::English => PollyLanguageCode::EnUs,
            LanguageCode::Spanish => PollyLanguageCode::EsEs,
            LanguageCode::French => PollyLanguageCode::FrFr,
            LanguageCode::German => PollyLanguageCode::DeDe,
            LanguageCode::Italian => PollyLanguageCode::ItIt,
            LanguageCode::Portuguese => PollyLanguageCode::PtPt,
        }
    }

    /// Call AWS Polly to synthesize a single text batch
    async fn call_polly(&self, text: &str, voice_id: VoiceId) -> Result<Vec<u8>, String> {
        tracing::info!(
            voice_id = ?voice_id,
            engine = "neural",
            output_format = "Mp3",
            text_length = text.len(),
            "Calling AWS Polly synthesize_speech"
        );

        let voice_id_for_error = voice_id.clone();

        let result = self
            .polly_client
            .synthesize_speech()
            .text(text)
            .voice_id(voice_id)
            .output_format(OutputFormat::Mp3)
            .engine(Engine::Neural)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = ?e,
                    voice_id = ?voice_id_for_error,
                    text_length = text.len(),
                    "AWS Polly synthesize_speech failed"
                );
                format!("AWS Polly error: {:?}", e)
            })?;

        let audio_stream = result.audio_stream.collect().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to collect audio stream from Polly response");
            format!("Failed to read audio stream: {}", e)
        })?;

        Ok(audio_stream.into_bytes().to_vec())
    }
}

#[async_trait]
impl SpeechRepository for PollySpeechRepository {
    async fn synthesize(
        &self,
        text: &str,
        voice: Option<&str>,
        language: LanguageCode,
    ) -> Result<Vec<u8>, String> {
        let start_time = std::time::Instant::now();

        // Unknown voice ids reach Polly as-is and fail there; no fallback
        let voice_name = match voice {
            Some(v) => v.to_string(),
            None => Self::default_voice_for_language(language).to_string(),
        };
        let voice_id = VoiceId::from(voice_name.as_str());

        let batches = split_into_batches(text, MAX_BATCH_SIZE);
        tracing::info!(
            provider = "polly",
            voice = %voice_name,
            language = %language,
            batch_count = batches.len(),
            text_length = text.len(),
            "Text split into batches"
        );

        let mut merged_audio = Vec::new();
        for (index, batch) in batches.iter().enumerate() {
            let audio_data = self.call_polly(batch, voice_id.clone()).await?;
            merged_audio.extend(audio_data);

            tracing::debug!(
                batch_index = index,
                total_audio_size = merged_audio.len(),
                "Batch synthesized and merged"
            );
        }

        tracing::info!(
            provider = "polly",
            latency_ms = start_time.elapsed().as_millis(),
            characters_count = text.len(),
            batch_count = batches.len(),
            audio_size_bytes = merged_audio.len(),
            "Audio synthesis completed"
        );

        Ok(merged_audio)
    }

    /// Query Polly for neural voices in the configured language.
    /// An empty list (nothing matches the filter) is not an error.
    async fn list_voices(&self) -> Result<Vec<VoiceDescriptor>, String> {
        let language = Self::polly_language_code(self.catalogue_language);

        let output = self
            .polly_client
            .describe_voices()
            .engine(Engine::Neural)
            .language_code(language)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = ?e, "AWS Polly describe_voices failed");
                format!("AWS Polly error: {:?}", e)
            })?;

        let voices = output
            .voices
            .unwrap_or_default()
            .into_iter()
            .filter(|v| {
                v.supported_engines
                    .as_ref()
                    .map(|engines| engines.contains(&Engine::Neural))
                    .unwrap_or(false)
            })
            .filter_map(|v| {
                let id = v.id.as_ref()?.as_str().to_string();
                let name = v.name.clone().unwrap_or_else(|| id.clone());
                let description = format!(
                    "{} voice, {}",
                    v.gender
                        .as_ref()
                        .map(|g| g.as_str().to_string())
                        .unwrap_or_else(|| "Unknown".to_string()),
                    v.language_name
                        .clone()
                        .unwrap_or_else(|| "unknown language".to_string())
                );
                Some(VoiceDescriptor {
                    id,
                    name,
                    description,
                })
            })
            .collect();

        Ok(voices)
    }

    async fn ping(&self) -> Result<(), String> {
        self.polly_client
            .describe_voices()
            .engine(Engine::Neural)
            .send()
            .await
            .map(|_| ())
            .map_err(|e| format!("AWS Polly connectivity check failed: {:?}", e))
    }

    fn mime_type(&self) -> &'static str {
        "audio/mpeg"
    }
}
