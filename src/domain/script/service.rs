use super::error::ScriptError;
use crate::domain::ingest::ContentType;
use crate::infrastructure::repositories::ScriptRepository;
use std::sync::Arc;
use std::time::Duration;

/// A generated podcast transcript. Non-empty by construction.
#[derive(Debug, Clone)]
pub struct GeneratedScript {
    pub text: String,
}

/// Turns normalized content into a podcast script through the external
/// text-generation service.
pub struct ScriptService {
    script_repo: Arc<dyn ScriptRepository>,
    timeout: Duration,
}

impl ScriptService {
    pub fn new(script_repo: Arc<dyn ScriptRepository>, timeout: Duration) -> Self {
        Self {
            script_repo,
            timeout,
        }
    }

    /// Generate a podcast script for the given content and style.
    ///
    /// One upstream call per request, no retry. An empty upstream response is
    /// reported as `EmptyResponse`, distinct from transport failures.
    pub async fn generate(
        &self,
        content: &str,
        style: &str,
        content_type: ContentType,
    ) -> Result<GeneratedScript, ScriptError> {
        let prompt = build_prompt(content, style, content_type);

        tracing::info!(
            style = style,
            content_type = %content_type,
            content_length = content.len(),
            prompt_length = prompt.len(),
            "Requesting podcast script"
        );

        let start_time = std::time::Instant::now();

        let response = tokio::time::timeout(self.timeout, self.script_repo.generate(&prompt))
            .await
            .map_err(|_| {
                ScriptError::GenerationFailed(format!(
                    "script generation timed out after {}s",
                    self.timeout.as_secs()
                ))
            })?
            .map_err(ScriptError::GenerationFailed)?;

        let text = response.trim().to_string();
        if text.is_empty() {
            tracing::warn!("Script generation returned empty text");
            return Err(ScriptError::EmptyResponse);
        }

        tracing::info!(
            script_length = text.len(),
            latency_ms = start_time.elapsed().as_millis(),
            "Podcast script generated"
        );

        Ok(GeneratedScript { text })
    }
}

/// Build the single natural-language prompt for the generation service.
///
/// The content is embedded verbatim with no chunking or truncation. Long
/// content is passed through as-is; that is a known scaling limit of this
/// pipeline, not something this function tries to solve.
fn build_prompt(content: &str, style: &str, content_type: ContentType) -> String {
    format!(
        "Generate a podcast script in a {} style about the following {}:\n\n{}\n\nMake it engaging, informative, and natural-sounding. Include appropriate transitions and maintain the chosen style throughout.",
        style,
        content_type.label(),
        content
    )
}
