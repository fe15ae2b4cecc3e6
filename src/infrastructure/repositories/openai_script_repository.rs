use super::script_repository::ScriptRepository;
use async_openai::{
    config::OpenAIConfig,
    types::{ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs},
    Client,
};
use async_trait::async_trait;
use std::sync::Arc;

/// OpenAI chat-completions implementation of the script repository
pub struct OpenAiScriptRepository {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
}

impl OpenAiScriptRepository {
    pub fn new(client: Arc<Client<OpenAIConfig>>, model: String) -> Self {
        Self { client, model }
    }
}

#[async_trait]
impl ScriptRepository for OpenAiScriptRepository {
    async fn generate(&self, prompt: &str) -> Result<String, String> {
        let start_time = std::time::Instant::now();

        tracing::info!(
            model = %self.model,
            prompt_length = prompt.len(),
            "Calling OpenAI chat completions API"
        );

        let message = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()
            .map_err(|e| format!("failed to build chat message: {}", e))?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages([message.into()])
            .build()
            .map_err(|e| format!("failed to build chat request: {}", e))?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            tracing::error!(
                error = %e,
                model = %self.model,
                prompt_length = prompt.len(),
                "OpenAI chat completions API call failed"
            );
            format!("OpenAI chat error: {}", e)
        })?;

        // Empty/missing text is passed up for the domain service to classify
        let text = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        tracing::info!(
            provider = "openai",
            model = %self.model,
            latency_ms = start_time.elapsed().as_millis(),
            response_length = text.len(),
            "Script generation call completed"
        );

        Ok(text)
    }

    async fn ping(&self) -> Result<(), String> {
        self.client
            .models()
            .list()
            .await
            .map(|_| ())
            .map_err(|e| format!("OpenAI connectivity check failed: {}", e))
    }
}
