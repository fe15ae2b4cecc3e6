use async_trait::async_trait;

/// Repository for podcast script generation.
/// Abstracts the underlying text-generation provider.
///
/// Implementations are responsible for:
/// - Sending the prompt in a single request (no chunking)
/// - Surfacing transport failures as errors; empty text is returned as-is
///   and classified by the domain service
#[async_trait]
pub trait ScriptRepository: Send + Sync {
    /// Generate text for the given prompt.
    ///
    /// # Errors
    /// Returns error if the provider call fails or is unreachable
    async fn generate(&self, prompt: &str) -> Result<String, String>;

    /// Cheap connectivity probe used by the deep health check
    async fn ping(&self) -> Result<(), String>;
}
