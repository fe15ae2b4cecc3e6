#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("script generation failed: {0}")]
    GenerationFailed(String),

    #[error("script generation returned an empty response")]
    EmptyResponse,
}
