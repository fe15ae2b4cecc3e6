#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error("audio synthesis failed: {0}")]
    SynthesisFailed(String),

    #[error("text-to-speech service unreachable: {0}")]
    Transport(String),
}
