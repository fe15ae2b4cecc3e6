use crate::domain::ingest::IngestError;
use crate::domain::script::ScriptError;
use crate::domain::speech::SpeechError;
use axum::http::StatusCode;

/// The pipeline stage an error originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Ingest,
    Script,
    Synthesis,
    Delivery,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Stage::Ingest => "ingest",
            Stage::Script => "script",
            Stage::Synthesis => "synthesis",
            Stage::Delivery => "delivery",
        };
        write!(f, "{}", s)
    }
}

/// A pipeline failure, tagged with the stage that produced it
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Script(#[from] ScriptError),

    #[error(transparent)]
    Synthesis(#[from] SpeechError),

    #[error("failed to persist audio artifact: {0}")]
    Delivery(String),
}

impl PipelineError {
    pub fn stage(&self) -> Stage {
        match self {
            Self::Ingest(_) => Stage::Ingest,
            Self::Script(_) => Stage::Script,
            Self::Synthesis(_) => Stage::Synthesis,
            Self::Delivery(_) => Stage::Delivery,
        }
    }

    /// Machine-readable error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Ingest(IngestError::UnsupportedFormat(_)) => "unsupported_format",
            Self::Ingest(IngestError::ReadError(_)) => "read_error",
            Self::Ingest(IngestError::EmptyContent) => "empty_content",
            Self::Script(ScriptError::GenerationFailed(_)) => "generation_failed",
            Self::Script(ScriptError::EmptyResponse) => "empty_response",
            Self::Synthesis(SpeechError::SynthesisFailed(_)) => "synthesis_failed",
            Self::Synthesis(SpeechError::Transport(_)) => "transport_error",
            Self::Delivery(_) => "delivery_failed",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Ingest(_) => StatusCode::BAD_REQUEST,
            Self::Script(_) | Self::Synthesis(_) => StatusCode::BAD_GATEWAY,
            Self::Delivery(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
