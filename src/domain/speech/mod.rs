pub mod error;
pub mod language;
pub mod service;

pub use error::SpeechError;
pub use language::LanguageCode;
pub use service::SpeechService;

use serde::{Deserialize, Serialize};

/// A voice offered by the text-to-speech service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceDescriptor {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// Caller-supplied or defaulted voice choice for one synthesis run
#[derive(Debug, Clone)]
pub struct VoiceSelection {
    pub voice_id: Option<String>,
    pub language: LanguageCode,
}

/// The synthesized audio handed back to the orchestrator
#[derive(Debug, Clone)]
pub struct AudioArtifact {
    pub bytes: Vec<u8>,
    pub mime_type: &'static str,
    /// Rough playback estimate derived from character count
    pub duration_hint_secs: u64,
}
