pub mod error;
pub mod service;

pub use error::{PipelineError, Stage};
pub use service::PodcastService;

use crate::domain::ingest::ContentType;
use crate::domain::script::GeneratedScript;
use serde::Serialize;
use std::path::PathBuf;

/// One content submission, immutable once built
#[derive(Debug, Clone)]
pub struct ContentSubmission {
    pub raw_content: String,
    pub content_type: ContentType,
    pub style: String,
    pub voice: Option<String>,
}

/// Pipeline status, advanced strictly in order on the happy path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Pending,
    ScriptReady,
    AudioReady,
    Failed,
}

/// Advisory progress milestone, not a resumability checkpoint
#[derive(Debug, Clone, Copy)]
pub struct Progress {
    pub percent: u8,
    pub status: RunStatus,
}

pub type ProgressSender = tokio::sync::mpsc::UnboundedSender<Progress>;

/// An audio artifact persisted under the audio output directory
#[derive(Debug, Clone)]
pub struct StoredArtifact {
    pub file_name: String,
    pub path: PathBuf,
    pub mime_type: &'static str,
    pub duration_hint_secs: u64,
    pub bytes: Vec<u8>,
}

/// The result of one successful end-to-end run
#[derive(Debug, Clone)]
pub struct PodcastOutcome {
    pub script: GeneratedScript,
    pub artifact: StoredArtifact,
}
