pub mod error;
pub mod service;

pub use error::IngestError;
pub use service::IngestService;

use serde::{Deserialize, Serialize};

/// Content types a submission may declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Pdf,
    Url,
    Text,
    Markdown,
    Html,
}

impl ContentType {
    /// Parse the caller-supplied type string (case-insensitive)
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "pdf" => Some(ContentType::Pdf),
            "url" => Some(ContentType::Url),
            "text" => Some(ContentType::Text),
            "markdown" => Some(ContentType::Markdown),
            "html" => Some(ContentType::Html),
            _ => None,
        }
    }

    /// Human-readable label used when building the generation prompt
    pub fn label(&self) -> &'static str {
        match self {
            ContentType::Pdf => "PDF document",
            ContentType::Url => "web page",
            ContentType::Text => "text",
            ContentType::Markdown => "markdown document",
            ContentType::Html => "HTML document",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ContentType::Pdf => "pdf",
            ContentType::Url => "url",
            ContentType::Text => "text",
            ContentType::Markdown => "markdown",
            ContentType::Html => "html",
        };
        write!(f, "{}", s)
    }
}
