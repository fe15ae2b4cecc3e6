use lingua::{Language, LanguageDetectorBuilder};
use serde::{Deserialize, Serialize};

/// ISO 639-1 language codes supported for synthesis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LanguageCode {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "es")]
    Spanish,
    #[serde(rename = "fr")]
    French,
    #[serde(rename = "de")]
    German,
    #[serde(rename = "it")]
    Italian,
    #[serde(rename = "pt")]
    Portuguese,
}

impl LanguageCode {
    /// Get the ISO 639-1 code as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageCode::English => "en",
            LanguageCode::Spanish => "es",
            LanguageCode::French => "fr",
            LanguageCode::German => "de",
            LanguageCode::Italian => "it",
            LanguageCode::Portuguese => "pt",
        }
    }

    /// Parse an ISO 639-1 code, falling back to English for unknown codes
    pub fn from_iso(code: &str) -> Self {
        match code.to_lowercase().as_str() {
            "es" => LanguageCode::Spanish,
            "fr" => LanguageCode::French,
            "de" => LanguageCode::German,
            "it" => LanguageCode::Italian,
            "pt" => LanguageCode::Portuguese,
            _ => LanguageCode::English,
        }
    }

    /// Convert lingua Language to LanguageCode
    pub fn from_lingua(language: Language) -> Self {
        match language {
            Language::English => LanguageCode::English,
            Language::Spanish => LanguageCode::Spanish,
            Language::French => LanguageCode::French,
            Language::German => LanguageCode::German,
            Language::Italian => LanguageCode::Italian,
            Language::Portuguese => LanguageCode::Portuguese,
        }
    }
}

impl std::fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Detect the language of the given text, defaulting to English
pub fn detect_language(text: &str) -> LanguageCode {
    let detector = LanguageDetectorBuilder::from_all_languages().build();

    if let Some(language) = detector.detect_language_of(text) {
        LanguageCode::from_lingua(language)
    } else {
        tracing::warn!("Could not detect language, falling back to English");
        LanguageCode::English
    }
}
