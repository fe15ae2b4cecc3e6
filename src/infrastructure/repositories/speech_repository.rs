use crate::domain::speech::{LanguageCode, VoiceDescriptor};
use async_trait::async_trait;

/// Repository for text-to-speech synthesis.
/// Abstracts the underlying TTS provider (OpenAI, AWS Polly, ...).
///
/// Implementations are responsible for:
/// - Handling provider-specific text length limitations
/// - Splitting text into batches if needed
/// - Merging audio chunks into a single audio stream
/// - Rejecting voice ids the provider does not offer
#[async_trait]
pub trait SpeechRepository: Send + Sync {
    /// Synthesize text to speech.
    ///
    /// `voice` pins a provider voice id; `None` lets the provider pick its
    /// default for the language. An unknown voice id is an error, never a
    /// silent fallback.
    async fn synthesize(
        &self,
        text: &str,
        voice: Option<&str>,
        language: LanguageCode,
    ) -> Result<Vec<u8>, String>;

    /// List the voices available for our language/quality tier.
    /// An empty list is a valid answer when nothing matches the filter.
    async fn list_voices(&self) -> Result<Vec<VoiceDescriptor>, String>;

    /// Live connectivity probe used by the deep health check.
    /// Must perform a real round trip against the provider.
    async fn ping(&self) -> Result<(), String>;

    /// MIME type of the audio this provider produces
    fn mime_type(&self) -> &'static str;
}

/// Split text into batches that respect sentence boundaries.
/// Each batch is at most `max_batch_size` characters.
///
/// Shared by all providers; only the size limit differs.
pub fn split_into_batches(text: &str, max_batch_size: usize) -> Vec<String> {
    if text.len() <= max_batch_size {
        return vec![text.to_string()];
    }

    let mut batches = Vec::new();
    let mut current_batch = String::new();

    // Split on sentence-ending punctuation
    let sentence_pattern = regex::Regex::new(r"([.!?]+\s+)").unwrap();
    let mut last_end = 0;

    for mat in sentence_pattern.find_iter(text) {
        push_piece(
            &text[last_end..mat.end()],
            max_batch_size,
            &mut current_batch,
            &mut batches,
        );
        last_end = mat.end();
    }

    // Handle remaining text after the last sentence boundary
    if last_end < text.len() {
        push_piece(
            &text[last_end..],
            max_batch_size,
            &mut current_batch,
            &mut batches,
        );
    }

    if !current_batch.is_empty() {
        batches.push(current_batch.trim().to_string());
    }

    batches
}

/// Append one sentence (or trailing fragment) to the current batch, flushing
/// when it would overflow. A piece longer than the limit itself is split by
/// characters so no batch ever exceeds it.
fn push_piece(
    piece: &str,
    max_batch_size: usize,
    current_batch: &mut String,
    batches: &mut Vec<String>,
) {
    if !current_batch.is_empty() && current_batch.len() + piece.len() > max_batch_size {
        batches.push(current_batch.trim().to_string());
        current_batch.clear();
    }

    if piece.len() > max_batch_size {
        let chars: Vec<char> = piece.chars().collect();
        for chunk in chars.chunks(max_batch_size) {
            let chunk: String = chunk.iter().collect();
            if chunk.len() >= max_batch_size {
                batches.push(chunk);
            } else {
                // Short tail of the oversized piece; later sentences can
                // still fill this batch
                current_batch.push_str(&chunk);
            }
        }
    } else {
        current_batch.push_str(piece);
    }
}
