use super::error::IngestError;
use super::ContentType;
use html2text::from_read;
use std::path::Path;
use std::time::Duration;

/// Normalizes submitted content into plain text ready for script generation.
///
/// Plain text and markdown pass through unchanged. HTML is stripped down to
/// its visible text. URLs are fetched and then stripped like HTML. PDF is
/// declared in the API but no extraction collaborator is wired in, so it
/// fails with `UnsupportedFormat`.
pub struct IngestService {
    http_client: reqwest::Client,
}

impl IngestService {
    pub fn new(fetch_timeout: Duration) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(fetch_timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self { http_client }
    }

    /// Normalize raw submitted content to plain text
    pub async fn ingest(&self, raw: &str, content_type: ContentType) -> Result<String, IngestError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(IngestError::EmptyContent);
        }

        let text = match content_type {
            ContentType::Text | ContentType::Markdown => raw.to_string(),
            ContentType::Html => self.strip_html(raw.as_bytes()),
            ContentType::Url => self.fetch_url(raw).await?,
            ContentType::Pdf => {
                return Err(IngestError::UnsupportedFormat(
                    "PDF text extraction is not available".to_string(),
                ))
            }
        };

        if text.trim().is_empty() {
            return Err(IngestError::EmptyContent);
        }

        Ok(text)
    }

    /// Read a caller-supplied temporary upload and normalize it.
    ///
    /// The temporary file is deleted after reading, on success and failure
    /// alike.
    pub async fn ingest_upload(
        &self,
        path: &Path,
        content_type: ContentType,
    ) -> Result<String, IngestError> {
        let raw = self.read_upload(path).await?;
        self.ingest(&raw, content_type).await
    }

    /// Read a temporary upload without normalizing it, deleting the file on
    /// every exit path
    pub async fn read_upload(&self, path: &Path) -> Result<String, IngestError> {
        let read_result = tokio::fs::read_to_string(path).await;

        if let Err(e) = tokio::fs::remove_file(path).await {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Failed to delete temporary upload"
            );
        }

        read_result.map_err(|e| IngestError::ReadError(e.to_string()))
    }

    /// Strip HTML markup, keeping only visible text.
    /// Script and style contents are not rendered by html2text.
    pub fn strip_html(&self, html: &[u8]) -> String {
        let plain_text = from_read(html, usize::MAX);

        // Normalize whitespace (replace multiple spaces/newlines with single space)
        let whitespace_pattern = regex::Regex::new(r"\s+").unwrap();
        let normalized = whitespace_pattern.replace_all(&plain_text, " ");

        normalized.trim().to_string()
    }

    /// Fetch a URL and strip the response body down to visible text
    async fn fetch_url(&self, url: &str) -> Result<String, IngestError> {
        tracing::info!(url = url, "Fetching URL content");

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| IngestError::ReadError(format!("failed to fetch {}: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(IngestError::ReadError(format!(
                "fetching {} returned status {}",
                url,
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| IngestError::ReadError(format!("failed to read body of {}: {}", url, e)))?;

        Ok(self.strip_html(body.as_bytes()))
    }
}
