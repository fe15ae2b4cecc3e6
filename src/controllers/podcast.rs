use axum::{
    body::Body,
    extract::{Multipart, Path as AxumPath, State},
    http::{header, HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        ingest::{ContentType, IngestService},
        podcast::{ContentSubmission, PodcastService},
    },
    error::{AppError, AppResult},
};

/// Request for POST /generate-podcast
#[derive(Debug, Serialize, Deserialize)]
pub struct GeneratePodcastRequest {
    pub content: String,
    pub style: String,
    #[serde(rename = "type")]
    pub content_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
}

/// Response for POST /generate-podcast
#[derive(Debug, Serialize, Deserialize)]
pub struct GeneratePodcastResponse {
    pub script: String,
    pub audio_path: String,
    pub duration_hint_secs: u64,
}

pub struct PodcastController {
    podcast_service: Arc<PodcastService>,
    ingest_service: Arc<IngestService>,
    upload_dir: PathBuf,
    audio_dir: PathBuf,
}

/// A stored temporary upload, deleted on drop. `read_upload` removes the
/// file first on the read path, making the drop a no-op there.
struct TempUpload(PathBuf);

impl Drop for TempUpload {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.0) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(
                    path = %self.0.display(),
                    error = %e,
                    "Failed to delete temporary upload"
                );
            }
        }
    }
}

impl PodcastController {
    pub fn new(
        podcast_service: Arc<PodcastService>,
        ingest_service: Arc<IngestService>,
        upload_dir: PathBuf,
        audio_dir: PathBuf,
    ) -> Self {
        Self {
            podcast_service,
            ingest_service,
            upload_dir,
            audio_dir,
        }
    }

    /// POST /generate-podcast - JSON submission, returns script + artifact path
    pub async fn generate_podcast(
        State(controller): State<Arc<PodcastController>>,
        Json(request): Json<GeneratePodcastRequest>,
    ) -> AppResult<Json<GeneratePodcastResponse>> {
        if request.content.trim().is_empty() {
            return Err(AppError::BadRequest("No content provided".to_string()));
        }

        let content_type = parse_content_type(&request.content_type)?;

        let submission = ContentSubmission {
            raw_content: request.content,
            content_type,
            style: request.style,
            voice: request.voice,
        };

        let outcome = controller.podcast_service.run(submission, None).await?;

        Ok(Json(GeneratePodcastResponse {
            script: outcome.script.text,
            audio_path: format!("/audio/{}", outcome.artifact.file_name),
            duration_hint_secs: outcome.artifact.duration_hint_secs,
        }))
    }

    /// POST /api/generate - multipart form submission, returns the audio binary
    pub async fn generate(
        State(controller): State<Arc<PodcastController>>,
        mut multipart: Multipart,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        let mut style = String::from("casual");
        let mut content_type_field: Option<String> = None;
        let mut content: Option<String> = None;
        let mut voice: Option<String> = None;
        let mut uploaded_file: Option<TempUpload> = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(format!("invalid multipart body: {}", e)))?
        {
            match field.name().unwrap_or_default() {
                "style" => {
                    style = field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?;
                }
                "content_type" => {
                    content_type_field = Some(
                        field
                            .text()
                            .await
                            .map_err(|e| AppError::BadRequest(e.to_string()))?,
                    );
                }
                "content" => {
                    content = Some(
                        field
                            .text()
                            .await
                            .map_err(|e| AppError::BadRequest(e.to_string()))?,
                    );
                }
                "voice" => {
                    voice = Some(
                        field
                            .text()
                            .await
                            .map_err(|e| AppError::BadRequest(e.to_string()))?,
                    );
                }
                "file" => {
                    let data = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?;
                    let path = controller.save_upload(&data).await?;
                    uploaded_file = Some(TempUpload(path));
                }
                other => {
                    tracing::debug!(field = other, "Ignoring unknown multipart field");
                }
            }
        }

        let content_type = parse_content_type(
            content_type_field
                .as_deref()
                .ok_or_else(|| AppError::BadRequest("content_type is required".to_string()))?,
        )?;

        // An uploaded file wins over inline content; the temporary file is
        // deleted on every exit path, including the early returns above via
        // the drop guard. Normalization happens once, inside the pipeline.
        let raw_content = if let Some(upload) = &uploaded_file {
            controller
                .ingest_service
                .read_upload(&upload.0)
                .await
                .map_err(crate::domain::podcast::PipelineError::from)?
        } else {
            content.unwrap_or_default()
        };

        if raw_content.trim().is_empty() {
            return Err(AppError::BadRequest("No content provided".to_string()));
        }

        let submission = ContentSubmission {
            raw_content,
            content_type,
            style,
            voice,
        };

        let outcome = controller.podcast_service.run(submission, None).await?;

        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            outcome
                .artifact
                .mime_type
                .parse()
                .map_err(|_| AppError::Internal("invalid content type".to_string()))?,
        );
        headers.insert(
            header::CONTENT_DISPOSITION,
            "attachment; filename=\"podcast.mp3\""
                .parse()
                .map_err(|_| AppError::Internal("invalid header value".to_string()))?,
        );
        if let Ok(value) = outcome.artifact.duration_hint_secs.to_string().parse() {
            headers.insert("X-Duration-Seconds", value);
        }

        Ok((StatusCode::OK, headers, Body::from(outcome.artifact.bytes)))
    }

    /// GET /audio/:filename - stream a previously produced artifact
    pub async fn serve_audio(
        State(controller): State<Arc<PodcastController>>,
        AxumPath(filename): AxumPath<String>,
    ) -> AppResult<(HeaderMap, Body)> {
        // Artifact names are uuid-based; anything path-like is not ours
        if filename.contains('/') || filename.contains('\\') || filename.contains("..") {
            return Err(AppError::NotFound(format!("audio file {}", filename)));
        }

        let path = controller.audio_dir.join(&filename);
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|_| AppError::NotFound(format!("audio file {}", filename)))?;

        let mime = match path.extension().and_then(|e| e.to_str()) {
            Some("wav") => "audio/wav",
            Some("mp3") => "audio/mpeg",
            _ => "application/octet-stream",
        };

        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            mime.parse()
                .map_err(|_| AppError::Internal("invalid content type".to_string()))?,
        );

        Ok((headers, Body::from(bytes)))
    }

    /// Persist an uploaded file under a unique name in the upload directory
    async fn save_upload(&self, data: &[u8]) -> AppResult<PathBuf> {
        tokio::fs::create_dir_all(&self.upload_dir)
            .await
            .map_err(|e| AppError::Internal(format!("failed to create upload dir: {}", e)))?;

        let path = self.upload_dir.join(format!("upload-{}", Uuid::new_v4()));
        tokio::fs::write(&path, data)
            .await
            .map_err(|e| AppError::Internal(format!("failed to store upload: {}", e)))?;

        Ok(path)
    }
}

fn parse_content_type(value: &str) -> Result<ContentType, AppError> {
    ContentType::parse(value)
        .ok_or_else(|| AppError::BadRequest(format!("unknown content type '{}'", value)))
}
