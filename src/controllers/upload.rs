use axum::{extract::Multipart, extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    domain::ingest::{ContentType, IngestService},
    error::{AppError, AppResult},
};

/// Response for POST /upload-file
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub content: String,
}

pub struct UploadController {
    ingest_service: Arc<IngestService>,
}

impl UploadController {
    pub fn new(ingest_service: Arc<IngestService>) -> Self {
        Self { ingest_service }
    }

    /// POST /upload-file - extract plain text from an uploaded file.
    ///
    /// Plain text is returned unchanged, HTML is stripped to visible text,
    /// anything else is a 400.
    pub async fn upload_file(
        State(controller): State<Arc<UploadController>>,
        mut multipart: Multipart,
    ) -> AppResult<Json<UploadResponse>> {
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(format!("invalid multipart body: {}", e)))?
        {
            if field.name() != Some("file") {
                continue;
            }

            let content_type = detect_content_type(
                field.content_type().map(|ct| ct.to_string()),
                field.file_name().map(|n| n.to_string()),
            )?;

            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;

            let raw = String::from_utf8(data.to_vec())
                .map_err(|_| AppError::BadRequest("file is not valid UTF-8 text".to_string()))?;

            let content = controller
                .ingest_service
                .ingest(&raw, content_type)
                .await
                .map_err(crate::domain::podcast::PipelineError::from)?;

            return Ok(Json(UploadResponse { content }));
        }

        Err(AppError::BadRequest("no file field in request".to_string()))
    }
}

/// Map the upload's MIME type (or filename extension) to a content type
fn detect_content_type(
    mime: Option<String>,
    file_name: Option<String>,
) -> Result<ContentType, AppError> {
    if let Some(mime) = mime.as_deref() {
        match mime {
            "text/plain" => return Ok(ContentType::Text),
            "text/html" => return Ok(ContentType::Html),
            "text/markdown" => return Ok(ContentType::Markdown),
            "application/octet-stream" | "" => {} // fall through to extension
            other => {
                return Err(AppError::UnsupportedMediaType(format!(
                    "unsupported file type '{}'",
                    other
                )))
            }
        }
    }

    match file_name
        .as_deref()
        .and_then(|n| n.rsplit('.').next())
        .map(|e| e.to_lowercase())
        .as_deref()
    {
        Some("txt") => Ok(ContentType::Text),
        Some("html") | Some("htm") => Ok(ContentType::Html),
        Some("md") | Some("markdown") => Ok(ContentType::Markdown),
        Some(ext) => Err(AppError::UnsupportedMediaType(format!(
            "unsupported file extension '.{}'",
            ext
        ))),
        None => Err(AppError::UnsupportedMediaType(
            "cannot determine file type".to_string(),
        )),
    }
}
