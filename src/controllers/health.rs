use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::domain::speech::SpeechService;
use crate::infrastructure::repositories::ScriptRepository;

pub struct HealthController {
    script_repo: Arc<dyn ScriptRepository>,
    speech_service: Arc<SpeechService>,
}

#[derive(Debug, Deserialize)]
pub struct HealthParams {
    #[serde(default)]
    pub deep: bool,
}

impl HealthController {
    pub fn new(script_repo: Arc<dyn ScriptRepository>, speech_service: Arc<SpeechService>) -> Self {
        Self {
            script_repo,
            speech_service,
        }
    }

    /// GET / - liveness banner
    pub async fn root() -> impl IntoResponse {
        (StatusCode::OK, "PodGen API is running")
    }

    /// GET /api/health - service health.
    ///
    /// The default check is shallow and free. `?deep=true` performs live
    /// round trips against both external services, which costs real API
    /// calls and counts against rate limits; keep it out of frequent probes.
    pub async fn health(
        State(controller): State<Arc<HealthController>>,
        Query(params): Query<HealthParams>,
    ) -> impl IntoResponse {
        if !params.deep {
            return (
                StatusCode::OK,
                Json(json!({
                    "status": "healthy",
                    "script_service": "unchecked",
                    "tts_service": "unchecked",
                    "timestamp": chrono::Utc::now().to_rfc3339()
                })),
            );
        }

        let script_status = match controller.script_repo.ping().await {
            Ok(_) => "connected",
            Err(e) => {
                tracing::warn!(error = %e, "Script service connectivity check failed");
                "error"
            }
        };

        let tts_status = match controller.speech_service.ping().await {
            Ok(_) => "connected",
            Err(e) => {
                tracing::warn!(error = %e, "TTS service connectivity check failed");
                "error"
            }
        };

        let healthy = script_status == "connected" && tts_status == "connected";
        let status_code = if healthy {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        };

        (
            status_code,
            Json(json!({
                "status": if healthy { "healthy" } else { "degraded" },
                "script_service": script_status,
                "tts_service": tts_status,
                "timestamp": chrono::Utc::now().to_rfc3339()
            })),
        )
    }
}
