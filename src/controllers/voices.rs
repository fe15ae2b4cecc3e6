use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    domain::speech::{SpeechService, VoiceDescriptor},
    error::{AppError, AppResult},
};

/// Response for GET /voices
#[derive(Debug, Serialize, Deserialize)]
pub struct VoicesResponse {
    pub voices: Vec<VoiceDescriptor>,
}

pub struct VoicesController {
    speech_service: Arc<SpeechService>,
}

impl VoicesController {
    pub fn new(speech_service: Arc<SpeechService>) -> Self {
        Self { speech_service }
    }

    /// GET /voices - list voices available for synthesis.
    /// An empty list is a normal answer, not an error.
    pub async fn list_voices(
        State(controller): State<Arc<VoicesController>>,
    ) -> AppResult<Json<VoicesResponse>> {
        let voices = controller
            .speech_service
            .list_voices()
            .await
            .map_err(|e| AppError::ExternalService(e.to_string()))?;

        Ok(Json(VoicesResponse { voices }))
    }
}
