//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};

use crate::{infrastructure::dto::http::ParticipantDto, ui::state::AppState};
use tallyroom_shared::protocol::SharedStateDto;

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Current shared state, in the same format as the WebSocket snapshot
pub async fn get_state(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SharedStateDto>, StatusCode> {
    match state.gateway.snapshot().await {
        Ok(snapshot) => Ok(Json(SharedStateDto::from(&snapshot))),
        Err(e) => {
            tracing::error!("Failed to read shared state: {}", e);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}

/// Connected participants, in connection order
pub async fn get_participants(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ParticipantDto>>, StatusCode> {
    match state.gateway.participants().await {
        Ok(participants) => Ok(Json(
            participants.into_iter().map(ParticipantDto::from).collect(),
        )),
        Err(e) => {
            tracing::error!("Failed to list participants: {}", e);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}
