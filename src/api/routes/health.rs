use axum::{extract::State, Json};
use serde::Serialize;

use crate::api::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub llm: String,
    pub vector_index: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".into(),
        version: env!("CARGO_PKG_VERSION").into(),
    })
}

/// Readiness reports the generator state but stays `200` either way:
/// an unavailable model degrades replies, it does not stop the service.
pub async fn readiness_check(State(state): State<AppState>) -> Json<ReadinessResponse> {
    let llm = if state.generator.is_ready() {
        "ready"
    } else {
        "unavailable"
    };

    Json(ReadinessResponse {
        status: "ready".into(),
        llm: llm.into(),
        vector_index: state.config.config.vector_index.backend.clone(),
    })
}
