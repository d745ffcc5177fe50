use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::api::state::AppState;
use crate::domain::MessageRole;

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub message_count: usize,
    pub document_count: usize,
}

#[derive(Debug, Serialize)]
pub struct TurnResponse {
    pub role: MessageRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub session_id: Uuid,
    pub messages: Vec<TurnResponse>,
}

pub async fn create_session(
    State(state): State<AppState>,
) -> Result<Json<SessionResponse>, StatusCode> {
    let session = state.store.create_session().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to create session");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(SessionResponse {
        session_id: session.id,
        created_at: session.created_at,
        updated_at: session.updated_at,
        message_count: 0,
        document_count: 0,
    }))
}

pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>, StatusCode> {
    let session = state
        .store
        .get_session(id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to load session");
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or(StatusCode::NOT_FOUND)?;

    let stats = state.store.session_stats(id).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to load session stats");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(SessionResponse {
        session_id: session.id,
        created_at: session.created_at,
        updated_at: session.updated_at,
        message_count: stats.message_count,
        document_count: stats.document_count,
    }))
}

pub async fn get_history(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<HistoryResponse>, StatusCode> {
    state
        .store
        .get_session(id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to load session");
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or(StatusCode::NOT_FOUND)?;

    let turns = state.store.turns(id).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to load history");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(HistoryResponse {
        session_id: id,
        messages: turns
            .into_iter()
            .map(|turn| TurnResponse {
                role: turn.role,
                content: turn.content,
                created_at: turn.created_at,
            })
            .collect(),
    }))
}
