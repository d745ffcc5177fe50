use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::state::AppState;
use crate::domain::ConversationTurn;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Omitted: a fresh session is created for this conversation.
    pub session_id: Option<Uuid>,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub session_id: Uuid,
    pub user_message: String,
    pub assistant_message: String,
    pub created_at: DateTime<Utc>,
}

pub async fn chat_handler(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, StatusCode> {
    if request.message.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let session = match request.session_id {
        Some(id) => state
            .store
            .get_session(id)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to load session");
                StatusCode::INTERNAL_SERVER_ERROR
            })?
            .ok_or(StatusCode::NOT_FOUND)?,
        None => state.store.create_session().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to create session");
            StatusCode::INTERNAL_SERVER_ERROR
        })?,
    };

    let reply = state
        .chat
        .respond(session.id, &request.message)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to generate response");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    // The pipeline itself is read-only; both turns are persisted here,
    // after generation, in creation order.
    let user_turn = ConversationTurn::user(session.id, request.message.clone());
    let assistant_turn = ConversationTurn::assistant(session.id, reply.clone());

    for turn in [&user_turn, &assistant_turn] {
        state.store.append_turn(turn).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to persist turn");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
    }

    Ok(Json(ChatResponse {
        session_id: session.id,
        user_message: request.message,
        assistant_message: reply,
        created_at: assistant_turn.created_at,
    }))
}
