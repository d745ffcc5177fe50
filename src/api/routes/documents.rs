use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::state::AppState;
use crate::domain::{Document, DomainError};
use crate::infrastructure::extract;

#[derive(Debug, Serialize)]
pub struct DocumentResponse {
    pub id: Uuid,
    pub session_id: Uuid,
    pub name: String,
    pub content_type: String,
    pub chunk_count: usize,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Document> for DocumentResponse {
    fn from(doc: Document) -> Self {
        Self {
            id: doc.id,
            session_id: doc.session_id,
            name: doc.name,
            content_type: doc.content_type,
            chunk_count: doc.chunk_count,
            created_at: doc.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DocumentUploadResponse {
    pub session_id: Uuid,
    pub document_id: Uuid,
    pub filename: String,
    pub content_type: String,
    pub chunks_created: usize,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct SearchResultResponse {
    pub chunk_id: Uuid,
    pub document_id: Uuid,
    pub content: String,
    pub chunk_index: usize,
    pub distance: f32,
}

/// Accepts a multipart form with a `file` part (PDF or plain text),
/// extracts its text, and ingests it into the session's index.
pub async fn upload_document(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<DocumentUploadResponse>, StatusCode> {
    state
        .store
        .get_session(session_id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to load session");
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or(StatusCode::NOT_FOUND)?;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::warn!(error = %e, "Malformed multipart body");
        StatusCode::BAD_REQUEST
    })? {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().unwrap_or(extract::MIME_TEXT).to_string();
        let bytes = field.bytes().await.map_err(|e| {
            tracing::warn!(error = %e, "Failed to read upload body");
            StatusCode::BAD_REQUEST
        })?;

        let text = match extract::extract_text(&bytes, &content_type) {
            Ok(text) => text,
            Err(DomainError::Validation(msg)) => {
                tracing::warn!(%msg, filename = %filename, "Rejected upload");
                return Err(StatusCode::BAD_REQUEST);
            }
            Err(e) => {
                tracing::error!(error = %e, filename = %filename, "Extraction failed");
                return Err(StatusCode::UNPROCESSABLE_ENTITY);
            }
        };

        let (doc, chunks) = state
            .documents
            .ingest(session_id, &filename, &content_type, &text)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to ingest document");
                StatusCode::INTERNAL_SERVER_ERROR
            })?;

        return Ok(Json(DocumentUploadResponse {
            session_id,
            document_id: doc.id,
            filename: doc.name,
            content_type: doc.content_type,
            chunks_created: chunks.len(),
        }));
    }

    // No `file` part in the form.
    Err(StatusCode::BAD_REQUEST)
}

pub async fn list_documents(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<Vec<DocumentResponse>>, StatusCode> {
    state
        .store
        .get_session(session_id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to load session");
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or(StatusCode::NOT_FOUND)?;

    let docs = state.documents.list(session_id).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to list documents");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(docs.into_iter().map(DocumentResponse::from).collect()))
}

pub async fn delete_document(
    State(state): State<AppState>,
    Path((session_id, document_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, StatusCode> {
    match state.documents.delete(session_id, document_id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(DomainError::NotFound(_)) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!(error = %e, "Failed to delete document");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

pub async fn search_documents(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<Vec<SearchResultResponse>>, StatusCode> {
    let top_k = request.limit.unwrap_or_else(|| state.rag.default_top_k());

    let results = state
        .rag
        .search(session_id, &request.query, top_k)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Search failed");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok(Json(
        results
            .into_iter()
            .map(|r| SearchResultResponse {
                chunk_id: r.chunk.id,
                document_id: r.chunk.document_id,
                content: r.chunk.content,
                chunk_index: r.chunk.chunk_index,
                distance: r.distance,
            })
            .collect(),
    ))
}
