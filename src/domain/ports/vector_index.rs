use crate::domain::{errors::DomainError, DocumentChunk, Embedding, ScoredChunk};
use async_trait::async_trait;
use uuid::Uuid;

/// Nearest-neighbor storage for chunk vectors.
///
/// `query` returns at most `top_k` chunks ordered by ascending cosine
/// distance, filtered strictly to the given session: a chunk indexed
/// under one session must never match a query scoped to another.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    async fn upsert(&self, chunk: &DocumentChunk, embedding: &Embedding)
        -> Result<(), DomainError>;
    async fn query(
        &self,
        session_id: Uuid,
        query: &Embedding,
        top_k: usize,
    ) -> Result<Vec<ScoredChunk>, DomainError>;
    async fn delete_by_document(&self, document_id: Uuid) -> Result<(), DomainError>;
}
