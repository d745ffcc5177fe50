use std::sync::Arc;
use tracing::{instrument, warn};
use uuid::Uuid;

use crate::domain::{
    ports::{EmbeddingService, VectorIndex},
    DocumentChunk, DomainError, ScoredChunk,
};

/// Retrieval orchestration: query embedding plus session-scoped
/// nearest-neighbor lookup.
pub struct RagService {
    embedding: Arc<dyn EmbeddingService>,
    index: Arc<dyn VectorIndex>,
    default_top_k: usize,
}

impl RagService {
    pub fn new(
        embedding: Arc<dyn EmbeddingService>,
        index: Arc<dyn VectorIndex>,
        default_top_k: usize,
    ) -> Self {
        Self {
            embedding,
            index,
            default_top_k,
        }
    }

    /// Chunk texts most relevant to `query` within the session, best
    /// match first. Retrieval failures must never block response
    /// generation, so any embedding or index error degrades to an empty
    /// result here and is only logged.
    #[instrument(skip(self, query))]
    pub async fn retrieve(&self, session_id: Uuid, query: &str) -> Vec<String> {
        match self.search(session_id, query, self.default_top_k).await {
            Ok(results) => results.into_iter().map(|r| r.chunk.content).collect(),
            Err(e) => {
                warn!(error = %e, %session_id, "retrieval failed, continuing without context");
                Vec::new()
            }
        }
    }

    #[instrument(skip(self, query))]
    pub async fn search(
        &self,
        session_id: Uuid,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<ScoredChunk>, DomainError> {
        let embedding = self.embedding.embed(query).await?;
        self.index.query(session_id, &embedding, top_k).await
    }

    #[instrument(skip(self, chunks), fields(count = chunks.len()))]
    pub async fn index_chunks(&self, chunks: &[DocumentChunk]) -> Result<(), DomainError> {
        if chunks.is_empty() {
            return Ok(());
        }

        let texts: Vec<&str> = chunks.iter().map(|c| c.content.as_str()).collect();
        let embeddings = self.embedding.embed_batch(&texts).await?;

        for (chunk, embedding) in chunks.iter().zip(embeddings.iter()) {
            self.index.upsert(chunk, embedding).await?;
        }

        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete_document(&self, document_id: Uuid) -> Result<(), DomainError> {
        self.index.delete_by_document(document_id).await
    }

    pub fn default_top_k(&self) -> usize {
        self.default_top_k
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Embedding;
    use async_trait::async_trait;

    struct FixedEmbedding;

    #[async_trait]
    impl EmbeddingService for FixedEmbedding {
        async fn embed(&self, _text: &str) -> Result<Embedding, DomainError> {
            Ok(Embedding::new(vec![1.0, 0.0]))
        }

        async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, DomainError> {
            Ok(texts.iter().map(|_| Embedding::new(vec![1.0, 0.0])).collect())
        }

        fn dimension(&self) -> usize {
            2
        }
    }

    struct FailingIndex;

    #[async_trait]
    impl VectorIndex for FailingIndex {
        async fn upsert(
            &self,
            _chunk: &DocumentChunk,
            _embedding: &Embedding,
        ) -> Result<(), DomainError> {
            Err(DomainError::external("store unreachable"))
        }

        async fn query(
            &self,
            _session_id: Uuid,
            _query: &Embedding,
            _top_k: usize,
        ) -> Result<Vec<ScoredChunk>, DomainError> {
            Err(DomainError::external("store unreachable"))
        }

        async fn delete_by_document(&self, _document_id: Uuid) -> Result<(), DomainError> {
            Err(DomainError::external("store unreachable"))
        }
    }

    #[tokio::test]
    async fn test_retrieve_recovers_index_errors_as_empty() {
        let rag = RagService::new(Arc::new(FixedEmbedding), Arc::new(FailingIndex), 3);
        let results = rag.retrieve(Uuid::new_v4(), "anything").await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_index_chunks_empty_is_noop() {
        let rag = RagService::new(Arc::new(FixedEmbedding), Arc::new(FailingIndex), 3);
        assert!(rag.index_chunks(&[]).await.is_ok());
    }
}
