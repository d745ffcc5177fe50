use async_trait::async_trait;
use std::sync::RwLock;
use uuid::Uuid;

use crate::domain::{ports::VectorIndex, DocumentChunk, DomainError, Embedding, ScoredChunk};

/// In-process index over a flat vector list. Suits tests and single-node
/// deployments; the query contract (session filter, ascending cosine
/// distance, top-k cap) is identical to the Qdrant adapter's.
pub struct InMemoryVectorIndex {
    dimension: usize,
    chunks: RwLock<Vec<(DocumentChunk, Embedding)>>,
}

impl InMemoryVectorIndex {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            chunks: RwLock::new(Vec::new()),
        }
    }
}

#[async_trait]
impl VectorIndex for InMemoryVectorIndex {
    async fn upsert(
        &self,
        chunk: &DocumentChunk,
        embedding: &Embedding,
    ) -> Result<(), DomainError> {
        // Dimension mismatch means the embedder and index were built
        // against different models. Refuse the write.
        if embedding.dimension() != self.dimension {
            return Err(DomainError::configuration(format!(
                "embedding dimension {} does not match index dimension {}",
                embedding.dimension(),
                self.dimension
            )));
        }

        let mut store = self
            .chunks
            .write()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        store.retain(|(c, _)| c.id != chunk.id);
        store.push((chunk.clone(), embedding.clone()));
        Ok(())
    }

    async fn query(
        &self,
        session_id: Uuid,
        query: &Embedding,
        top_k: usize,
    ) -> Result<Vec<ScoredChunk>, DomainError> {
        let store = self
            .chunks
            .read()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        let mut results: Vec<ScoredChunk> = store
            .iter()
            .filter(|(chunk, _)| chunk.session_id == session_id)
            .map(|(chunk, embedding)| ScoredChunk {
                chunk: chunk.clone(),
                distance: query.cosine_distance(embedding),
            })
            .collect();

        results.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(top_k);

        Ok(results)
    }

    async fn delete_by_document(&self, document_id: Uuid) -> Result<(), DomainError> {
        let mut store = self
            .chunks
            .write()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        store.retain(|(chunk, _)| chunk.document_id != document_id);
        Ok(())
    }
}
