use crate::domain::{errors::DomainError, Embedding};
use async_trait::async_trait;

/// Maps text to fixed-dimension dense vectors. `embed_batch` must return
/// exactly the vectors `embed` would for each input; batching is an
/// optimization, never a semantic change. `dimension` is fixed for the
/// lifetime of an instance.
#[async_trait]
pub trait EmbeddingService: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Embedding, DomainError>;
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, DomainError>;
    fn dimension(&self) -> usize;
}
