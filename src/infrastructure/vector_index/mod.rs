mod in_memory;
mod qdrant;

pub use in_memory::InMemoryVectorIndex;
pub use qdrant::QdrantVectorIndex;

use std::sync::Arc;

use crate::domain::{ports::VectorIndex, DomainError};
use crate::infrastructure::config::VectorIndexConfig;

/// Builds the vector index backend. `dimension` comes from the embedder
/// so a mismatch between the two is impossible by construction.
pub async fn from_config(
    config: &VectorIndexConfig,
    dimension: usize,
) -> Result<Arc<dyn VectorIndex>, DomainError> {
    match config.backend.to_lowercase().as_str() {
        "memory" => Ok(Arc::new(InMemoryVectorIndex::new(dimension))),
        "qdrant" => Ok(Arc::new(
            QdrantVectorIndex::new(&config.url, &config.collection, dimension).await?,
        )),
        other => Err(DomainError::configuration(format!(
            "unsupported vector index backend: {other}"
        ))),
    }
}
