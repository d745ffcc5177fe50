mod hashed;
mod openai;

pub use hashed::HashedEmbedding;
pub use openai::OpenAiEmbedding;

use std::sync::Arc;

use crate::domain::{ports::EmbeddingService, DomainError};
use crate::infrastructure::config::EmbeddingConfig;

/// Builds the process-wide embedder. Failure here is fatal at startup:
/// an embedder that cannot load must never serve requests, and there is
/// no lazy-recovery path.
pub fn from_config(config: &EmbeddingConfig) -> Result<Arc<dyn EmbeddingService>, DomainError> {
    match config.provider.to_lowercase().as_str() {
        "openai" => Ok(Arc::new(OpenAiEmbedding::from_config(config)?)),
        "hashed" => Ok(Arc::new(HashedEmbedding::new(config.dimension)?)),
        other => Err(DomainError::configuration(format!(
            "unsupported embedding provider: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_provider_is_configuration_error() {
        let config = EmbeddingConfig {
            provider: "word2vec".to_string(),
            ..EmbeddingConfig::default()
        };
        let result = from_config(&config);
        assert!(matches!(result, Err(DomainError::Configuration(_))));
    }

    #[test]
    fn test_hashed_provider_resolves() {
        let service = from_config(&EmbeddingConfig::default()).unwrap();
        assert_eq!(service.dimension(), 384);
    }
}
