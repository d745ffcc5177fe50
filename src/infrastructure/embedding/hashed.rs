use async_trait::async_trait;
use sha2::{Digest, Sha256};

use crate::domain::{ports::EmbeddingService, DomainError, Embedding};

/// Offline embedder: SHA-256 feature hashing over whitespace tokens,
/// L2-normalized. Needs no model download or API key, and always
/// produces the same vector for the same input, batched or not.
#[derive(Debug)]
pub struct HashedEmbedding {
    dimension: usize,
}

impl HashedEmbedding {
    pub fn new(dimension: usize) -> Result<Self, DomainError> {
        if dimension == 0 {
            return Err(DomainError::configuration(
                "embedding dimension must be positive",
            ));
        }
        Ok(Self { dimension })
    }

    fn embed_one(&self, text: &str) -> Embedding {
        let mut values = vec![0.0f32; self.dimension];

        for token in text.split_whitespace() {
            let digest = Sha256::digest(token.to_lowercase().as_bytes());
            let bucket = u64::from_le_bytes([
                digest[0], digest[1], digest[2], digest[3], digest[4], digest[5], digest[6],
                digest[7],
            ]) as usize
                % self.dimension;
            let sign = if digest[8] & 1 == 0 { 1.0 } else { -1.0 };
            values[bucket] += sign;
        }

        let norm = values.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut values {
                *v /= norm;
            }
        }

        Embedding::new(values)
    }
}

#[async_trait]
impl EmbeddingService for HashedEmbedding {
    async fn embed(&self, text: &str) -> Result<Embedding, DomainError> {
        Ok(self.embed_one(text))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, DomainError> {
        Ok(texts.iter().map(|text| self.embed_one(text)).collect())
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_embed_is_deterministic() {
        let embedder = HashedEmbedding::new(128).unwrap();
        let a = embedder.embed("the quick brown fox").await.unwrap();
        let b = embedder.embed("the quick brown fox").await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_batch_matches_single() {
        let embedder = HashedEmbedding::new(128).unwrap();
        let single = embedder.embed("hello world").await.unwrap();
        let batch = embedder.embed_batch(&["hello world"]).await.unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0], single);
    }

    #[tokio::test]
    async fn test_vectors_have_configured_dimension() {
        let embedder = HashedEmbedding::new(77).unwrap();
        let v = embedder.embed("anything").await.unwrap();
        assert_eq!(v.dimension(), 77);
        assert_eq!(embedder.dimension(), 77);
    }

    #[tokio::test]
    async fn test_different_texts_differ() {
        let embedder = HashedEmbedding::new(128).unwrap();
        let a = embedder.embed("apples and oranges").await.unwrap();
        let b = embedder.embed("rust borrow checker").await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_shared_tokens_are_closer_than_disjoint() {
        let embedder = HashedEmbedding::new(256).unwrap();
        let base = embedder.embed("paris is the capital of france").await.unwrap();
        let related = embedder.embed("what is the capital of france").await.unwrap();
        let unrelated = embedder.embed("tokio async runtime internals").await.unwrap();

        assert!(base.cosine_distance(&related) < base.cosine_distance(&unrelated));
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert!(matches!(
            HashedEmbedding::new(0).unwrap_err(),
            DomainError::Configuration(_)
        ));
    }

    #[tokio::test]
    async fn test_empty_text_is_zero_vector() {
        let embedder = HashedEmbedding::new(16).unwrap();
        let v = embedder.embed("   ").await.unwrap();
        assert!(v.as_slice().iter().all(|x| *x == 0.0));
    }
}
