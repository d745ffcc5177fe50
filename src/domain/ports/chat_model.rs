use crate::domain::{errors::DomainError, Prompt};
use async_trait::async_trait;

/// A language-model backend that turns an assembled prompt into text.
/// Generation is sampled (non-deterministic); callers must not depend on
/// exact output. Runtime failures surface as errors for the caller's
/// fallback path, never as panics.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn generate(&self, prompt: &Prompt) -> Result<String, DomainError>;
}
