use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::domain::{ports::ChatModel, Prompt};
use crate::infrastructure::config::PromptsConfig;

/// Maximum characters of joined context echoed by the degraded path.
const MAX_CONTEXT_ECHO_CHARS: usize = 1000;

enum Backend {
    Ready(Arc<dyn ChatModel>),
    /// Backend construction failed at startup. Terminal for this
    /// instance: no re-initialization is attempted mid-request.
    Unavailable(String),
}

/// Produces the assistant reply, falling back to a deterministic answer
/// when the model backend is unavailable or fails at call time.
///
/// `generate` always returns a string: first choice is the backend's
/// text verbatim; otherwise an excerpt of the retrieved context; and
/// with no context either, a fixed "not configured" message.
pub struct ResponseGenerator {
    backend: Backend,
    prompts: PromptsConfig,
}

impl ResponseGenerator {
    pub fn ready(backend: Arc<dyn ChatModel>, prompts: PromptsConfig) -> Self {
        Self {
            backend: Backend::Ready(backend),
            prompts,
        }
    }

    pub fn unavailable(reason: impl Into<String>, prompts: PromptsConfig) -> Self {
        Self {
            backend: Backend::Unavailable(reason.into()),
            prompts,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.backend, Backend::Ready(_))
    }

    #[instrument(skip(self, prompt))]
    pub async fn generate(&self, prompt: &Prompt) -> String {
        match &self.backend {
            Backend::Ready(model) => match model.generate(prompt).await {
                Ok(text) => return text,
                Err(e) => {
                    warn!(error = %e, "model call failed, serving degraded response");
                }
            },
            Backend::Unavailable(reason) => {
                debug!(reason = %reason, "model backend unavailable, serving degraded response");
            }
        }

        self.degraded_reply(prompt)
    }

    fn degraded_reply(&self, prompt: &Prompt) -> String {
        match prompt.context.as_deref().filter(|c| !c.is_empty()) {
            Some(context) => {
                let excerpt: String = context.chars().take(MAX_CONTEXT_ECHO_CHARS).collect();
                format!("{}\n\n{}", self.prompts.fallback_label, excerpt)
            }
            None => self.prompts.unconfigured_reply.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;
    use async_trait::async_trait;

    struct EchoModel;

    #[async_trait]
    impl ChatModel for EchoModel {
        async fn generate(&self, prompt: &Prompt) -> Result<String, DomainError> {
            Ok(format!("model says: {}", prompt.user))
        }
    }

    struct BrokenModel;

    #[async_trait]
    impl ChatModel for BrokenModel {
        async fn generate(&self, _prompt: &Prompt) -> Result<String, DomainError> {
            Err(DomainError::external("upstream timeout"))
        }
    }

    fn prompt_with_context(context: Option<String>) -> Prompt {
        Prompt {
            system: "be helpful".to_string(),
            history: Vec::new(),
            user: "hello".to_string(),
            context,
        }
    }

    #[tokio::test]
    async fn test_ready_backend_text_returned_verbatim() {
        let generator = ResponseGenerator::ready(Arc::new(EchoModel), PromptsConfig::default());
        let reply = generator.generate(&prompt_with_context(None)).await;
        assert_eq!(reply, "model says: hello");
    }

    #[tokio::test]
    async fn test_backend_failure_echoes_context() {
        let generator = ResponseGenerator::ready(Arc::new(BrokenModel), PromptsConfig::default());
        let reply = generator
            .generate(&prompt_with_context(Some("relevant excerpt".to_string())))
            .await;

        assert!(reply.starts_with(&PromptsConfig::default().fallback_label));
        assert!(reply.contains("relevant excerpt"));
    }

    #[tokio::test]
    async fn test_context_echo_is_capped() {
        let generator = ResponseGenerator::unavailable("no key", PromptsConfig::default());
        let long_context = "x".repeat(5000);
        let reply = generator
            .generate(&prompt_with_context(Some(long_context)))
            .await;

        let label_len = PromptsConfig::default().fallback_label.len();
        assert_eq!(reply.len(), label_len + 2 + MAX_CONTEXT_ECHO_CHARS);
    }

    #[tokio::test]
    async fn test_unavailable_without_context_is_fixed_message() {
        let generator = ResponseGenerator::unavailable("no key", PromptsConfig::default());
        let reply = generator.generate(&prompt_with_context(None)).await;
        assert_eq!(reply, PromptsConfig::default().unconfigured_reply);
    }

    #[tokio::test]
    async fn test_generate_always_returns_nonempty() {
        let generators = [
            ResponseGenerator::ready(Arc::new(BrokenModel), PromptsConfig::default()),
            ResponseGenerator::unavailable("no key", PromptsConfig::default()),
        ];
        for generator in &generators {
            for context in [None, Some("ctx".to_string())] {
                let reply = generator.generate(&prompt_with_context(context)).await;
                assert!(!reply.is_empty());
            }
        }
    }
}
