mod anthropic;
mod openai;

pub use anthropic::AnthropicChat;
pub use openai::OpenAiChat;

use std::str::FromStr;
use std::sync::Arc;

use crate::domain::{ports::ChatModel, DomainError, Message, MessageRole};
use crate::infrastructure::config::LlmConfig;

/// Supported model backends. The provider string from configuration is
/// parsed into this tagged form exactly once, at startup; per-request
/// code never dispatches on strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    OpenAi,
    Anthropic,
}

impl FromStr for LlmProvider {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "anthropic" => Ok(Self::Anthropic),
            other => Err(DomainError::configuration(format!(
                "unsupported llm provider: {other}"
            ))),
        }
    }
}

/// Resolves configuration into a single generate-from-messages backend.
/// An error here leaves the response generator unavailable; it is not
/// fatal to the process because the degraded reply path exists.
pub fn resolve(config: &LlmConfig) -> Result<Arc<dyn ChatModel>, DomainError> {
    match config.provider.parse::<LlmProvider>()? {
        LlmProvider::OpenAi => Ok(Arc::new(OpenAiChat::from_config(config)?)),
        LlmProvider::Anthropic => Ok(Arc::new(AnthropicChat::from_config(config)?)),
    }
}

/// History turns map onto the backend's two conversational roles; the
/// system instruction travels separately as the agent preamble.
fn to_backend_message(message: &Message) -> rig::completion::Message {
    match message.role {
        MessageRole::Assistant => rig::completion::Message::assistant(message.content.clone()),
        _ => rig::completion::Message::user(message.content.clone()),
    }
}
