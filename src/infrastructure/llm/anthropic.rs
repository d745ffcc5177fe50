use async_trait::async_trait;
use rig::client::{CompletionClient, ProviderClient};
use rig::completion::Chat;
use rig::providers::anthropic;

use crate::domain::{ports::ChatModel, DomainError, Prompt};
use crate::infrastructure::config::LlmConfig;

use super::to_backend_message;

pub struct AnthropicChat {
    client: anthropic::Client,
    model: String,
    temperature: f64,
}

impl AnthropicChat {
    pub fn from_config(config: &LlmConfig) -> Result<Self, DomainError> {
        if std::env::var("ANTHROPIC_API_KEY")
            .map(|v| v.is_empty())
            .unwrap_or(true)
        {
            return Err(DomainError::configuration("ANTHROPIC_API_KEY is not set"));
        }

        Ok(Self {
            client: anthropic::Client::from_env(),
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }
}

#[async_trait]
impl ChatModel for AnthropicChat {
    async fn generate(&self, prompt: &Prompt) -> Result<String, DomainError> {
        let agent = self
            .client
            .agent(&self.model)
            .preamble(&prompt.system)
            .temperature(self.temperature)
            .build();

        let history = prompt.history.iter().map(to_backend_message).collect();

        agent
            .chat(rig::completion::Message::user(prompt.user.clone()), history)
            .await
            .map_err(|e| DomainError::external(e.to_string()))
    }
}
