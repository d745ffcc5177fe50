use async_trait::async_trait;
use rig::client::{CompletionClient, ProviderClient};
use rig::completion::Chat;
use rig::providers::openai;

use crate::domain::{ports::ChatModel, DomainError, Prompt};
use crate::infrastructure::config::LlmConfig;

use super::to_backend_message;

pub struct OpenAiChat {
    client: openai::Client,
    model: String,
    temperature: f64,
}

impl OpenAiChat {
    pub fn from_config(config: &LlmConfig) -> Result<Self, DomainError> {
        if std::env::var("OPENAI_API_KEY")
            .map(|v| v.is_empty())
            .unwrap_or(true)
        {
            return Err(DomainError::configuration("OPENAI_API_KEY is not set"));
        }

        Ok(Self {
            client: openai::Client::from_env(),
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }
}

#[async_trait]
impl ChatModel for OpenAiChat {
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
