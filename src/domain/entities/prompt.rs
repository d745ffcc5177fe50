use serde::{Deserialize, Serialize};

use super::conversation::{Message, MessageRole};

/// An assembled model input: one system instruction, prior turns in
/// chronological order, and the current user query last. The joined
/// document context is kept alongside the messages so the degraded
/// response path can echo it without re-deriving anything.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prompt {
    pub system: String,
    pub history: Vec<Message>,
    pub user: String,
    pub context: Option<String>,
}

impl Prompt {
    /// Flattens into the role-tagged sequence a model backend consumes.
    pub fn messages(&self) -> Vec<Message> {
        let mut messages = Vec::with_capacity(self.history.len() + 2);
        messages.push(Message::new(MessageRole::System, self.system.clone()));
        messages.extend(self.history.iter().cloned());
        messages.push(Message::new(MessageRole::User, self.user.clone()));
        messages
    }

}
