use crate::domain::{ConversationTurn, Message, Prompt};
use crate::infrastructure::config::PromptsConfig;

/// Builds the model prompt from retrieved chunks, conversation history,
/// and the current query.
///
/// Total over its inputs: empty chunk and history sequences are valid,
/// so assembly can never fail.
pub struct ContextAssembler {
    prompts: PromptsConfig,
}

impl ContextAssembler {
    pub fn new(prompts: PromptsConfig) -> Self {
        Self { prompts }
    }

    /// With retrieved chunks, the system instruction frames the task as
    /// answering from the joined document context (general knowledge as
    /// fallback); without chunks it is a plain assistant instruction.
    /// History entries keep their chronological order and the query is
    /// always the final user entry.
    pub fn assemble(
        &self,
        chunks: &[String],
        history: &[ConversationTurn],
        query: &str,
    ) -> Prompt {
        let context = if chunks.is_empty() {
            None
        } else {
            Some(chunks.join("\n\n"))
        };

        let system = match &context {
            Some(ctx) => self.prompts.context_system.replace("{context}", ctx),
            None => self.prompts.general_system.clone(),
        };

        let history = history
            .iter()
            .map(|turn| Message::new(turn.role, turn.content.clone()))
            .collect();

        Prompt {
            system,
            history,
            user: query.to_string(),
            context,
        }
    }
}
