mod conversation;
mod document;
mod embedding;
mod prompt;
mod session;

pub use conversation::{ConversationTurn, Message, MessageRole};
pub use document::{chunk_text, Document, DocumentChunk, ScoredChunk};
pub use embedding::Embedding;
pub use prompt::Prompt;
pub use session::{Session, SessionStats};
