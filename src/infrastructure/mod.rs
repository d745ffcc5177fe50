pub mod config;
pub mod embedding;
pub mod extract;
pub mod llm;
pub mod session_store;
pub mod vector_index;

pub use config::{AppConfig, Config, PromptsConfig};
pub use embedding::{HashedEmbedding, OpenAiEmbedding};
pub use llm::{AnthropicChat, LlmProvider, OpenAiChat};
pub use session_store::InMemorySessionStore;
pub use vector_index::{InMemoryVectorIndex, QdrantVectorIndex};
