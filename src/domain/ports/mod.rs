mod chat_model;
mod embedding;
mod session_store;
mod vector_index;

pub use chat_model::ChatModel;
pub use embedding::EmbeddingService;
pub use session_store::SessionStore;
pub use vector_index::VectorIndex;
