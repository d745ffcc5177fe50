mod assembler;
mod chat;
mod document;
mod generator;
mod rag;

pub use assembler::ContextAssembler;
pub use chat::ChatService;
pub use document::DocumentService;
pub use generator::ResponseGenerator;
pub use rag::RagService;
