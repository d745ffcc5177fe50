//! Application layer - Use cases and orchestration.
//!
//! Services here orchestrate domain logic through the domain ports
//! (traits) and never touch concrete adapters directly; `main` wires the
//! adapters in once at startup.

pub mod services;

pub use services::{ChatService, ContextAssembler, DocumentService, RagService, ResponseGenerator};
