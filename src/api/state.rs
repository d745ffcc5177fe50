use std::sync::Arc;

use crate::application::{ChatService, DocumentService, RagService, ResponseGenerator};
use crate::domain::ports::SessionStore;
use crate::infrastructure::AppConfig;

/// Long-lived components, constructed once in `main` and injected into
/// every handler. Nothing here is mutated after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn SessionStore>,
    pub chat: Arc<ChatService>,
    pub documents: Arc<DocumentService>,
    pub rag: Arc<RagService>,
    pub generator: Arc<ResponseGenerator>,
}

impl AppState {
    pub fn new(
        config: Arc<AppConfig>,
        store: Arc<dyn SessionStore>,
        chat: Arc<ChatService>,
        documents: Arc<DocumentService>,
        rag: Arc<RagService>,
        generator: Arc<ResponseGenerator>,
    ) -> Self {
        Self {
            config,
            store,
            chat,
            documents,
            rag,
            generator,
        }
    }
}
