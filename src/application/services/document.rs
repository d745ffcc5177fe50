use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::application::services::RagService;
use crate::domain::{
    chunk_text, ports::SessionStore, Document, DocumentChunk, DomainError,
};

/// Document ingestion: chunk extracted text, embed, and index, recording
/// the document against its session.
pub struct DocumentService {
    store: Arc<dyn SessionStore>,
    rag: Arc<RagService>,
    chunk_size: usize,
    chunk_overlap: usize,
}

impl DocumentService {
    pub fn new(
        store: Arc<dyn SessionStore>,
        rag: Arc<RagService>,
        chunk_size: usize,
        chunk_overlap: usize,
    ) -> Self {
        Self {
            store,
            rag,
            chunk_size,
            chunk_overlap,
        }
    }

    /// Ingests already-extracted text for a session. Unlike chat,
    /// ingestion is allowed to fail: a document that cannot be embedded
    /// or indexed is not silently half-ingested.
    #[instrument(skip(self, text), fields(name))]
    pub async fn ingest(
        &self,
        session_id: Uuid,
        name: &str,
        content_type: &str,
        text: &str,
    ) -> Result<(Document, Vec<DocumentChunk>), DomainError> {
        let windows = chunk_text(text, self.chunk_size, self.chunk_overlap);

        let doc = Document::new(session_id, name)
            .with_content_type(content_type)
            .with_chunk_count(windows.len());
        self.store.save_document(&doc).await?;

        let chunks: Vec<DocumentChunk> = windows
            .into_iter()
            .enumerate()
            .map(|(index, content)| DocumentChunk::new(doc.id, session_id, content, index))
            .collect();

        self.rag.index_chunks(&chunks).await?;

        Ok((doc, chunks))
    }

    #[instrument(skip(self))]
    pub async fn list(&self, session_id: Uuid) -> Result<Vec<Document>, DomainError> {
        self.store.documents(session_id).await
    }

    /// Removes the document record and its vectors. The session check
    /// keeps one session from deleting another's documents.
    #[instrument(skip(self))]
    pub async fn delete(&self, session_id: Uuid, document_id: Uuid) -> Result<(), DomainError> {
        let doc = self
            .store
            .get_document(document_id)
            .await?
            .filter(|d| d.session_id == session_id)
            .ok_or_else(|| DomainError::not_found(format!("document {document_id}")))?;

        self.rag.delete_document(doc.id).await?;
        self.store.delete_document(doc.id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::embedding::HashedEmbedding;
    use crate::infrastructure::session_store::InMemorySessionStore;
    use crate::infrastructure::vector_index::InMemoryVectorIndex;

    fn service(store: Arc<InMemorySessionStore>) -> DocumentService {
        let embedding = Arc::new(HashedEmbedding::new(32).unwrap());
        let index = Arc::new(InMemoryVectorIndex::new(32));
        let rag = Arc::new(RagService::new(embedding, index, 3));
        DocumentService::new(store, rag, 1000, 200)
    }

    #[tokio::test]
    async fn test_ingest_records_document_and_chunks() {
        let store = Arc::new(InMemorySessionStore::new());
        let svc = service(store.clone());
        let session = store.create_session().await.unwrap();

        let text = "lorem ipsum ".repeat(300);
        let (doc, chunks) = svc
            .ingest(session.id, "notes.txt", "text/plain", &text)
            .await
            .unwrap();

        assert!(doc.chunk_count > 1);
        assert_eq!(doc.chunk_count, chunks.len());
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.chunk_index, i);
            assert_eq!(chunk.session_id, session.id);
            assert_eq!(chunk.document_id, doc.id);
        }

        let listed = svc.list(session.id).await.unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_rejects_foreign_session() {
        let store = Arc::new(InMemorySessionStore::new());
        let svc = service(store.clone());
        let owner = store.create_session().await.unwrap();
        let intruder = store.create_session().await.unwrap();

        let (doc, _) = svc
            .ingest(owner.id, "notes.txt", "text/plain", "some content here")
            .await
            .unwrap();

        let err = svc.delete(intruder.id, doc.id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
        assert_eq!(svc.list(owner.id).await.unwrap().len(), 1);
    }
}
