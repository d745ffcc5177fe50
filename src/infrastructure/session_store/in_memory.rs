use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

use crate::domain::{
    ports::SessionStore, ConversationTurn, Document, DomainError, Session, SessionStats,
};

#[derive(Default)]
struct Inner {
    sessions: HashMap<Uuid, Session>,
    /// Per-session turns in append (creation) order.
    turns: HashMap<Uuid, Vec<ConversationTurn>>,
    documents: HashMap<Uuid, Document>,
}

/// In-process persistence behind the `SessionStore` port.
pub struct InMemorySessionStore {
    inner: RwLock<Inner>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create_session(&self) -> Result<Session, DomainError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        let session = Session::new();
        inner.sessions.insert(session.id, session.clone());
        Ok(session)
    }

    async fn get_session(&self, id: Uuid) -> Result<Option<Session>, DomainError> {
        let inner = self
            .inner
            .read()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        Ok(inner.sessions.get(&id).cloned())
    }

    async fn session_stats(&self, id: Uuid) -> Result<SessionStats, DomainError> {
        let inner = self
            .inner
            .read()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        if !inner.sessions.contains_key(&id) {
            return Err(DomainError::not_found(format!("session {id}")));
        }

        Ok(SessionStats {
            message_count: inner.turns.get(&id).map_or(0, Vec::len),
            document_count: inner
                .documents
                .values()
                .filter(|d| d.session_id == id)
                .count(),
        })
    }

    async fn append_turn(&self, turn: &ConversationTurn) -> Result<(), DomainError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        let session = inner
            .sessions
            .get_mut(&turn.session_id)
            .ok_or_else(|| DomainError::not_found(format!("session {}", turn.session_id)))?;
        session.updated_at = Utc::now();

        inner
            .turns
            .entry(turn.session_id)
            .or_default()
            .push(turn.clone());
        Ok(())
    }

    async fn turns(&self, session_id: Uuid) -> Result<Vec<ConversationTurn>, DomainError> {
        let inner = self
            .inner
            .read()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        Ok(inner.turns.get(&session_id).cloned().unwrap_or_default())
    }

    async fn recent_turns(
        &self,
        session_id: Uuid,
        limit: usize,
    ) -> Result<Vec<ConversationTurn>, DomainError> {
        let inner = self
            .inner
            .read()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        // Scan newest-first to honor the limit, then restore
        // chronological order; prompt assembly requires oldest-first.
        let mut recent: Vec<ConversationTurn> = inner
            .turns
            .get(&session_id)
            .map(|turns| turns.iter().rev().take(limit).cloned().collect())
            .unwrap_or_default();
        recent.reverse();

        Ok(recent)
    }

    async fn save_document(&self, doc: &Document) -> Result<(), DomainError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        let session = inner
            .sessions
            .get_mut(&doc.session_id)
            .ok_or_else(|| DomainError::not_found(format!("session {}", doc.session_id)))?;
        session.updated_at = Utc::now();

        inner.documents.insert(doc.id, doc.clone());
        Ok(())
    }

    async fn get_document(&self, id: Uuid) -> Result<Option<Document>, DomainError> {
        let inner = self
            .inner
            .read()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        Ok(inner.documents.get(&id).cloned())
    }

    async fn documents(&self, session_id: Uuid) -> Result<Vec<Document>, DomainError> {
        let inner = self
            .inner
            .read()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        let mut docs: Vec<Document> = inner
            .documents
            .values()
            .filter(|d| d.session_id == session_id)
            .cloned()
            .collect();
        docs.sort_by_key(|d| d.created_at);
        Ok(docs)
    }

    async fn delete_document(&self, id: Uuid) -> Result<(), DomainError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        inner.documents.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_recent_turns_chronological_with_limit() {
        let store = InMemorySessionStore::new();
        let session = store.create_session().await.unwrap();

        for i in 0..5 {
            store
                .append_turn(&ConversationTurn::user(session.id, format!("msg {i}")))
                .await
                .unwrap();
        }

        let recent = store.recent_turns(session.id, 3).await.unwrap();

        assert_eq!(recent.len(), 3);
        let contents: Vec<&str> = recent.iter().map(|t| t.content.as_str()).collect();
        assert_eq!(contents, ["msg 2", "msg 3", "msg 4"]);
        for pair in recent.windows(2) {
            assert!(pair[0].created_at <= pair[1].created_at);
        }
    }

    #[tokio::test]
    async fn test_recent_turns_limit_larger_than_history() {
        let store = InMemorySessionStore::new();
        let session = store.create_session().await.unwrap();

        store
            .append_turn(&ConversationTurn::user(session.id, "only one"))
            .await
            .unwrap();

        let recent = store.recent_turns(session.id, 10).await.unwrap();
        assert_eq!(recent.len(), 1);
    }

    #[tokio::test]
    async fn test_turns_do_not_cross_sessions() {
        let store = InMemorySessionStore::new();
        let a = store.create_session().await.unwrap();
        let b = store.create_session().await.unwrap();

        store
            .append_turn(&ConversationTurn::user(a.id, "for a"))
            .await
            .unwrap();

        assert!(store.recent_turns(b.id, 10).await.unwrap().is_empty());
        assert_eq!(store.turns(a.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_append_to_unknown_session_fails() {
        let store = InMemorySessionStore::new();
        let err = store
            .append_turn(&ConversationTurn::user(Uuid::new_v4(), "orphan"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_session_stats_counts_turns_and_documents() {
        let store = InMemorySessionStore::new();
        let session = store.create_session().await.unwrap();

        store
            .append_turn(&ConversationTurn::user(session.id, "hi"))
            .await
            .unwrap();
        store
            .append_turn(&ConversationTurn::assistant(session.id, "hello"))
            .await
            .unwrap();
        store
            .save_document(&Document::new(session.id, "notes.txt"))
            .await
            .unwrap();

        let stats = store.session_stats(session.id).await.unwrap();
        assert_eq!(stats.message_count, 2);
        assert_eq!(stats.document_count, 1);
    }

    #[tokio::test]
    async fn test_append_turn_bumps_updated_at() {
        let store = InMemorySessionStore::new();
        let session = store.create_session().await.unwrap();

        store
            .append_turn(&ConversationTurn::user(session.id, "hi"))
            .await
            .unwrap();

        let reloaded = store.get_session(session.id).await.unwrap().unwrap();
        assert!(reloaded.updated_at >= session.updated_at);
    }
}
