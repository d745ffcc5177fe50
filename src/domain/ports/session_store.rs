use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{errors::DomainError, ConversationTurn, Document, Session, SessionStats};

/// Persistence for sessions, their turns, and their document records.
/// Turns are append-only; reads happen after writes complete within the
/// same request chain, so no consistency games are needed here.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn create_session(&self) -> Result<Session, DomainError>;
    async fn get_session(&self, id: Uuid) -> Result<Option<Session>, DomainError>;
    async fn session_stats(&self, id: Uuid) -> Result<SessionStats, DomainError>;

    async fn append_turn(&self, turn: &ConversationTurn) -> Result<(), DomainError>;
    /// All turns of a session, oldest first.
    async fn turns(&self, session_id: Uuid) -> Result<Vec<ConversationTurn>, DomainError>;
    /// The most recent `limit` turns, in chronological (oldest-first)
    /// order. An implementation that scans newest-first must reverse
    /// before returning; prompt assembly depends on this ordering.
    async fn recent_turns(
        &self,
        session_id: Uuid,
        limit: usize,
    ) -> Result<Vec<ConversationTurn>, DomainError>;

    async fn save_document(&self, doc: &Document) -> Result<(), DomainError>;
    async fn get_document(&self, id: Uuid) -> Result<Option<Document>, DomainError>;
    async fn documents(&self, session_id: Uuid) -> Result<Vec<Document>, DomainError>;
    async fn delete_document(&self, id: Uuid) -> Result<(), DomainError>;
}
