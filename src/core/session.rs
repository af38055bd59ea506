//! Per-session conversation context.
//!
//! The source design kept one process-wide document/summary pair, which
//! made concurrent users overwrite each other's context. Here each
//! caller owns a [`Session`], and the REST facade keys them by UUID in a
//! [`SessionStore`].

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::core::error::{Error, Result};

/// Unique identifier for a conversation session
pub type SessionId = String;

/// The current answerable context: the most recent extracted document
/// text and the most recent raw summary.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub document_text: String,
    pub summary: String,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the summary at the start of a simplify attempt, so a failed
    /// extraction or remote call leaves nothing stale for the chatbot.
    pub fn begin_simplify(&mut self) {
        self.summary.clear();
    }

    /// Record a successful simplification. The summary is overwritten
    /// whole, never merged with a prior one.
    pub fn complete_simplify(&mut self, document_text: String, summary: String) {
        self.document_text = document_text;
        self.summary = summary;
    }

    pub fn has_summary(&self) -> bool {
        !self.summary.trim().is_empty()
    }
}

struct SessionEntry {
    session: Session,
    last_used: u64,
}

/// UUID-keyed session storage with an upper bound on retained sessions.
pub struct SessionStore {
    sessions: RwLock<HashMap<SessionId, SessionEntry>>,
    /// Monotonic sequence used to evict the least recently used session.
    seq: AtomicU64,
    max_sessions: usize,
}

impl SessionStore {
    pub fn new(max_sessions: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            seq: AtomicU64::new(0),
            max_sessions,
        }
    }

    fn next_seq(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::Relaxed)
    }

    /// Create a new empty session and return its id.
    pub async fn create(&self) -> SessionId {
        let id = Uuid::new_v4().to_string();
        let mut sessions = self.sessions.write().await;

        if sessions.len() >= self.max_sessions {
            if let Some(oldest_id) = sessions
                .iter()
                .min_by_key(|(_, entry)| entry.last_used)
                .map(|(id, _)| id.clone())
            {
                tracing::debug!(session_id = %oldest_id, "evicting least recently used session");
                sessions.remove(&oldest_id);
            }
        }

        sessions.insert(
            id.clone(),
            SessionEntry {
                session: Session::new(),
                last_used: self.next_seq(),
            },
        );
        id
    }

    /// Get a snapshot of a session by id.
    pub async fn get(&self, id: &str) -> Result<Session> {
        let mut sessions = self.sessions.write().await;
        let entry = sessions
            .get_mut(id)
            .ok_or_else(|| Error::SessionNotFound(id.to_string()))?;
        entry.last_used = self.next_seq();
        Ok(entry.session.clone())
    }

    /// Apply a mutation to a session in place.
    pub async fn update<F>(&self, id: &str, f: F) -> Result<()>
    where
        F: FnOnce(&mut Session),
    {
        let mut sessions = self.sessions.write().await;
        let entry = sessions
            .get_mut(id)
            .ok_or_else(|| Error::SessionNotFound(id.to_string()))?;
        f(&mut entry.session);
        entry.last_used = self.next_seq();
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(100)
    }
}
