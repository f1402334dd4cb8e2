//! Session History Store — per-session, append-only list of generated emails.
//!
//! Each session is owned by one interactive user and lives until it is ended
//! explicitly or sits idle past the configured limit. Sessions never share
//! history.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;

/// One generated email: a subject line and a body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationResult {
    pub subject: String,
    pub body: String,
}

/// A result as stored in history.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    #[serde(flatten)]
    pub result: GenerationResult,
    pub generated_at: DateTime<Utc>,
}

/// Ordered, append-only history for one session. There is no removal.
#[derive(Debug, Default)]
pub struct SessionHistory {
    entries: Vec<HistoryEntry>,
}

impl SessionHistory {
    /// Appends a result and returns its zero-based index.
    pub fn append(&mut self, result: GenerationResult) -> usize {
        self.entries.push(HistoryEntry {
            result,
            generated_at: Utc::now(),
        });
        self.entries.len() - 1
    }

    /// Every entry in insertion order.
    pub fn all(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// State held for one interactive session.
#[derive(Debug)]
pub struct Session {
    pub history: SessionHistory,
    last_seen: Instant,
}

impl Session {
    fn new() -> Self {
        Self {
            history: SessionHistory::default(),
            last_seen: Instant::now(),
        }
    }

    pub fn touch(&mut self) {
        self.last_seen = Instant::now();
    }
}

pub type SessionHandle = Arc<Mutex<Session>>;

/// All live sessions, keyed by an unguessable id.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, SessionHandle>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new, empty session.
    pub async fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(Session::new())));
        info!("Session {id} started");
        id
    }

    /// Looks up a live session.
    pub async fn get(&self, id: Uuid) -> Result<SessionHandle, AppError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
    }

    /// Ends a session, discarding its history. Returns false if it did not exist.
    pub async fn end(&self, id: Uuid) -> bool {
        let removed = self.sessions.write().await.remove(&id).is_some();
        if removed {
            info!("Session {id} ended");
        }
        removed
    }

    /// Drops sessions idle for longer than `max_idle`. Sessions busy in a
    /// generation call are kept. Returns the number removed.
    pub async fn sweep_idle(&self, max_idle: Duration) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, handle| match handle.try_lock() {
            Ok(session) => session.last_seen.elapsed() <= max_idle,
            Err(_) => true,
        });
        let removed = before - sessions.len();
        if removed > 0 {
            info!("Expired {removed} idle session(s)");
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(n: usize) -> GenerationResult {
        GenerationResult {
            subject: format!("Subject {n}"),
            body: format!("Body {n}"),
        }
    }

    #[test]
    fn test_history_preserves_insertion_order() {
        let mut history = SessionHistory::default();
        for n in 0..5 {
            assert_eq!(history.append(result(n)), n);
        }
        assert_eq!(history.len(), 5);
        for (i, entry) in history.all().iter().enumerate() {
            assert_eq!(entry.result, result(i));
        }
    }

    #[test]
    fn test_history_keeps_duplicates() {
        let mut history = SessionHistory::default();
        history.append(result(1));
        history.append(result(1));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_history_entry_serializes_flat() {
        let mut history = SessionHistory::default();
        history.append(result(3));
        let value = serde_json::to_value(history.get(0).unwrap()).unwrap();
        assert_eq!(value["subject"], "Subject 3");
        assert_eq!(value["body"], "Body 3");
        assert!(value["generated_at"].is_string());
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = SessionStore::new();
        let a = store.create().await;
        let b = store.create().await;
        assert_ne!(a, b);

        store.get(a).await.unwrap().lock().await.history.append(result(1));

        assert_eq!(store.get(a).await.unwrap().lock().await.history.len(), 1);
        assert!(store.get(b).await.unwrap().lock().await.history.is_empty());
    }

    #[tokio::test]
    async fn test_ended_session_is_gone() {
        let store = SessionStore::new();
        let id = store.create().await;
        assert!(store.end(id).await);
        assert!(!store.end(id).await);
        assert!(matches!(store.get(id).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_removes_only_idle_sessions() {
        let store = SessionStore::new();
        let stale = store.create().await;
        tokio::time::advance(Duration::from_secs(120)).await;
        let fresh = store.create().await;

        assert_eq!(store.sweep_idle(Duration::from_secs(60)).await, 1);
        assert!(store.get(stale).await.is_err());
        assert!(store.get(fresh).await.is_ok());
        assert_eq!(store.len().await, 1);
    }
}
