//! Per-conversation state

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use steerkit_types::MatchResult;
use tracing::debug;
use uuid::Uuid;

/// Matches selected in one turn, kept for diagnostics
#[derive(Debug, Clone, Serialize)]
pub struct TurnRecord {
    /// When the turn was routed
    pub at: DateTime<Utc>,
    /// Modules selected this turn, in rank order
    pub matches: Vec<MatchResult>,
}

/// State owned by one conversation
///
/// Only the loader mutates a session; hosts read it for diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    id: String,
    created_at: DateTime<Utc>,
    loaded_module_ids: Vec<String>,
    turn_history: Vec<TurnRecord>,
}

impl Session {
    /// Start a session with a fresh random id
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4().to_string())
    }

    /// Start a session for a host-supplied conversation id
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            created_at: Utc::now(),
            loaded_module_ids: Vec::new(),
            turn_history: Vec::new(),
        }
    }

    /// Conversation id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// When the conversation started
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Modules already in context, in the order they were loaded
    pub fn loaded_module_ids(&self) -> &[String] {
        &self.loaded_module_ids
    }

    /// Check if a module is already in context
    pub fn is_loaded(&self, module_id: &str) -> bool {
        self.loaded_module_ids.iter().any(|id| id == module_id)
    }

    /// Per-turn match history
    pub fn turn_history(&self) -> &[TurnRecord] {
        &self.turn_history
    }

    pub(crate) fn mark_loaded(&mut self, module_id: &str) {
        if !self.is_loaded(module_id) {
            self.loaded_module_ids.push(module_id.to_string());
        }
    }

    pub(crate) fn record_turn(&mut self, matches: Vec<MatchResult>) {
        self.turn_history.push(TurnRecord {
            at: Utc::now(),
            matches,
        });
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Sessions of all open conversations, keyed by conversation id
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<String, Session>,
}

impl SessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a session with a generated id
    pub fn open(&mut self) -> String {
        let session = Session::new();
        let id = session.id().to_string();
        debug!("Opened session {}", id);
        self.sessions.insert(id.clone(), session);
        id
    }

    /// Get or open the session for a host-supplied conversation id
    pub fn open_with(&mut self, id: &str) -> &mut Session {
        self.sessions
            .entry(id.to_string())
            .or_insert_with(|| Session::with_id(id))
    }

    /// Get a session by id
    pub fn get(&self, id: &str) -> Option<&Session> {
        self.sessions.get(id)
    }

    /// Get a mutable session by id
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Session> {
        self.sessions.get_mut(id)
    }

    /// End a conversation, dropping its state
    pub fn close(&mut self, id: &str) -> Option<Session> {
        let session = self.sessions.remove(id);
        if session.is_some() {
            debug!("Closed session {}", id);
        }
        session
    }

    /// Get number of open sessions
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Check if no sessions are open
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
