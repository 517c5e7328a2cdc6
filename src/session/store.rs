// ABOUTME: Session-keyed store for UI state (active chat, armed deletions)
// Each UI session gets its own entry so concurrent users never share state

use crate::models::ActiveChat;
use std::collections::{HashMap, HashSet};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UiSessionId(Uuid);

impl UiSessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UiSessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UiSessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Default, Clone)]
pub struct UiState {
    pub active_chat: Option<ActiveChat>,
    armed_deletes: HashSet<String>,
}

impl UiState {
    pub fn active_session_id(&self) -> Option<&str> {
        self.active_chat.as_ref().map(|chat| chat.session_id.as_str())
    }

    pub fn is_delete_armed(&self, document_id: &str) -> bool {
        self.armed_deletes.contains(document_id)
    }

    pub fn arm_delete(&mut self, document_id: &str) {
        self.armed_deletes.insert(document_id.to_string());
    }

    /// Clear the confirmation flag, returning whether it was set.
    pub fn disarm_delete(&mut self, document_id: &str) -> bool {
        self.armed_deletes.remove(document_id)
    }
}

#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<UiSessionId, UiState>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fresh UI session and return its key.
    pub fn open(&mut self) -> UiSessionId {
        let id = UiSessionId::new();
        self.sessions.insert(id, UiState::default());
        id
    }

    pub fn get(&self, id: UiSessionId) -> Option<&UiState> {
        self.sessions.get(&id)
    }

    pub fn state_mut(&mut self, id: UiSessionId) -> &mut UiState {
        self.sessions.entry(id).or_default()
    }

    pub fn close(&mut self, id: UiSessionId) -> Option<UiState> {
        self.sessions.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
