// ABOUTME: Chat session lifecycle - starts new chats on the default collection and switches the active chat

use crate::client::{ArtemisApi, Scope};
use crate::error::Result;
use crate::models::{chat::NEW_CHAT_LABEL, ActiveChat, ChatSessionSummary};
use crate::session::UiState;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub struct SessionManager {
    api: Arc<dyn ArtemisApi>,
    default_collection_id: String,
}

impl SessionManager {
    pub fn new(api: Arc<dyn ArtemisApi>, default_collection_id: impl Into<String>) -> Self {
        Self {
            api,
            default_collection_id: default_collection_id.into(),
        }
    }

    /// Create a chat session on the default collection and make it active.
    /// On failure the previous active chat is left untouched.
    pub async fn start_new_chat(&self, state: &mut UiState) -> Result<ActiveChat> {
        let session_id = self
            .api
            .create_chat_session(Scope::Query, &self.default_collection_id)
            .await
            .map_err(|e| {
                warn!("Failed to start a new chat session: {}", e);
                e
            })?;

        info!("Started chat session {}", session_id);
        let chat = ActiveChat::new(session_id, NEW_CHAT_LABEL);
        state.active_chat = Some(chat.clone());
        Ok(chat)
    }

    /// Return the active chat, starting one if this UI session has none.
    pub async fn ensure_chat(&self, state: &mut UiState) -> Result<ActiveChat> {
        match &state.active_chat {
            Some(chat) => Ok(chat.clone()),
            None => self.start_new_chat(state).await,
        }
    }

    /// Make `summary` the active chat. Returns true when the active chat changed
    /// and the view needs to be rebuilt.
    pub fn select_chat(&self, state: &mut UiState, summary: &ChatSessionSummary) -> bool {
        if state.active_session_id() == Some(summary.id.as_str()) {
            return false;
        }
        info!("Switching to chat session {}", summary.id);
        state.active_chat = Some(ActiveChat::new(summary.id.clone(), summary.label()));
        true
    }
}
