// ABOUTME: History viewer - loads a chat session's messages and labels each turn

use crate::client::{ArtemisApi, Scope};
use crate::error::Result;
use crate::models::{Author, ChatMessage};
use std::sync::Arc;
use tracing::debug;

pub const HISTORY_LIMIT: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryLine {
    pub message_id: String,
    pub author: Author,
    pub content: String,
}

impl HistoryLine {
    pub fn render(&self) -> String {
        format!("{} says: {}", self.author.label(), self.content)
    }
}

impl From<&ChatMessage> for HistoryLine {
    fn from(message: &ChatMessage) -> Self {
        Self {
            message_id: message.id.clone(),
            author: message.author(),
            content: message.content.clone(),
        }
    }
}

#[derive(Clone)]
pub struct HistoryViewer {
    api: Arc<dyn ArtemisApi>,
}

impl HistoryViewer {
    pub fn new(api: Arc<dyn ArtemisApi>) -> Self {
        Self { api }
    }

    /// Messages of `session_id` in the order the service returns them.
    /// Without a session there is nothing to show.
    pub async fn display_chat_history(&self, session_id: Option<&str>) -> Result<Vec<HistoryLine>> {
        let Some(session_id) = session_id else {
            return Ok(Vec::new());
        };

        let messages = self
            .api
            .list_chat_messages(Scope::Query, session_id, 0, HISTORY_LIMIT)
            .await?;
        debug!("Loaded {} messages for session {}", messages.len(), session_id);

        Ok(messages.iter().map(HistoryLine::from).collect())
    }
}
