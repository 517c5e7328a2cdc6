// ABOUTME: Chat session and message models as returned by the remote service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Display label given to chats started from this front end.
pub const NEW_CHAT_LABEL: &str = "New Conversation";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Author {
    You,
    Artemis,
}

impl Author {
    pub fn label(self) -> &'static str {
        match self {
            Author::You => "You",
            Author::Artemis => "Artemis",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub content: String,
    /// Set on service turns; points at the user message being answered.
    #[serde(default)]
    pub reply_to: Option<String>,
}

impl ChatMessage {
    pub fn author(&self) -> Author {
        if self.reply_to.is_none() {
            Author::You
        } else {
            Author::Artemis
        }
    }

    pub fn is_service_turn(&self) -> bool {
        self.author() == Author::Artemis
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSessionSummary {
    pub id: String,
    #[serde(default)]
    pub collection_name: String,
    pub updated_at: DateTime<Utc>,
}

impl ChatSessionSummary {
    pub fn label(&self) -> String {
        format!(
            "{} - {}",
            self.collection_name,
            self.updated_at.format("%Y-%m-%d %H:%M:%S")
        )
    }
}

/// Answer returned by a query against a chat session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub id: String,
    pub content: String,
}

/// The chat session a UI session is currently looking at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveChat {
    pub session_id: String,
    pub display_name: String,
}

impl ActiveChat {
    pub fn new(session_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            display_name: display_name.into(),
        }
    }
}
