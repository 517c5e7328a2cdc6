// ABOUTME: Recent-sessions picker - lists the most recently updated chat sessions

use crate::client::{ArtemisApi, Scope};
use crate::error::Result;
use crate::models::ChatSessionSummary;
use std::sync::Arc;

pub const RECENT_CHATS_LIMIT: usize = 50;
pub const NO_RECENT_CHATS: &str = "No recent chats available.";

#[derive(Clone)]
pub struct RecentChats {
    api: Arc<dyn ArtemisApi>,
}

impl RecentChats {
    pub fn new(api: Arc<dyn ArtemisApi>) -> Self {
        Self { api }
    }

    pub async fn load_recent_chats(&self) -> Result<Vec<ChatSessionSummary>> {
        self.api
            .list_recent_chat_sessions(Scope::Query, 0, RECENT_CHATS_LIMIT)
            .await
    }
}
