// ABOUTME: Query submitter - sends a question to the active chat and resolves the answer's references

use crate::chat::references::{ReferenceReport, ReferenceResolver};
use crate::client::{ArtemisApi, Scope};
use crate::error::{ArtemisError, Result};
use crate::models::{ActiveChat, ChatReply};
use crate::session::{SessionManager, UiState};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug)]
pub struct QueryOutcome {
    pub chat: ActiveChat,
    pub started_new_chat: bool,
    pub question: String,
    pub reply: ChatReply,
    /// Resolved separately so a reference failure does not hide the answer.
    pub references: Result<ReferenceReport, ArtemisError>,
}

#[derive(Clone)]
pub struct QuerySubmitter {
    api: Arc<dyn ArtemisApi>,
    sessions: SessionManager,
    resolver: ReferenceResolver,
}

impl QuerySubmitter {
    pub fn new(
        api: Arc<dyn ArtemisApi>,
        sessions: SessionManager,
        resolver: ReferenceResolver,
    ) -> Self {
        Self {
            api,
            sessions,
            resolver,
        }
    }

    /// Submit `question`. Blank input is ignored and yields `Ok(None)`.
    pub async fn submit_question(
        &self,
        state: &mut UiState,
        question: &str,
    ) -> Result<Option<QueryOutcome>> {
        let question = question.trim();
        if question.is_empty() {
            return Ok(None);
        }

        let started_new_chat = state.active_chat.is_none();
        let chat = self.sessions.ensure_chat(state).await?;

        info!("Submitting question to chat session {}", chat.session_id);
        let reply = self
            .api
            .query(Scope::Query, &chat.session_id, question)
            .await?;

        let references = self.resolver.display_references(&reply.id, question).await;
        if let Err(e) = &references {
            warn!("Failed to load references for message {}: {}", reply.id, e);
        }

        Ok(Some(QueryOutcome {
            chat,
            started_new_chat,
            question: question.to_string(),
            reply,
            references,
        }))
    }
}
