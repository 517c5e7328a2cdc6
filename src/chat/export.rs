// ABOUTME: Conversation exporter - serializes a chat history, optionally with references, to CSV

use crate::chat::history::HISTORY_LIMIT;
use crate::chat::references::{
    format_score, truncate_at_sentence, ReferenceResolver, MAX_REFERENCES,
};
use crate::client::{ArtemisApi, Scope};
use crate::error::Result;
use crate::models::{ActiveChat, ChatMessage};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

pub const NO_ACTIVE_SESSION: &str = "No active chat session available to download.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportChoice {
    #[default]
    WithReferences,
    DialogueOnly,
}

impl ExportChoice {
    pub fn label(self) -> &'static str {
        match self {
            Self::WithReferences => "Yes (only available for the initial session)",
            Self::DialogueOnly => "No",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Self::WithReferences => "conversation_with_references.csv",
            Self::DialogueOnly => "conversation.csv",
        }
    }

    pub fn includes_references(self) -> bool {
        self == Self::WithReferences
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::WithReferences => Self::DialogueOnly,
            Self::DialogueOnly => Self::WithReferences,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    pub fn write_to(&self, directory: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(directory)?;
        let path = directory.join(self.file_name);
        std::fs::write(&path, &self.bytes)?;
        info!("Wrote {} bytes to {}", self.bytes.len(), path.display());
        Ok(path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    NoActiveSession,
    Ready(ExportArtifact),
}

#[derive(Clone)]
pub struct ConversationExporter {
    api: Arc<dyn ArtemisApi>,
    resolver: ReferenceResolver,
}

impl ConversationExporter {
    pub fn new(api: Arc<dyn ArtemisApi>, resolver: ReferenceResolver) -> Self {
        Self { api, resolver }
    }

    pub async fn download_conversation(
        &self,
        active: Option<&ActiveChat>,
        choice: ExportChoice,
    ) -> Result<ExportOutcome> {
        let Some(chat) = active else {
            return Ok(ExportOutcome::NoActiveSession);
        };

        let messages = self
            .api
            .list_chat_messages(Scope::Query, &chat.session_id, 0, HISTORY_LIMIT)
            .await?;
        let index = self.resolver.document_index().await?;

        let mut writer = csv::Writer::from_writer(Vec::new());
        if choice.includes_references() {
            writer.write_record(["Dialogue", "References"])?;
        } else {
            writer.write_record(["Dialogue"])?;
        }

        for message in &messages {
            let line = format!("{}: {}", message.author().label(), message.content);
            if choice.includes_references() {
                let cell = if message.is_service_turn() {
                    self.references_cell(message, &index).await?
                } else {
                    String::new()
                };
                writer.write_record([line.as_str(), cell.as_str()])?;
            } else {
                writer.write_record([line.as_str()])?;
            }
        }

        let bytes = writer.into_inner().map_err(|e| e.into_error())?;
        info!(
            "Exported {} messages of session {} ({})",
            messages.len(),
            chat.session_id,
            choice.file_name()
        );

        Ok(ExportOutcome::Ready(ExportArtifact {
            file_name: choice.file_name(),
            bytes,
        }))
    }

    /// Reference blocks for one service turn; every citation is searched at offset 0.
    async fn references_cell(
        &self,
        message: &ChatMessage,
        index: &HashMap<String, String>,
    ) -> Result<String> {
        let references = self
            .api
            .list_message_references(Scope::Query, &message.id)
            .await?;

        let mut cell = String::new();
        for reference in references.iter().take(MAX_REFERENCES) {
            let name = &reference.document_name;
            let score = format_score(reference.score);
            let Some(document_id) = index.get(name) else {
                cell.push_str(&format!("\nDocument name '{name}' not found in collection.\n\n"));
                continue;
            };

            match self.resolver.snippet(document_id, &message.content, 0).await? {
                Some(chunk) => {
                    let text = truncate_at_sentence(&chunk.text).trim();
                    cell.push_str(&format!("Document: {name}, Score: {score}, Text: {text}\n\n"));
                }
                None => {
                    cell.push_str(&format!("Document: {name}, Score: {score}, Text: No text found.\n\n"));
                }
            }
        }
        Ok(cell)
    }
}
