// ABOUTME: Document manager - lists documents with a capacity metric and deletes with two-step confirmation

use crate::client::{ArtemisApi, Scope};
use crate::error::{ArtemisError, Result};
use crate::models::{Capacity, Document};
use crate::session::UiState;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

pub const DOCUMENT_LIMIT: usize = 100;
pub const CAPACITY_LABEL: &str = "Artemis Capacity on Current Data";
pub const NO_DOCUMENTS: &str = "No documents available to display.";
pub const CONFIRM_DELETE_WARNING: &str =
    "Click again to confirm deletion. This action cannot be reversed!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentListing {
    pub documents: Vec<Document>,
    pub capacity: Capacity,
}

#[derive(Debug)]
pub enum DeleteOutcome {
    /// First click: the flag is now set, nothing was deleted.
    ConfirmationRequired,
    Deleted,
    /// The flag was cleared anyway; a new confirmation is needed to retry.
    Failed(ArtemisError),
}

#[derive(Clone)]
pub struct DocumentManager {
    pub(crate) api: Arc<dyn ArtemisApi>,
    pub(crate) collection_id: String,
    pub(crate) staging_dir: Option<PathBuf>,
}

impl DocumentManager {
    pub fn new(api: Arc<dyn ArtemisApi>, collection_id: impl Into<String>) -> Self {
        Self {
            api,
            collection_id: collection_id.into(),
            staging_dir: None,
        }
    }

    /// Stage uploads in `dir` instead of the system temp directory.
    #[must_use]
    pub fn with_staging_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.staging_dir = Some(dir.into());
        self
    }

    pub fn collection_id(&self) -> &str {
        &self.collection_id
    }

    pub async fn list_documents(&self) -> Result<DocumentListing> {
        let documents = self
            .api
            .list_documents(Scope::Ingest, &self.collection_id, 0, DOCUMENT_LIMIT)
            .await?;
        let capacity = Capacity::new(documents.len());
        info!(
            "Collection {} holds {} documents ({})",
            self.collection_id,
            documents.len(),
            capacity.label()
        );
        Ok(DocumentListing {
            documents,
            capacity,
        })
    }

    /// One click on a document's delete control.
    pub async fn delete_document(&self, state: &mut UiState, document_id: &str) -> DeleteOutcome {
        if !state.disarm_delete(document_id) {
            info!("Delete requested for document {}, awaiting confirmation", document_id);
            state.arm_delete(document_id);
            return DeleteOutcome::ConfirmationRequired;
        }

        match self
            .api
            .delete_documents(Scope::Ingest, &[document_id.to_string()])
            .await
        {
            Ok(()) => {
                info!("Deleted document {}", document_id);
                DeleteOutcome::Deleted
            }
            Err(e) => {
                warn!("Failed to delete document {}: {}", document_id, e);
                DeleteOutcome::Failed(e)
            }
        }
    }
}
