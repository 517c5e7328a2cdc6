// ABOUTME: Bundle of the page components, all sharing one remote client

use crate::chat::{ConversationExporter, HistoryViewer, QuerySubmitter, RecentChats, ReferenceResolver};
use crate::client::ArtemisApi;
use crate::config::ServiceSettings;
use crate::documents::DocumentManager;
use crate::session::SessionManager;
use std::sync::Arc;

#[derive(Clone)]
pub struct Services {
    pub sessions: SessionManager,
    pub history: HistoryViewer,
    pub recent: RecentChats,
    pub references: ReferenceResolver,
    pub query: QuerySubmitter,
    pub exporter: ConversationExporter,
    pub documents: DocumentManager,
}

impl Services {
    pub fn new(
        api: Arc<dyn ArtemisApi>,
        default_collection_id: &str,
        document_collection_id: &str,
    ) -> Self {
        let sessions = SessionManager::new(api.clone(), default_collection_id);
        let references = ReferenceResolver::new(api.clone(), default_collection_id);

        Self {
            history: HistoryViewer::new(api.clone()),
            recent: RecentChats::new(api.clone()),
            query: QuerySubmitter::new(api.clone(), sessions.clone(), references.clone()),
            exporter: ConversationExporter::new(api.clone(), references.clone()),
            documents: DocumentManager::new(api, document_collection_id),
            sessions,
            references,
        }
    }

    pub fn from_settings(api: Arc<dyn ArtemisApi>, settings: &ServiceSettings) -> Self {
        Self::new(
            api,
            &settings.default_collection_id,
            &settings.document_collection_id,
        )
    }
}
