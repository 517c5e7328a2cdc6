// ABOUTME: Remote service seam - the ArtemisApi trait and the scoped credentials it runs under
// Query operations and ingestion/deletion operations use separate API keys

pub mod http;

pub use http::HttpArtemisClient;

use crate::error::Result;
use crate::models::{
    ChatMessage, ChatReply, ChatSessionSummary, Collection, Document, Reference, SearchChunk,
};
use async_trait::async_trait;
use std::fmt;

/// Which credential a remote call is made with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Chat sessions, messages, references, search.
    Query,
    /// Uploads, ingestion, document listing for management, deletion.
    Ingest,
}

#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[derive(Debug, Clone)]
pub struct Credentials {
    query: ApiKey,
    ingest: ApiKey,
}

impl Credentials {
    pub fn new(query: ApiKey, ingest: ApiKey) -> Self {
        Self { query, ingest }
    }

    pub fn key(&self, scope: Scope) -> &ApiKey {
        match scope {
            Scope::Query => &self.query,
            Scope::Ingest => &self.ingest,
        }
    }
}

/// Operations consumed from the hosted document question-answering service.
#[async_trait]
pub trait ArtemisApi: Send + Sync {
    /// Create a chat session bound to `collection_id`, returning its id.
    async fn create_chat_session(&self, scope: Scope, collection_id: &str) -> Result<String>;

    async fn list_chat_messages(
        &self,
        scope: Scope,
        session_id: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<ChatMessage>>;

    async fn list_recent_chat_sessions(
        &self,
        scope: Scope,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<ChatSessionSummary>>;

    async fn list_message_references(&self, scope: Scope, message_id: &str)
        -> Result<Vec<Reference>>;

    async fn get_collection(&self, scope: Scope, collection_id: &str) -> Result<Collection>;

    async fn list_documents(
        &self,
        scope: Scope,
        collection_id: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Document>>;

    /// Search content chunks of `collection_id`, restricted to `document_id`.
    async fn search_chunks(
        &self,
        scope: Scope,
        collection_id: &str,
        query: &str,
        document_id: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<SearchChunk>>;

    /// Submit `question` to the chat session and wait for the answer.
    async fn query(&self, scope: Scope, session_id: &str, question: &str) -> Result<ChatReply>;

    /// Upload raw bytes under `file_name`, returning the upload id.
    async fn upload(&self, scope: Scope, file_name: &str, bytes: Vec<u8>) -> Result<String>;

    async fn ingest_uploads(
        &self,
        scope: Scope,
        collection_id: &str,
        upload_ids: &[String],
        gen_doc_summaries: bool,
        gen_doc_questions: bool,
    ) -> Result<()>;

    async fn delete_documents(&self, scope: Scope, document_ids: &[String]) -> Result<()>;
}
