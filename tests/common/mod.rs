// ABOUTME: Shared test doubles - a mockall mock of the service API and an in-memory fake service
#![allow(dead_code)]

use artemis::client::{ArtemisApi, Scope};
use artemis::error::{ArtemisError, Result};
use artemis::models::{
    ChatMessage, ChatReply, ChatSessionSummary, Collection, Document, Reference, SearchChunk,
};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use mockall::mock;
use std::collections::HashMap;
use std::sync::Mutex;

pub const COLLECTION_ID: &str = "col-1";

mock! {
    pub Api {}

    #[async_trait]
    impl ArtemisApi for Api {
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
        async fn list_message_references(&self, scope: Scope, message_id: &str) -> Result<Vec<Reference>>;
        async fn get_collection(&self, scope: Scope, collection_id: &str) -> Result<Collection>;
        async fn list_documents(
            &self,
            scope: Scope,
            collection_id: &str,
            offset: usize,
            limit: usize,
        ) -> Result<Vec<Document>>;
        async fn search_chunks(
            &self,
            scope: Scope,
            collection_id: &str,
            query: &str,
            document_id: &str,
            offset: usize,
            limit: usize,
        ) -> Result<Vec<SearchChunk>>;
        async fn query(&self, scope: Scope, session_id: &str, question: &str) -> Result<ChatReply>;
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
}

pub fn document(id: &str, name: &str) -> Document {
    Document {
        id: id.to_string(),
        name: name.to_string(),
    }
}

pub fn collection() -> Collection {
    Collection {
        id: COLLECTION_ID.to_string(),
        name: "Policies".to_string(),
        description: "Company policies".to_string(),
    }
}

pub fn user_message(id: &str, content: &str) -> ChatMessage {
    ChatMessage {
        id: id.to_string(),
        content: content.to_string(),
        reply_to: None,
    }
}

pub fn service_message(id: &str, reply_to: &str, content: &str) -> ChatMessage {
    ChatMessage {
        id: id.to_string(),
        content: content.to_string(),
        reply_to: Some(reply_to.to_string()),
    }
}

pub fn reference(name: &str, score: f64) -> Reference {
    Reference {
        document_name: name.to_string(),
        score,
    }
}

pub fn chunk(text: &str) -> SearchChunk {
    SearchChunk {
        text: text.to_string(),
        score: 0.5,
    }
}

#[derive(Default)]
struct FakeState {
    documents: Vec<Document>,
    sessions: HashMap<String, Vec<ChatMessage>>,
    summaries: Vec<ChatSessionSummary>,
    references: HashMap<String, Vec<Reference>>,
    next_references: Vec<Reference>,
    /// Chunks per document id, addressed by search offset.
    chunks: HashMap<String, Vec<String>>,
    uploads: HashMap<String, String>,
    calls: Vec<(&'static str, Scope)>,
    fail_ingest: bool,
    next_id: usize,
}

impl FakeState {
    fn fresh_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{}", self.next_id)
    }
}

/// In-memory stand-in for the hosted service, one collection only.
#[derive(Default)]
pub struct FakeService {
    state: Mutex<FakeState>,
}

impl FakeService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_documents(self, names: &[&str]) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            for name in names {
                let id = state.fresh_id("doc");
                state.documents.push(document(&id, name));
            }
        }
        self
    }

    pub fn with_chunks(self, document_name: &str, chunks: &[&str]) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let id = state
                .documents
                .iter()
                .find(|d| d.name == document_name)
                .map(|d| d.id.clone())
                .expect("document must exist before adding chunks");
            state
                .chunks
                .insert(id, chunks.iter().map(ToString::to_string).collect());
        }
        self
    }

    /// References attached to the next reply produced by `query`.
    pub fn with_next_references(self, references: Vec<Reference>) -> Self {
        self.state.lock().unwrap().next_references = references;
        self
    }

    pub fn with_session(self, session_id: &str, messages: Vec<ChatMessage>) -> Self {
        self.state
            .lock()
            .unwrap()
            .sessions
            .insert(session_id.to_string(), messages);
        self
    }

    pub fn with_message_references(self, message_id: &str, references: Vec<Reference>) -> Self {
        self.state
            .lock()
            .unwrap()
            .references
            .insert(message_id.to_string(), references);
        self
    }

    pub fn failing_ingest(self) -> Self {
        self.state.lock().unwrap().fail_ingest = true;
        self
    }

    pub fn document_names(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .documents
            .iter()
            .map(|d| d.name.clone())
            .collect()
    }

    pub fn calls(&self) -> Vec<(&'static str, Scope)> {
        self.state.lock().unwrap().calls.clone()
    }

    fn record(&self, op: &'static str, scope: Scope) {
        self.state.lock().unwrap().calls.push((op, scope));
    }
}

#[async_trait]
impl ArtemisApi for FakeService {
    async fn create_chat_session(&self, scope: Scope, _collection_id: &str) -> Result<String> {
        self.record("create_chat_session", scope);
        let mut state = self.state.lock().unwrap();
        let id = state.fresh_id("chat");
        state.sessions.insert(id.clone(), Vec::new());
        state.summaries.insert(
            0,
            ChatSessionSummary {
                id: id.clone(),
                collection_name: "Policies".to_string(),
                updated_at: Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap(),
            },
        );
        Ok(id)
    }

    async fn list_chat_messages(
        &self,
        scope: Scope,
        session_id: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<ChatMessage>> {
        self.record("list_chat_messages", scope);
        let state = self.state.lock().unwrap();
        let messages = state
            .sessions
            .get(session_id)
            .ok_or_else(|| ArtemisError::api(404, format!("chat {session_id} not found")))?;
        Ok(messages.iter().skip(offset).take(limit).cloned().collect())
    }

    async fn list_recent_chat_sessions(
        &self,
        scope: Scope,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<ChatSessionSummary>> {
        self.record("list_recent_chat_sessions", scope);
        let state = self.state.lock().unwrap();
        Ok(state.summaries.iter().skip(offset).take(limit).cloned().collect())
    }

    async fn list_message_references(&self, scope: Scope, message_id: &str) -> Result<Vec<Reference>> {
        self.record("list_message_references", scope);
        let state = self.state.lock().unwrap();
        Ok(state.references.get(message_id).cloned().unwrap_or_default())
    }

    async fn get_collection(&self, scope: Scope, _collection_id: &str) -> Result<Collection> {
        self.record("get_collection", scope);
        Ok(collection())
    }

    async fn list_documents(
        &self,
        scope: Scope,
        _collection_id: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Document>> {
        self.record("list_documents", scope);
        let state = self.state.lock().unwrap();
        Ok(state.documents.iter().skip(offset).take(limit).cloned().collect())
    }

    async fn search_chunks(
        &self,
        scope: Scope,
        _collection_id: &str,
        _query: &str,
        document_id: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<SearchChunk>> {
        self.record("search_chunks", scope);
        let state = self.state.lock().unwrap();
        Ok(state
            .chunks
            .get(document_id)
            .map(|chunks| {
                chunks
                    .iter()
                    .skip(offset)
                    .take(limit)
                    .map(|text| chunk(text))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn query(&self, scope: Scope, session_id: &str, question: &str) -> Result<ChatReply> {
        self.record("query", scope);
        let mut state = self.state.lock().unwrap();
        let question_id = state.fresh_id("msg");
        let reply_id = state.fresh_id("msg");
        let reply = ChatReply {
            id: reply_id.clone(),
            content: format!("Answer to: {question}"),
        };
        let messages = state
            .sessions
            .get_mut(session_id)
            .ok_or_else(|| ArtemisError::api(404, format!("chat {session_id} not found")))?;
        messages.push(user_message(&question_id, question));
        messages.push(service_message(&reply_id, &question_id, &reply.content));
        let references = std::mem::take(&mut state.next_references);
        state.references.insert(reply_id, references);
        Ok(reply)
    }

    async fn upload(&self, scope: Scope, file_name: &str, _bytes: Vec<u8>) -> Result<String> {
        self.record("upload", scope);
        let mut state = self.state.lock().unwrap();
        let id = state.fresh_id("upload");
        state.uploads.insert(id.clone(), file_name.to_string());
        Ok(id)
    }

    async fn ingest_uploads(
        &self,
        scope: Scope,
        _collection_id: &str,
        upload_ids: &[String],
        _gen_doc_summaries: bool,
        _gen_doc_questions: bool,
    ) -> Result<()> {
        self.record("ingest_uploads", scope);
        let mut state = self.state.lock().unwrap();
        if state.fail_ingest {
            return Err(ArtemisError::api(500, "ingestion failed"));
        }
        for upload_id in upload_ids {
            let name = state
                .uploads
                .remove(upload_id)
                .ok_or_else(|| ArtemisError::api(404, format!("upload {upload_id} not found")))?;
            let id = state.fresh_id("doc");
            state.documents.push(document(&id, &name));
        }
        Ok(())
    }

    async fn delete_documents(&self, scope: Scope, document_ids: &[String]) -> Result<()> {
        self.record("delete_documents", scope);
        let mut state = self.state.lock().unwrap();
        state.documents.retain(|d| !document_ids.contains(&d.id));
        Ok(())
    }
}
