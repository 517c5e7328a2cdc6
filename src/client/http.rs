// ABOUTME: HTTP implementation of ArtemisApi over the service's REST endpoints using reqwest

use super::{ArtemisApi, Credentials, Scope};
use crate::config::ServiceSettings;
use crate::error::{ArtemisError, Result};
use crate::models::{
    ChatMessage, ChatReply, ChatSessionSummary, Collection, Document, Reference, SearchChunk,
};
use async_trait::async_trait;
use reqwest::{multipart, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct IdResponse {
    id: String,
}

/// Client for the hosted service. One connection pool, two scoped keys.
#[derive(Clone)]
pub struct HttpArtemisClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Credentials,
}

impl HttpArtemisClient {
    pub fn new(address: &str, credentials: Credentials, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: address.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    pub fn from_settings(settings: &ServiceSettings) -> Result<Self> {
        Self::new(
            &settings.address,
            settings.credentials.clone(),
            Duration::from_secs(settings.request_timeout_secs),
        )
    }

    fn request(&self, method: Method, scope: Scope, path: &str) -> RequestBuilder {
        let url = format!("{}/api/v1{}", self.base_url, path);
        debug!("{} {} ({:?} scope)", method, url, scope);
        self.http
            .request(method, url)
            .bearer_auth(self.credentials.key(scope).expose())
    }

    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        warn!("Service error {}: {}", status, body);
        Err(ArtemisError::api(status.as_u16(), body))
    }

    async fn send_json<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T> {
        let response = Self::check(builder.send().await?).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ArtemisError::Decode(e.to_string()))
    }

    async fn send_empty(builder: RequestBuilder) -> Result<()> {
        Self::check(builder.send().await?).await?;
        Ok(())
    }
}

#[async_trait]
impl ArtemisApi for HttpArtemisClient {
    async fn create_chat_session(&self, scope: Scope, collection_id: &str) -> Result<String> {
        let body = serde_json::json!({ "collection_id": collection_id });
        let created: IdResponse =
            Self::send_json(self.request(Method::POST, scope, "/chats").json(&body)).await?;
        Ok(created.id)
    }

    async fn list_chat_messages(
        &self,
        scope: Scope,
        session_id: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<ChatMessage>> {
        let path = format!("/chats/{session_id}/messages");
        Self::send_json(
            self.request(Method::GET, scope, &path)
                .query(&[("offset", offset), ("limit", limit)]),
        )
        .await
    }

    async fn list_recent_chat_sessions(
        &self,
        scope: Scope,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<ChatSessionSummary>> {
        Self::send_json(
            self.request(Method::GET, scope, "/chats")
                .query(&[("offset", offset), ("limit", limit)]),
        )
        .await
    }

    async fn list_message_references(
        &self,
        scope: Scope,
        message_id: &str,
    ) -> Result<Vec<Reference>> {
        let path = format!("/messages/{message_id}/references");
        Self::send_json(self.request(Method::GET, scope, &path)).await
    }

    async fn get_collection(&self, scope: Scope, collection_id: &str) -> Result<Collection> {
        let path = format!("/collections/{collection_id}");
        Self::send_json(self.request(Method::GET, scope, &path)).await
    }

    async fn list_documents(
        &self,
        scope: Scope,
        collection_id: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Document>> {
        let path = format!("/collections/{collection_id}/documents");
        Self::send_json(
            self.request(Method::GET, scope, &path)
                .query(&[("offset", offset), ("limit", limit)]),
        )
        .await
    }

    async fn search_chunks(
        &self,
        scope: Scope,
        collection_id: &str,
        query: &str,
        document_id: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<SearchChunk>> {
        let path = format!("/collections/{collection_id}/chunks/search");
        let body = serde_json::json!({
            "query": query,
            "topics": [document_id],
            "offset": offset,
            "limit": limit,
        });
        Self::send_json(self.request(Method::POST, scope, &path).json(&body)).await
    }

    async fn query(&self, scope: Scope, session_id: &str, question: &str) -> Result<ChatReply> {
        let path = format!("/chats/{session_id}/completions");
        let body = serde_json::json!({ "message": question });
        Self::send_json(self.request(Method::POST, scope, &path).json(&body)).await
    }

    async fn upload(&self, scope: Scope, file_name: &str, bytes: Vec<u8>) -> Result<String> {
        let part = multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = multipart::Form::new().part("file", part);
        let created: IdResponse =
            Self::send_json(self.request(Method::PUT, scope, "/uploads").multipart(form)).await?;
        Ok(created.id)
    }

    async fn ingest_uploads(
        &self,
        scope: Scope,
        collection_id: &str,
        upload_ids: &[String],
        gen_doc_summaries: bool,
        gen_doc_questions: bool,
    ) -> Result<()> {
        let path = format!("/collections/{collection_id}/ingest");
        let body = serde_json::json!({
            "upload_ids": upload_ids,
            "gen_doc_summaries": gen_doc_summaries,
            "gen_doc_questions": gen_doc_questions,
        });
        Self::send_empty(self.request(Method::POST, scope, &path).json(&body)).await
    }

    async fn delete_documents(&self, scope: Scope, document_ids: &[String]) -> Result<()> {
        for document_id in document_ids {
            let path = format!("/documents/{document_id}");
            Self::send_empty(self.request(Method::DELETE, scope, &path)).await?;
        }
        Ok(())
    }
}
