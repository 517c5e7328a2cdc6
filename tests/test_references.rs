// ABOUTME: Tests for reference resolution - per-document offsets, fallbacks and the sentence-bounded snippet

mod common;

use artemis::chat::{QuerySubmitter, ReferenceEntry, ReferenceResolver};
use artemis::client::{ArtemisApi, Scope};
use artemis::session::{SessionManager, UiState};
use common::{chunk, collection, document, reference, FakeService, MockApi, COLLECTION_ID};
use mockall::predicate::eq;
use pretty_assertions::assert_eq;
use std::sync::Arc;

#[tokio::test]
async fn test_repeated_document_advances_offset() {
    let mut api = MockApi::new();
    api.expect_list_message_references()
        .with(eq(Scope::Query), eq("msg-1"))
        .returning(|_, _| {
            Ok(vec![
                reference("handbook.pdf", 0.9),
                reference("handbook.pdf", 0.7),
                reference("handbook.pdf", 0.5),
            ])
        });
    api.expect_get_collection().returning(|_, _| Ok(collection()));
    api.expect_list_documents()
        .returning(|_, _, _, _| Ok(vec![document("doc-1", "handbook.pdf")]));
    api.expect_search_chunks()
        .withf(|scope, _, query, doc, offset, limit| {
            *scope == Scope::Query && query == "vacation" && doc == "doc-1" && *offset == 0 && *limit == 1
        })
        .times(1)
        .returning(|_, _, _, _, _, _| Ok(vec![chunk("First chunk.")]));
    api.expect_search_chunks()
        .withf(|_, _, _, _, offset, _| *offset == 1)
        .times(1)
        .returning(|_, _, _, _, _, _| Ok(vec![chunk("Second chunk.")]));
    api.expect_search_chunks()
        .withf(|_, _, _, _, offset, _| *offset == 2)
        .times(1)
        .returning(|_, _, _, _, _, _| Ok(vec![]));

    let resolver = ReferenceResolver::new(Arc::new(api), COLLECTION_ID);
    let report = resolver.display_references("msg-1", "vacation").await.unwrap();

    assert_eq!(
        report.entries,
        vec![
            ReferenceEntry::Snippet {
                document_name: "handbook.pdf".to_string(),
                score: 0.9,
                text: "First chunk.".to_string(),
            },
            ReferenceEntry::Snippet {
                document_name: "handbook.pdf".to_string(),
                score: 0.7,
                text: "Second chunk.".to_string(),
            },
            ReferenceEntry::NoText {
                document_name: "handbook.pdf".to_string(),
                offset: 2,
            },
        ]
    );
}

#[tokio::test]
async fn test_unknown_document_is_reported_without_search() {
    let mut api = MockApi::new();
    api.expect_list_message_references()
        .returning(|_, _| Ok(vec![reference("missing.pdf", 0.4)]));
    api.expect_get_collection().returning(|_, _| Ok(collection()));
    api.expect_list_documents()
        .returning(|_, _, _, _| Ok(vec![document("doc-1", "handbook.pdf")]));
    api.expect_search_chunks().never();

    let resolver = ReferenceResolver::new(Arc::new(api), COLLECTION_ID);
    let report = resolver.display_references("msg-1", "anything").await.unwrap();

    assert_eq!(report.entries.len(), 1);
    assert_eq!(
        report.entries[0].to_string(),
        "Document name 'missing.pdf' not found in collection."
    );
}

#[tokio::test]
async fn test_only_first_five_references_are_resolved() {
    let mut api = MockApi::new();
    api.expect_list_message_references().returning(|_, _| {
        Ok((0..8).map(|i| reference(&format!("doc{i}.pdf"), 0.1)).collect())
    });
    api.expect_get_collection().returning(|_, _| Ok(collection()));
    api.expect_list_documents().returning(|_, _, _, _| {
        Ok((0..8)
            .map(|i| document(&format!("id-{i}"), &format!("doc{i}.pdf")))
            .collect())
    });
    api.expect_search_chunks()
        .times(5)
        .returning(|_, _, _, _, _, _| Ok(vec![chunk("Text.")]));

    let resolver = ReferenceResolver::new(Arc::new(api), COLLECTION_ID);
    let report = resolver.display_references("msg-1", "q").await.unwrap();

    assert_eq!(report.entries.len(), 5);
}

#[tokio::test]
async fn test_no_references_yields_empty_report() {
    let mut api = MockApi::new();
    api.expect_list_message_references().returning(|_, _| Ok(vec![]));
    api.expect_get_collection().returning(|_, _| Ok(collection()));
    api.expect_list_documents().returning(|_, _, _, _| Ok(vec![]));

    let resolver = ReferenceResolver::new(Arc::new(api), COLLECTION_ID);
    let report = resolver.display_references("msg-1", "q").await.unwrap();

    assert!(report.is_empty());
    assert_eq!(report.collection.name, "Policies");
}

#[tokio::test]
async fn test_policy_question_renders_scored_reference() {
    let long_tail = "x".repeat(1200);
    let snippet = format!("Employees accrue leave monthly. Requests need approval. {long_tail}");
    let fake = FakeService::new()
        .with_documents(&["policy.pdf"])
        .with_chunks("policy.pdf", &[snippet.as_str()])
        .with_next_references(vec![reference("policy.pdf", 0.82)]);
    let api: Arc<dyn ArtemisApi> = Arc::new(fake);

    let sessions = SessionManager::new(api.clone(), COLLECTION_ID);
    let resolver = ReferenceResolver::new(api.clone(), COLLECTION_ID);
    let submitter = QuerySubmitter::new(api, sessions, resolver);

    let mut state = UiState::default();
    let outcome = submitter
        .submit_question(&mut state, "What is the policy?")
        .await
        .unwrap()
        .expect("question is not blank");

    assert!(outcome.started_new_chat);
    assert_eq!(outcome.reply.content, "Answer to: What is the policy?");

    let report = outcome.references.unwrap();
    assert_eq!(report.entries.len(), 1);
    assert_eq!(
        report.entries[0].to_string(),
        "Document: policy.pdf, Score: 0.82, Text: Employees accrue leave monthly. Requests need approval."
    );
}

#[tokio::test]
async fn test_blank_question_is_ignored() {
    let mut api = MockApi::new();
    api.expect_create_chat_session().never();
    api.expect_query().never();
    let api: Arc<dyn ArtemisApi> = Arc::new(api);

    let submitter = QuerySubmitter::new(
        api.clone(),
        SessionManager::new(api.clone(), COLLECTION_ID),
        ReferenceResolver::new(api, COLLECTION_ID),
    );
    let mut state = UiState::default();

    assert!(submitter.submit_question(&mut state, "   ").await.unwrap().is_none());
    assert!(state.active_chat.is_none());
}

#[tokio::test]
async fn test_reference_failure_keeps_the_answer() {
    let mut api = MockApi::new();
    api.expect_create_chat_session()
        .returning(|_, _| Ok("chat-9".to_string()));
    api.expect_query()
        .with(eq(Scope::Query), eq("chat-9"), eq("hello"))
        .returning(|_, _, _| {
            Ok(artemis::models::ChatReply {
                id: "msg-2".to_string(),
                content: "Hi.".to_string(),
            })
        });
    api.expect_list_message_references()
        .returning(|_, _| Err(artemis::error::ArtemisError::api(503, "unavailable")));
    let api: Arc<dyn ArtemisApi> = Arc::new(api);

    let submitter = QuerySubmitter::new(
        api.clone(),
        SessionManager::new(api.clone(), COLLECTION_ID),
        ReferenceResolver::new(api, COLLECTION_ID),
    );
    let mut state = UiState::default();
    let outcome = submitter
        .submit_question(&mut state, "hello")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(outcome.reply.content, "Hi.");
    assert!(outcome.references.is_err());
    assert_eq!(state.active_session_id(), Some("chat-9"));
}
