// ABOUTME: Tests for the app state machine driving page components against an in-memory service

mod common;

use artemis::app::state::{AsyncAction, FocusedPane, Section};
use artemis::app::{App, NotificationType, Services};
use artemis::chat::ExportChoice;
use artemis::client::ArtemisApi;
use common::{reference, FakeService, COLLECTION_ID};
use std::sync::Arc;
use tempfile::TempDir;

fn app_with(fake: FakeService) -> App {
    let api: Arc<dyn ArtemisApi> = Arc::new(fake);
    App::new(Services::new(api, COLLECTION_ID, COLLECTION_ID))
}

fn messages(app: &App) -> Vec<String> {
    app.state
        .notifications
        .iter()
        .map(|n| n.message.clone())
        .collect()
}

#[tokio::test]
async fn test_init_loads_every_section() {
    let mut app = app_with(FakeService::new().with_documents(&["a.pdf", "b.pdf"]));

    app.init().await;

    assert!(matches!(app.state.history, Section::Idle));
    assert_eq!(app.state.recent_chat_list().len(), 0);
    assert_eq!(app.state.document_list().len(), 2);
    assert_eq!(
        app.state.documents.loaded().unwrap().capacity.label(),
        "2%"
    );
    assert_eq!(app.state.selected_document_index, Some(0));
}

#[tokio::test]
async fn test_new_chat_shows_notice_and_lists_session() {
    let mut app = app_with(FakeService::new());

    app.state.pending_async_action = Some(AsyncAction::StartNewChat);
    app.process_async_action().await.unwrap();

    assert_eq!(messages(&app), vec!["Started a new chat session.".to_string()]);
    assert_eq!(app.state.active_chat().unwrap().display_name, "New Conversation");
    assert_eq!(app.state.recent_chat_list().len(), 1);
    assert!(app.needs_ui_refresh());
}

#[tokio::test]
async fn test_submitting_question_renders_answer_and_references() {
    let mut app = app_with(
        FakeService::new()
            .with_documents(&["policy.pdf"])
            .with_chunks("policy.pdf", &["Leave is accrued monthly. More"])
            .with_next_references(vec![reference("policy.pdf", 0.82)]),
    );

    app.state.pending_async_action = Some(AsyncAction::SubmitQuestion(
        "What is the policy?".to_string(),
    ));
    app.process_async_action().await.unwrap();

    let answer = app.state.answer.as_ref().unwrap();
    assert_eq!(answer.reply.content, "Answer to: What is the policy?");
    let report = app.state.references.loaded().unwrap();
    assert_eq!(
        report.entries[0].to_string(),
        "Document: policy.pdf, Score: 0.82, Text: Leave is accrued monthly."
    );
    assert_eq!(app.state.history.loaded().unwrap().len(), 2);
}

#[tokio::test]
async fn test_delete_flow_warns_then_removes_document() {
    let mut app = app_with(FakeService::new().with_documents(&["a.pdf", "b.pdf"]));
    app.init().await;
    let target = app.state.document_list()[0].id.clone();

    app.state.pending_async_action = Some(AsyncAction::DeleteDocument(target.clone()));
    app.process_async_action().await.unwrap();
    assert!(app.state.is_delete_armed(&target));
    assert_eq!(
        app.state.notifications.last().unwrap().notification_type,
        NotificationType::Warning
    );
    assert_eq!(app.state.document_list().len(), 2);

    app.state.pending_async_action = Some(AsyncAction::DeleteDocument(target.clone()));
    app.process_async_action().await.unwrap();
    assert_eq!(
        app.state.notifications.last().unwrap().message,
        format!("Document {target} deleted successfully.")
    );
    assert_eq!(app.state.document_list().len(), 1);
    assert!(!app.state.is_delete_armed(&target));
}

#[tokio::test]
async fn test_export_without_session_warns() {
    let dir = TempDir::new().unwrap();
    let mut app = app_with(FakeService::new()).with_export_dir(dir.path().to_path_buf());

    app.state.pending_async_action = Some(AsyncAction::Export(ExportChoice::DialogueOnly));
    app.process_async_action().await.unwrap();

    assert_eq!(
        messages(&app),
        vec!["No active chat session available to download.".to_string()]
    );
    assert!(app.state.last_export_path.is_none());
}

#[tokio::test]
async fn test_export_writes_file_for_active_session() {
    let dir = TempDir::new().unwrap();
    let mut app = app_with(FakeService::new()).with_export_dir(dir.path().to_path_buf());
    app.state.pending_async_action = Some(AsyncAction::SubmitQuestion("hi".to_string()));
    app.process_async_action().await.unwrap();

    app.state.pending_async_action = Some(AsyncAction::Export(ExportChoice::DialogueOnly));
    app.process_async_action().await.unwrap();

    let path = app.state.last_export_path.clone().unwrap();
    assert_eq!(path, dir.path().join("conversation.csv"));
    let content = std::fs::read_to_string(path).unwrap();
    assert_eq!(content.lines().next(), Some("Dialogue"));
    assert!(content.contains("You: hi"));
}

#[tokio::test]
async fn test_upload_reports_each_file() {
    let dir = TempDir::new().unwrap();
    let pdf = dir.path().join("guide.pdf");
    let txt = dir.path().join("notes.txt");
    std::fs::write(&pdf, b"%PDF-1.4").unwrap();
    std::fs::write(&txt, b"plain").unwrap();
    let mut app = app_with(FakeService::new());

    app.state.pending_async_action = Some(AsyncAction::Upload(vec![pdf, txt]));
    app.process_async_action().await.unwrap();

    let notices = messages(&app);
    assert!(notices.contains(&"Upload successful.".to_string()));
    assert!(notices.contains(&"Document processed successfully.".to_string()));
    assert!(notices
        .iter()
        .any(|m| m.starts_with("Error processing notes.txt:")));
    assert_eq!(app.state.document_list().len(), 1);
    assert_eq!(app.state.focused_pane, FocusedPane::RecentChats);
}

#[tokio::test]
async fn test_selecting_recent_chat_loads_its_history() {
    let mut app = app_with(FakeService::new());
    app.state.pending_async_action = Some(AsyncAction::StartNewChat);
    app.process_async_action().await.unwrap();
    app.state.pending_async_action = Some(AsyncAction::SubmitQuestion("first".to_string()));
    app.process_async_action().await.unwrap();
    app.state.pending_async_action = Some(AsyncAction::StartNewChat);
    app.process_async_action().await.unwrap();
    assert_eq!(app.state.history.loaded().unwrap().len(), 0);

    // Newest first, so the older session is second
    app.state.pending_async_action = Some(AsyncAction::SelectRecentChat(1));
    app.process_async_action().await.unwrap();

    assert_eq!(app.state.history.loaded().unwrap().len(), 2);
    assert!(app
        .state
        .active_chat()
        .unwrap()
        .display_name
        .starts_with("Policies - "));
}
