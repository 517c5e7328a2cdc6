// ABOUTME: Application state for the Artemis page and the async actions that talk to the service
// Every remote failure is caught here and turned into a section error or a notification

use crate::app::{Notification, Services};
use crate::chat::export::NO_ACTIVE_SESSION;
use crate::chat::{ExportChoice, ExportOutcome, HistoryLine, ReferenceReport};
use crate::documents::{DeleteOutcome, DocumentListing};
use crate::documents::manager::CONFIRM_DELETE_WARNING;
use crate::models::{ActiveChat, Capacity, ChatReply, ChatSessionSummary, Document, UploadedFile};
use crate::session::{SessionStore, UiSessionId, UiState};
use chrono::{TimeZone, Utc};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Question,
    RecentChats,
    Documents,
}

impl FocusedPane {
    pub fn next(self) -> Self {
        match self {
            Self::Question => Self::RecentChats,
            Self::RecentChats => Self::Documents,
            Self::Documents => Self::Question,
        }
    }
}

/// Result of one component's last load, kept separate per component so a
/// failure in one never blanks the rest of the page.
#[derive(Debug, Clone, PartialEq)]
pub enum Section<T> {
    Idle,
    Loaded(T),
    Failed(String),
}

impl<T> Default for Section<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T> Section<T> {
    pub fn loaded(&self) -> Option<&T> {
        match self {
            Self::Loaded(value) => Some(value),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnswerView {
    pub question: String,
    pub reply: ChatReply,
}

#[derive(Debug, Clone, Default)]
pub struct ExportDialogState {
    pub choice: ExportChoice,
}

#[derive(Debug, Clone, Default)]
pub struct UploadDialogState {
    pub input: String,
}

impl UploadDialogState {
    /// Paths typed into the dialog, separated by commas or newlines.
    /// Spaces inside a path are kept.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.input
            .split([',', '\n'])
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AsyncAction {
    LoadPage,
    StartNewChat,
    LoadHistory,
    LoadRecentChats,
    LoadDocuments,
    SelectRecentChat(usize),
    SubmitQuestion(String),
    DeleteDocument(String),
    Export(ExportChoice),
    Upload(Vec<PathBuf>),
}

#[derive(Debug)]
pub struct AppState {
    pub store: SessionStore,
    pub ui_session: UiSessionId,
    pub focused_pane: FocusedPane,
    pub question_input: String,
    pub history: Section<Vec<HistoryLine>>,
    pub answer: Option<AnswerView>,
    pub references: Section<ReferenceReport>,
    pub recent_chats: Section<Vec<ChatSessionSummary>>,
    pub selected_recent_index: Option<usize>,
    pub documents: Section<DocumentListing>,
    pub selected_document_index: Option<usize>,
    pub export_dialog: Option<ExportDialogState>,
    pub upload_dialog: Option<UploadDialogState>,
    pub export_dir: PathBuf,
    pub last_export_path: Option<PathBuf>,
    pub notifications: Vec<Notification>,
    pub help_visible: bool,
    pub should_quit: bool,
    pub pending_async_action: Option<AsyncAction>,
    pub ui_needs_refresh: bool,
}

impl Default for AppState {
    fn default() -> Self {
        let mut store = SessionStore::new();
        let ui_session = store.open();
        Self {
            store,
            ui_session,
            focused_pane: FocusedPane::RecentChats,
            question_input: String::new(),
            history: Section::Idle,
            answer: None,
            references: Section::Idle,
            recent_chats: Section::Idle,
            selected_recent_index: None,
            documents: Section::Idle,
            selected_document_index: None,
            export_dialog: None,
            upload_dialog: None,
            export_dir: PathBuf::from("."),
            last_export_path: None,
            notifications: Vec::new(),
            help_visible: false,
            should_quit: false,
            pending_async_action: None,
            ui_needs_refresh: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ui_state(&self) -> Option<&UiState> {
        self.store.get(self.ui_session)
    }

    pub fn ui_state_mut(&mut self) -> &mut UiState {
        self.store.state_mut(self.ui_session)
    }

    pub fn active_chat(&self) -> Option<&ActiveChat> {
        self.ui_state().and_then(|state| state.active_chat.as_ref())
    }

    pub fn is_delete_armed(&self, document_id: &str) -> bool {
        self.ui_state()
            .is_some_and(|state| state.is_delete_armed(document_id))
    }

    pub fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
        self.ui_needs_refresh = true;
    }

    pub fn prune_notifications(&mut self) {
        let before = self.notifications.len();
        self.notifications.retain(|n| !n.is_expired());
        if self.notifications.len() != before {
            self.ui_needs_refresh = true;
        }
    }

    pub fn recent_chat_list(&self) -> &[ChatSessionSummary] {
        match self.recent_chats.loaded() {
            Some(chats) => chats,
            None => &[],
        }
    }

    pub fn document_list(&self) -> &[Document] {
        match self.documents.loaded() {
            Some(listing) => &listing.documents,
            None => &[],
        }
    }

    pub fn selected_document(&self) -> Option<&Document> {
        self.document_list().get(self.selected_document_index?)
    }

    pub fn selected_recent_chat(&self) -> Option<&ChatSessionSummary> {
        self.recent_chat_list().get(self.selected_recent_index?)
    }

    pub fn toggle_help(&mut self) {
        self.help_visible = !self.help_visible;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn cycle_focus(&mut self) {
        self.focused_pane = self.focused_pane.next();
    }

    fn focused_len(&self) -> usize {
        match self.focused_pane {
            FocusedPane::RecentChats => self.recent_chat_list().len(),
            FocusedPane::Documents => self.document_list().len(),
            FocusedPane::Question => 0,
        }
    }

    fn focused_index_mut(&mut self) -> Option<&mut Option<usize>> {
        match self.focused_pane {
            FocusedPane::RecentChats => Some(&mut self.selected_recent_index),
            FocusedPane::Documents => Some(&mut self.selected_document_index),
            FocusedPane::Question => None,
        }
    }

    pub fn next_item(&mut self) {
        let len = self.focused_len();
        if len == 0 {
            return;
        }
        if let Some(index) = self.focused_index_mut() {
            *index = Some(index.map_or(0, |current| (current + 1) % len));
        }
    }

    pub fn previous_item(&mut self) {
        let len = self.focused_len();
        if len == 0 {
            return;
        }
        if let Some(index) = self.focused_index_mut() {
            *index = Some(match *index {
                Some(0) | None => len - 1,
                Some(current) => current - 1,
            });
        }
    }

    pub fn go_to_top(&mut self) {
        if self.focused_len() > 0 {
            if let Some(index) = self.focused_index_mut() {
                *index = Some(0);
            }
        }
    }

    pub fn go_to_bottom(&mut self) {
        let len = self.focused_len();
        if len > 0 {
            if let Some(index) = self.focused_index_mut() {
                *index = Some(len - 1);
            }
        }
    }

    /// Take the typed question, leaving the input empty. Blank input yields None.
    pub fn take_question(&mut self) -> Option<String> {
        let question = std::mem::take(&mut self.question_input);
        let trimmed = question.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    fn set_recent_chats(&mut self, chats: Vec<ChatSessionSummary>) {
        self.selected_recent_index = match self.selected_recent_index {
            _ if chats.is_empty() => None,
            Some(idx) if idx < chats.len() => Some(idx),
            _ => Some(0),
        };
        self.recent_chats = Section::Loaded(chats);
    }

    fn set_documents(&mut self, listing: DocumentListing) {
        let len = listing.documents.len();
        self.selected_document_index = match self.selected_document_index {
            _ if len == 0 => None,
            Some(idx) if idx < len => Some(idx),
            Some(_) => Some(len - 1),
            None => Some(0),
        };
        self.documents = Section::Loaded(listing);
    }

    /// Populate every section with canned data, for rendering without a service.
    pub fn load_mock_data(&mut self) {
        let chat = ActiveChat::new("chat-1", "New Conversation");
        self.ui_state_mut().active_chat = Some(chat);

        self.history = Section::Loaded(vec![
            HistoryLine {
                message_id: "msg-1".to_string(),
                author: crate::models::Author::You,
                content: "What is the policy?".to_string(),
            },
            HistoryLine {
                message_id: "msg-2".to_string(),
                author: crate::models::Author::Artemis,
                content: "Staff must file expenses within 30 days.".to_string(),
            },
        ]);

        let updated_at = Utc
            .with_ymd_and_hms(2024, 3, 5, 14, 7, 9)
            .single()
            .unwrap_or_else(Utc::now);
        self.set_recent_chats(vec![
            ChatSessionSummary {
                id: "chat-1".to_string(),
                collection_name: "Policies".to_string(),
                updated_at,
            },
            ChatSessionSummary {
                id: "chat-2".to_string(),
                collection_name: "Handbooks".to_string(),
                updated_at,
            },
        ]);

        let documents = vec![
            Document {
                id: "doc-1".to_string(),
                name: "expenses.pdf".to_string(),
            },
            Document {
                id: "doc-2".to_string(),
                name: "travel.pdf".to_string(),
            },
            Document {
                id: "doc-3".to_string(),
                name: "security.pdf".to_string(),
            },
        ];
        self.set_documents(DocumentListing {
            capacity: Capacity::new(documents.len()),
            documents,
        });
    }
}

pub struct App {
    pub state: AppState,
    services: Services,
}

impl App {
    pub fn new(services: Services) -> Self {
        Self {
            state: AppState::new(),
            services,
        }
    }

    #[must_use]
    pub fn with_export_dir(mut self, dir: PathBuf) -> Self {
        self.state.export_dir = dir;
        self
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    pub async fn init(&mut self) {
        self.state.pending_async_action = Some(AsyncAction::LoadPage);
        if let Err(e) = self.process_async_action().await {
            warn!("Initial page load failed: {}", e);
        }
    }

    pub async fn tick(&mut self) -> anyhow::Result<()> {
        self.state.prune_notifications();
        if let Err(e) = self.process_async_action().await {
            warn!("Error processing async action: {}", e);
            self.state.pending_async_action = None;
        }
        Ok(())
    }

    /// Whether the frame must be redrawn now, clearing the flag.
    pub fn needs_ui_refresh(&mut self) -> bool {
        std::mem::take(&mut self.state.ui_needs_refresh)
    }

    pub async fn process_async_action(&mut self) -> anyhow::Result<()> {
        let Some(action) = self.state.pending_async_action.take() else {
            return Ok(());
        };

        match action {
            AsyncAction::LoadPage => {
                self.load_recent_chats().await;
                self.load_history().await;
                self.load_documents().await;
            }
            AsyncAction::StartNewChat => self.start_new_chat().await,
            AsyncAction::LoadHistory => self.load_history().await,
            AsyncAction::LoadRecentChats => self.load_recent_chats().await,
            AsyncAction::LoadDocuments => self.load_documents().await,
            AsyncAction::SelectRecentChat(index) => self.select_recent_chat(index).await,
            AsyncAction::SubmitQuestion(question) => self.submit_question(&question).await,
            AsyncAction::DeleteDocument(document_id) => self.delete_document(&document_id).await,
            AsyncAction::Export(choice) => self.export_conversation(choice).await,
            AsyncAction::Upload(paths) => self.upload_files(paths).await,
        }

        self.state.ui_needs_refresh = true;
        Ok(())
    }

    async fn start_new_chat(&mut self) {
        let state = self.state.store.state_mut(self.state.ui_session);
        match self.services.sessions.start_new_chat(state).await {
            Ok(_) => {
                self.state.answer = None;
                self.state.references = Section::Idle;
                self.state.notify(Notification::info("Started a new chat session."));
                self.load_history().await;
                self.load_recent_chats().await;
            }
            Err(e) => {
                self.state.notify(Notification::error(format!(
                    "Failed to start a new chat session: {e}"
                )));
            }
        }
    }

    async fn load_history(&mut self) {
        let Some(session_id) = self.state.active_chat().map(|c| c.session_id.clone()) else {
            self.state.history = Section::Idle;
            return;
        };

        self.state.history = match self
            .services
            .history
            .display_chat_history(Some(&session_id))
            .await
        {
            Ok(lines) => Section::Loaded(lines),
            Err(e) => Section::Failed(format!(
                "Failed to load chat history for session {session_id}: {e}"
            )),
        };
    }

    async fn load_recent_chats(&mut self) {
        match self.services.recent.load_recent_chats().await {
            Ok(chats) => self.state.set_recent_chats(chats),
            Err(e) => {
                self.state.recent_chats = Section::Failed(format!("Failed to load recent chats: {e}"));
                self.state.selected_recent_index = None;
            }
        }
    }

    async fn load_documents(&mut self) {
        match self.services.documents.list_documents().await {
            Ok(listing) => self.state.set_documents(listing),
            Err(e) => {
                self.state.documents = Section::Failed(format!("Error retrieving documents: {e}"));
                self.state.selected_document_index = None;
            }
        }
    }

    async fn select_recent_chat(&mut self, index: usize) {
        let Some(summary) = self.state.recent_chat_list().get(index).cloned() else {
            return;
        };
        let state = self.state.store.state_mut(self.state.ui_session);
        if self.services.sessions.select_chat(state, &summary) {
            self.state.answer = None;
            self.state.references = Section::Idle;
            self.load_history().await;
        }
    }

    async fn submit_question(&mut self, question: &str) {
        let state = self.state.store.state_mut(self.state.ui_session);
        match self.services.query.submit_question(state, question).await {
            Ok(None) => {}
            Ok(Some(outcome)) => {
                if outcome.started_new_chat {
                    self.state.notify(Notification::info("Started a new chat session."));
                }
                self.state.references = match outcome.references {
                    Ok(report) => Section::Loaded(report),
                    Err(e) => Section::Failed(format!("Failed to load references: {e}")),
                };
                self.state.answer = Some(AnswerView {
                    question: outcome.question,
                    reply: outcome.reply,
                });
                self.load_history().await;
            }
            Err(e) => {
                self.state.answer = None;
                self.state.references = Section::Idle;
                self.state.notify(Notification::error(format!(
                    "Failed to submit question: {e}"
                )));
            }
        }
    }

    async fn delete_document(&mut self, document_id: &str) {
        let state = self.state.store.state_mut(self.state.ui_session);
        match self.services.documents.delete_document(state, document_id).await {
            DeleteOutcome::ConfirmationRequired => {
                self.state.notify(Notification::warning(CONFIRM_DELETE_WARNING));
                return;
            }
            DeleteOutcome::Deleted => {
                self.state.notify(Notification::success(format!(
                    "Document {document_id} deleted successfully."
                )));
            }
            DeleteOutcome::Failed(e) => {
                self.state.notify(Notification::error(format!(
                    "Failed to delete document: {e}"
                )));
            }
        }
        self.load_documents().await;
    }

    async fn export_conversation(&mut self, choice: ExportChoice) {
        let active = self.state.active_chat().cloned();
        match self
            .services
            .exporter
            .download_conversation(active.as_ref(), choice)
            .await
        {
            Ok(ExportOutcome::NoActiveSession) => {
                self.state.notify(Notification::warning(NO_ACTIVE_SESSION));
            }
            Ok(ExportOutcome::Ready(artifact)) => match artifact.write_to(&self.state.export_dir) {
                Ok(path) => {
                    self.state.notify(Notification::success(format!(
                        "Saved {} to {}",
                        artifact.file_name,
                        path.display()
                    )));
                    self.state.last_export_path = Some(path);
                }
                Err(e) => self.state.notify(Notification::error(format!(
                    "Failed to download conversation: {e}"
                ))),
            },
            Err(e) => self.state.notify(Notification::error(format!(
                "Failed to download conversation: {e}"
            ))),
        }
    }

    async fn upload_files(&mut self, paths: Vec<PathBuf>) {
        let mut files = Vec::with_capacity(paths.len());
        for path in paths {
            let name = path
                .file_name()
                .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
            match tokio::fs::read(&path).await {
                Ok(bytes) => files.push(UploadedFile::new(name, bytes)),
                Err(e) => self
                    .state
                    .notify(Notification::error(format!("Error processing {name}: {e}"))),
            }
        }

        for outcome in self.services.documents.upload_files(&files).await {
            if outcome.uploaded() {
                self.state.notify(Notification::success("Upload successful."));
            }
            match &outcome.result {
                Ok(upload_id) => {
                    info!("{} ingested as upload {}", outcome.file_name, upload_id);
                    self.state
                        .notify(Notification::success("Document processed successfully."));
                }
                Err(failure) => self.state.notify(Notification::error(format!(
                    "Error processing {}: {}",
                    outcome.file_name, failure.error
                ))),
            }
        }

        self.load_documents().await;
    }
}
