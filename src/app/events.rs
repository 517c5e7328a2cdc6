// ABOUTME: Event handling system for keyboard input and app actions

use crate::app::state::{AsyncAction, ExportDialogState, FocusedPane, UploadDialogState};
use crate::app::AppState;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Quit,
    ToggleHelp,
    FocusNext,
    FocusQuestion,
    LeaveQuestion,
    NextItem,
    PreviousItem,
    GoToTop,
    GoToBottom,
    SelectItem,
    NewChat,
    Refresh,
    DeleteDocument,
    // Question form
    QuestionInputChar(char),
    QuestionBackspace,
    SubmitQuestion,
    // Export dialog
    OpenExportDialog,
    ExportToggleChoice,
    ExportConfirm,
    ExportCancel,
    // Upload dialog
    OpenUploadDialog,
    UploadInputChar(char),
    UploadBackspace,
    UploadConfirm,
    UploadCancel,
}

pub struct EventHandler;

impl EventHandler {
    pub fn handle_key_event(key_event: KeyEvent, state: &mut AppState) -> Option<AppEvent> {
        if key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(KeyModifiers::CONTROL)
        {
            return Some(AppEvent::Quit);
        }

        // Dialogs take every key while open
        if state.export_dialog.is_some() {
            return match key_event.code {
                KeyCode::Left
                | KeyCode::Right
                | KeyCode::Up
                | KeyCode::Down
                | KeyCode::Tab
                | KeyCode::Char('j' | 'k') => Some(AppEvent::ExportToggleChoice),
                KeyCode::Enter => Some(AppEvent::ExportConfirm),
                KeyCode::Esc => Some(AppEvent::ExportCancel),
                _ => None,
            };
        }

        if state.upload_dialog.is_some() {
            return match key_event.code {
                KeyCode::Esc => Some(AppEvent::UploadCancel),
                KeyCode::Enter => Some(AppEvent::UploadConfirm),
                KeyCode::Backspace => Some(AppEvent::UploadBackspace),
                KeyCode::Char(ch) => Some(AppEvent::UploadInputChar(ch)),
                _ => None,
            };
        }

        if state.help_visible {
            return match key_event.code {
                KeyCode::Char('?') | KeyCode::Esc => Some(AppEvent::ToggleHelp),
                _ => None,
            };
        }

        if state.focused_pane == FocusedPane::Question {
            return match key_event.code {
                KeyCode::Esc => Some(AppEvent::LeaveQuestion),
                KeyCode::Tab => Some(AppEvent::FocusNext),
                KeyCode::Enter => Some(AppEvent::SubmitQuestion),
                KeyCode::Backspace => Some(AppEvent::QuestionBackspace),
                KeyCode::Char(ch) => Some(AppEvent::QuestionInputChar(ch)),
                _ => None,
            };
        }

        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(AppEvent::Quit),
            KeyCode::Char('?') => Some(AppEvent::ToggleHelp),
            KeyCode::Tab => Some(AppEvent::FocusNext),
            KeyCode::Char('i' | '/') => Some(AppEvent::FocusQuestion),
            KeyCode::Char('j') | KeyCode::Down => Some(AppEvent::NextItem),
            KeyCode::Char('k') | KeyCode::Up => Some(AppEvent::PreviousItem),
            KeyCode::Char('g') => Some(AppEvent::GoToTop),
            KeyCode::Char('G') => Some(AppEvent::GoToBottom),
            KeyCode::Enter => Some(AppEvent::SelectItem),
            KeyCode::Char('n') => Some(AppEvent::NewChat),
            KeyCode::Char('r') => Some(AppEvent::Refresh),
            KeyCode::Char('e') => Some(AppEvent::OpenExportDialog),
            KeyCode::Char('u') => Some(AppEvent::OpenUploadDialog),
            KeyCode::Char('d') if state.focused_pane == FocusedPane::Documents => {
                Some(AppEvent::DeleteDocument)
            }
            _ => None,
        }
    }

    pub fn process_event(event: AppEvent, state: &mut AppState) {
        match event {
            AppEvent::Quit => state.quit(),
            AppEvent::ToggleHelp => state.toggle_help(),
            AppEvent::FocusNext => state.cycle_focus(),
            AppEvent::FocusQuestion => state.focused_pane = FocusedPane::Question,
            AppEvent::LeaveQuestion => state.focused_pane = FocusedPane::RecentChats,
            AppEvent::NextItem => state.next_item(),
            AppEvent::PreviousItem => state.previous_item(),
            AppEvent::GoToTop => state.go_to_top(),
            AppEvent::GoToBottom => state.go_to_bottom(),
            AppEvent::SelectItem => {
                if state.focused_pane == FocusedPane::RecentChats {
                    if let Some(index) = state.selected_recent_index {
                        state.pending_async_action = Some(AsyncAction::SelectRecentChat(index));
                    }
                }
            }
            AppEvent::NewChat => {
                state.pending_async_action = Some(AsyncAction::StartNewChat);
            }
            AppEvent::Refresh => {
                state.pending_async_action = Some(AsyncAction::LoadPage);
            }
            AppEvent::DeleteDocument => {
                if let Some(document) = state.selected_document() {
                    state.pending_async_action =
                        Some(AsyncAction::DeleteDocument(document.id.clone()));
                }
            }
            AppEvent::QuestionInputChar(ch) => state.question_input.push(ch),
            AppEvent::QuestionBackspace => {
                state.question_input.pop();
            }
            AppEvent::SubmitQuestion => {
                if let Some(question) = state.take_question() {
                    state.pending_async_action = Some(AsyncAction::SubmitQuestion(question));
                }
            }
            AppEvent::OpenExportDialog => {
                state.export_dialog = Some(ExportDialogState::default());
            }
            AppEvent::ExportToggleChoice => {
                if let Some(ref mut dialog) = state.export_dialog {
                    dialog.choice = dialog.choice.toggled();
                }
            }
            AppEvent::ExportConfirm => {
                if let Some(dialog) = state.export_dialog.take() {
                    state.pending_async_action = Some(AsyncAction::Export(dialog.choice));
                }
            }
            AppEvent::ExportCancel => state.export_dialog = None,
            AppEvent::OpenUploadDialog => {
                state.upload_dialog = Some(UploadDialogState::default());
            }
            AppEvent::UploadInputChar(ch) => {
                if let Some(ref mut dialog) = state.upload_dialog {
                    dialog.input.push(ch);
                }
            }
            AppEvent::UploadBackspace => {
                if let Some(ref mut dialog) = state.upload_dialog {
                    dialog.input.pop();
                }
            }
            AppEvent::UploadConfirm => {
                if let Some(dialog) = state.upload_dialog.take() {
                    let paths = dialog.paths();
                    if !paths.is_empty() {
                        state.pending_async_action = Some(AsyncAction::Upload(paths));
                    }
                }
            }
            AppEvent::UploadCancel => state.upload_dialog = None,
        }
    }
}
