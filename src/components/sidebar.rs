// ABOUTME: Sidebar with recent chats, the collection capacity metric and the document list

use ratatui::{
    prelude::*,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::app::state::{FocusedPane, Section};
use crate::app::AppState;
use crate::chat::recent::NO_RECENT_CHATS;
use crate::documents::manager::{CAPACITY_LABEL, NO_DOCUMENTS};

pub struct SidebarComponent {
    recent_state: ListState,
    documents_state: ListState,
}

impl Default for SidebarComponent {
    fn default() -> Self {
        Self {
            recent_state: ListState::default(),
            documents_state: ListState::default(),
        }
    }
}

impl SidebarComponent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(40), // Chat history
                Constraint::Length(3),      // Capacity metric
                Constraint::Min(0),         // Document database
            ])
            .split(area);

        self.render_recent_chats(frame, chunks[0], state);
        Self::render_capacity(frame, chunks[1], state);
        self.render_documents(frame, chunks[2], state);
    }

    fn pane_block(title: &'static str, focused: bool) -> Block<'static> {
        let (border_color, title_color) = if focused {
            (Color::Cyan, Color::Yellow)
        } else {
            (Color::Gray, Color::Blue)
        };
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title_style(Style::default().fg(title_color))
    }

    fn render_recent_chats(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let focused = state.focused_pane == FocusedPane::RecentChats;
        let active_id = state.active_chat().map(|chat| chat.session_id.as_str());

        let items: Vec<ListItem> = match &state.recent_chats {
            Section::Loaded(chats) if chats.is_empty() => {
                vec![ListItem::new(NO_RECENT_CHATS).style(Style::default().fg(Color::Gray))]
            }
            Section::Loaded(chats) => chats
                .iter()
                .map(|chat| {
                    let marker = if Some(chat.id.as_str()) == active_id { "● " } else { "  " };
                    ListItem::new(format!("{marker}{}", chat.label()))
                })
                .collect(),
            Section::Failed(message) => {
                vec![ListItem::new(message.clone()).style(Style::default().fg(Color::Red))]
            }
            Section::Idle => vec![ListItem::new("Loading...").style(Style::default().fg(Color::Gray))],
        };

        self.recent_state.select(state.selected_recent_index);
        let list = List::new(items)
            .block(Self::pane_block("Chat History", focused))
            .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
            .highlight_symbol("> ");

        frame.render_stateful_widget(list, area, &mut self.recent_state);
    }

    fn render_capacity(frame: &mut Frame, area: Rect, state: &AppState) {
        let value = state
            .documents
            .loaded()
            .map_or_else(|| "-".to_string(), |listing| listing.capacity.label());

        let metric = Paragraph::new(Line::from(vec![
            Span::raw(format!("{CAPACITY_LABEL}: ")),
            Span::styled(value, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        ]))
        .block(Block::default().borders(Borders::ALL));

        frame.render_widget(metric, area);
    }

    fn render_documents(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let focused = state.focused_pane == FocusedPane::Documents;

        let items: Vec<ListItem> = match &state.documents {
            Section::Loaded(listing) if listing.documents.is_empty() => {
                vec![ListItem::new(NO_DOCUMENTS).style(Style::default().fg(Color::Gray))]
            }
            Section::Loaded(listing) => listing
                .documents
                .iter()
                .map(|doc| {
                    if state.is_delete_armed(&doc.id) {
                        ListItem::new(format!("{}  [d] confirm delete", doc.name))
                            .style(Style::default().fg(Color::Red))
                    } else {
                        ListItem::new(format!("{}  [d] delete", doc.name))
                    }
                })
                .collect(),
            Section::Failed(message) => {
                vec![ListItem::new(message.clone()).style(Style::default().fg(Color::Red))]
            }
            Section::Idle => vec![ListItem::new("Loading...").style(Style::default().fg(Color::Gray))],
        };

        self.documents_state.select(state.selected_document_index);
        let list = List::new(items)
            .block(Self::pane_block("Document Database", focused))
            .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
            .highlight_symbol("> ");

        frame.render_stateful_widget(list, area, &mut self.documents_state);
    }
}
