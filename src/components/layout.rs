// ABOUTME: Main layout component - title, chat column, sidebar, notifications and bottom menu bar

use ratatui::{
    prelude::*,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::{
    ChatViewComponent, ExportDialogComponent, HelpComponent, QuestionInputComponent,
    SidebarComponent, UploadDialogComponent,
};
use crate::app::{AppState, NotificationType};

/// Notifications shown at once; older ones wait for newer ones to expire.
const VISIBLE_NOTIFICATIONS: usize = 3;

pub struct LayoutComponent {
    chat_view: ChatViewComponent,
    question_input: QuestionInputComponent,
    sidebar: SidebarComponent,
    help: HelpComponent,
    export_dialog: ExportDialogComponent,
    upload_dialog: UploadDialogComponent,
}

impl LayoutComponent {
    pub fn new() -> Self {
        Self {
            chat_view: ChatViewComponent::new(),
            question_input: QuestionInputComponent::new(),
            sidebar: SidebarComponent::new(),
            help: HelpComponent::new(),
            export_dialog: ExportDialogComponent::new(),
            upload_dialog: UploadDialogComponent::new(),
        }
    }

    pub fn render(&mut self, frame: &mut Frame, state: &AppState) {
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(0),    // Page
                Constraint::Length(3), // Bottom menu bar
            ])
            .split(frame.size());

        Self::render_title(frame, main_chunks[0], state);

        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(65), // Chat column
                Constraint::Percentage(35), // Sidebar
            ])
            .split(main_chunks[1]);

        let visible = state.notifications.len().min(VISIBLE_NOTIFICATIONS);
        #[allow(clippy::cast_possible_truncation)]
        let notification_height = if visible == 0 { 0 } else { visible as u16 + 2 };
        let chat_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Question form
                Constraint::Min(0),    // History, answer, references
                Constraint::Length(notification_height), // Notices
            ])
            .split(content_chunks[0]);

        self.question_input.render(frame, chat_chunks[0], state);
        self.chat_view.render(frame, chat_chunks[1], state);
        Self::render_notifications(frame, chat_chunks[2], state);
        self.sidebar.render(frame, content_chunks[1], state);

        Self::render_menu_bar(frame, main_chunks[2]);

        if state.help_visible {
            self.help.render(frame, frame.size());
        }
        if state.export_dialog.is_some() {
            self.export_dialog.render(frame, frame.size(), state);
        }
        if state.upload_dialog.is_some() {
            self.upload_dialog.render(frame, frame.size(), state);
        }
    }

    fn render_title(frame: &mut Frame, area: Rect, state: &AppState) {
        let chat_name = state
            .active_chat()
            .map_or_else(|| "No active chat".to_string(), |chat| chat.display_name.clone());

        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                "Artemis",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(chat_name, Style::default().fg(Color::Gray)),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

        frame.render_widget(title, area);
    }

    fn render_notifications(frame: &mut Frame, area: Rect, state: &AppState) {
        if area.height == 0 {
            return;
        }

        let lines: Vec<Line> = state
            .notifications
            .iter()
            .rev()
            .take(VISIBLE_NOTIFICATIONS)
            .map(|n| {
                let color = match n.notification_type {
                    NotificationType::Success => Color::Green,
                    NotificationType::Error => Color::Red,
                    NotificationType::Info => Color::Cyan,
                    NotificationType::Warning => Color::Yellow,
                };
                Line::from(Span::styled(n.message.clone(), Style::default().fg(color)))
            })
            .collect();

        let panel = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Notices"))
            .wrap(Wrap { trim: true });
        frame.render_widget(panel, area);
    }

    fn render_menu_bar(frame: &mut Frame, area: Rect) {
        let menu_text =
            "[n]ew chat [i]ask [e]xport [u]pload [d]elete [r]efresh [Tab]focus [?]help [q]uit";

        let menu = Paragraph::new(menu_text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center);

        frame.render_widget(menu, area);
    }
}

impl Default for LayoutComponent {
    fn default() -> Self {
        Self::new()
    }
}
