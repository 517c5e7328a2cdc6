// ABOUTME: Help overlay component displaying keyboard shortcuts and commands

use ratatui::{
    prelude::*,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, List, ListItem},
};

use super::centered_rect;

pub struct HelpComponent;

impl HelpComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let popup_area = centered_rect(60, 80, area);

        frame.render_widget(Clear, popup_area);

        let heading = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
        let help_items = vec![
            ListItem::new("Navigation:").style(heading),
            ListItem::new("  Tab        Cycle focus (question, chats, documents)"),
            ListItem::new("  j/↓        Move down"),
            ListItem::new("  k/↑        Move up"),
            ListItem::new("  g          Go to top"),
            ListItem::new("  G          Go to bottom"),
            ListItem::new(""),
            ListItem::new("Chat:").style(heading),
            ListItem::new("  n          Start new chat"),
            ListItem::new("  i or /     Ask a question (Enter submits, Esc leaves)"),
            ListItem::new("  Enter      Open highlighted recent chat"),
            ListItem::new("  e          Download conversation as CSV"),
            ListItem::new(""),
            ListItem::new("Documents:").style(heading),
            ListItem::new("  d          Delete highlighted document (press twice)"),
            ListItem::new("  u          Upload and ingest PDF files"),
            ListItem::new("  r          Refresh chats and documents"),
            ListItem::new(""),
            ListItem::new("General:").style(heading),
            ListItem::new("  ?          Toggle this help"),
            ListItem::new("  q/Esc      Quit application"),
            ListItem::new("  Ctrl+C     Force quit"),
        ];

        let help_list = List::new(help_items).block(
            Block::default()
                .title("Help - Press ? or Esc to close")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

        frame.render_widget(help_list, popup_area);
    }
}

impl Default for HelpComponent {
    fn default() -> Self {
        Self::new()
    }
}
