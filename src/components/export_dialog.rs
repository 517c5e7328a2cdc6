// ABOUTME: Export dialog asking whether references go into the downloaded conversation

use ratatui::{
    prelude::*,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, List, ListItem},
};

use super::centered_rect;
use crate::app::AppState;
use crate::chat::ExportChoice;

pub struct ExportDialogComponent;

impl ExportDialogComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let Some(dialog) = &state.export_dialog else {
            return;
        };

        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let mut items = vec![
            ListItem::new("Include references in the download?")
                .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            ListItem::new(""),
        ];
        for choice in [ExportChoice::WithReferences, ExportChoice::DialogueOnly] {
            let selected = choice == dialog.choice;
            let marker = if selected { "(•)" } else { "( )" };
            let style = if selected {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            items.push(ListItem::new(format!("{marker} {}", choice.label())).style(style));
        }
        items.push(ListItem::new(""));
        items.push(
            ListItem::new(format!(
                "Saves {} to {}",
                dialog.choice.file_name(),
                state.export_dir.display()
            ))
            .style(Style::default().fg(Color::Gray)),
        );

        let list = List::new(items).block(
            Block::default()
                .title("Download Conversation - Enter to prepare, Esc to cancel")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

        frame.render_widget(list, popup_area);
    }
}

impl Default for ExportDialogComponent {
    fn default() -> Self {
        Self::new()
    }
}
