// ABOUTME: Upload dialog where the user lists the PDF files to upload and ingest

use ratatui::{
    prelude::*,
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::centered_rect;
use crate::app::AppState;
use crate::models::document::ACCEPTED_UPLOAD_EXTENSION;

pub struct UploadDialogComponent;

impl UploadDialogComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let Some(dialog) = &state.upload_dialog else {
            return;
        };

        let popup_area = centered_rect(70, 30, area);
        frame.render_widget(Clear, popup_area);

        let lines = vec![
            Line::styled(
                format!("Choose files to upload (.{ACCEPTED_UPLOAD_EXTENSION} only), separated by commas:"),
                Style::default().fg(Color::Yellow),
            ),
            Line::raw(""),
            Line::raw(format!("{}_", dialog.input)),
            Line::raw(""),
            Line::styled(
                "Enter to upload and ingest, Esc to cancel",
                Style::default().fg(Color::Gray),
            ),
        ];

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .title("Upload Documents")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .wrap(Wrap { trim: false });

        frame.render_widget(paragraph, popup_area);
    }
}

impl Default for UploadDialogComponent {
    fn default() -> Self {
        Self::new()
    }
}
