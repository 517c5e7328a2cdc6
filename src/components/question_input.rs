// ABOUTME: Single-field question form

use ratatui::{
    prelude::*,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::state::FocusedPane;
use crate::app::AppState;

pub struct QuestionInputComponent;

impl QuestionInputComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let focused = state.focused_pane == FocusedPane::Question;
        let border_color = if focused { Color::Cyan } else { Color::Gray };

        let text = if focused {
            format!("{}_", state.question_input)
        } else if state.question_input.is_empty() {
            "Press 'i' to ask a question".to_string()
        } else {
            state.question_input.clone()
        };

        let input = Paragraph::new(text)
            .style(Style::default().fg(if focused { Color::White } else { Color::Gray }))
            .block(
                Block::default()
                    .title("Ask your question here:")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border_color)),
            );

        frame.render_widget(input, area);

        if focused {
            #[allow(clippy::cast_possible_truncation)]
            let cursor_x = area.x + 1 + state.question_input.chars().count() as u16;
            frame.set_cursor(cursor_x.min(area.right().saturating_sub(2)), area.y + 1);
        }
    }
}

impl Default for QuestionInputComponent {
    fn default() -> Self {
        Self::new()
    }
}
