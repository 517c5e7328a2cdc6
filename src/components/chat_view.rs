// ABOUTME: Chat pane rendering history, the latest answer and its resolved references

use ratatui::{
    prelude::*,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::state::Section;
use crate::app::AppState;
use crate::chat::references::{NO_REFERENCES, REFERENCES_HEADING};
use crate::chat::ReferenceEntry;
use crate::models::Author;

pub struct ChatViewComponent;

impl ChatViewComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let lines = Self::build_lines(state);

        let pane = Paragraph::new(lines)
            .block(
                Block::default()
                    .title("Conversation")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Gray)),
            )
            .wrap(Wrap { trim: false });

        frame.render_widget(pane, area);
    }

    pub fn build_lines(state: &AppState) -> Vec<Line<'static>> {
        let mut lines = Vec::new();

        match &state.history {
            Section::Idle => {
                if state.active_chat().is_none() {
                    lines.push(Line::styled(
                        "No active chat. Press 'n' to start one or pick a recent chat.",
                        Style::default().fg(Color::Gray),
                    ));
                }
            }
            Section::Loaded(history) => {
                for entry in history {
                    let color = match entry.author {
                        Author::You => Color::White,
                        Author::Artemis => Color::Green,
                    };
                    lines.push(Line::styled(entry.render(), Style::default().fg(color)));
                }
            }
            Section::Failed(message) => {
                lines.push(Line::styled(message.clone(), Style::default().fg(Color::Red)));
            }
        }

        // Once history has reloaded, the answer is already one of its lines
        let answer_in_history = state.answer.as_ref().is_some_and(|answer| {
            state
                .history
                .loaded()
                .is_some_and(|history| history.iter().any(|line| line.message_id == answer.reply.id))
        });

        if let Some(answer) = state.answer.as_ref().filter(|_| !answer_in_history) {
            lines.push(Line::raw(""));
            lines.push(Line::styled(
                format!("Q: {}", answer.question),
                Style::default().fg(Color::Cyan),
            ));
            lines.push(Line::raw(answer.reply.content.clone()));
        }

        match &state.references {
            Section::Idle => {}
            Section::Loaded(report) if report.is_empty() => {
                lines.push(Line::raw(""));
                lines.push(Line::raw(NO_REFERENCES));
            }
            Section::Loaded(report) => {
                lines.push(Line::raw(""));
                lines.push(Line::styled(
                    REFERENCES_HEADING,
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ));
                for entry in &report.entries {
                    let style = match entry {
                        ReferenceEntry::Snippet { .. } => Style::default(),
                        ReferenceEntry::NotFound { .. } | ReferenceEntry::NoText { .. } => {
                            Style::default().fg(Color::Gray)
                        }
                    };
                    lines.push(Line::styled(entry.to_string(), style));
                }
            }
            Section::Failed(message) => {
                lines.push(Line::styled(message.clone(), Style::default().fg(Color::Red)));
            }
        }

        lines
    }
}

impl Default for ChatViewComponent {
    fn default() -> Self {
        Self::new()
    }
}
