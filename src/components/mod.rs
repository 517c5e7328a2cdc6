// ABOUTME: UI components for the Artemis page - chat pane, sidebar, question form, dialogs and help

pub mod chat_view;
pub mod export_dialog;
pub mod help;
pub mod layout;
pub mod question_input;
pub mod sidebar;
pub mod upload_dialog;

pub use chat_view::ChatViewComponent;
pub use export_dialog::ExportDialogComponent;
pub use help::HelpComponent;
pub use layout::LayoutComponent;
pub use question_input::QuestionInputComponent;
pub use sidebar::SidebarComponent;
pub use upload_dialog::UploadDialogComponent;

use ratatui::prelude::*;

/// Rect of `percent_x` by `percent_y` centered in `r`.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
