// ABOUTME: Main application structure and state management for the TUI

pub mod events;
pub mod notification;
pub mod services;
pub mod state;

pub use events::{AppEvent, EventHandler};
pub use notification::{Notification, NotificationType};
pub use services::Services;
pub use state::{App, AppState};
