// ABOUTME: Per-UI-session state and the chat session lifecycle (start, ensure, switch)

pub mod manager;
pub mod store;

pub use manager::SessionManager;
pub use store::{SessionStore, UiSessionId, UiState};
