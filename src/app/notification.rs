// ABOUTME: Notification system for displaying temporary messages to users
// Provides different types of notifications with automatic expiry

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationType {
    Success,
    Error,
    Info,
    Warning,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub notification_type: NotificationType,
    pub created_at: Instant,
    pub duration: Duration,
}

impl Notification {
    pub fn new(message: impl Into<String>, notification_type: NotificationType) -> Self {
        let duration = match notification_type {
            // Errors and warnings stay up long enough to be read
            NotificationType::Error | NotificationType::Warning => Duration::from_secs(10),
            NotificationType::Success | NotificationType::Info => Duration::from_secs(5),
        };
        Self {
            message: message.into(),
            notification_type,
            created_at: Instant::now(),
            duration,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, NotificationType::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NotificationType::Error)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, NotificationType::Info)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, NotificationType::Warning)
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > self.duration
    }
}
