// ABOUTME: Error types shared by the remote client, the components and the exporter

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArtemisError {
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Service returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected response body: {0}")]
    Decode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unsupported file type for {0}: only .{1} files are accepted")]
    UnsupportedFileType(String, &'static str),
}

impl ArtemisError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }
}

pub type Result<T, E = ArtemisError> = std::result::Result<T, E>;
