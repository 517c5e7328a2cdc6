// ABOUTME: Document, collection, reference and search-result models plus the capacity heuristic

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Assumed maximum number of documents a collection holds.
pub const CAPACITY_MAX_DOCUMENTS: usize = 100;

/// Only this file type is accepted by the upload control.
pub const ACCEPTED_UPLOAD_EXTENSION: &str = "pdf";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Citation attached to a service turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    pub document_name: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchChunk {
    pub text: String,
    #[serde(default)]
    pub score: f64,
}

/// A file chosen for upload, held in memory until it is staged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Extension including the leading dot, or an empty string.
    pub fn suffix(&self) -> String {
        Path::new(&self.name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{ext}"))
            .unwrap_or_default()
    }

    pub fn has_accepted_type(&self) -> bool {
        Path::new(&self.name)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(ACCEPTED_UPLOAD_EXTENSION))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capacity {
    pub document_count: usize,
}

impl Capacity {
    pub fn new(document_count: usize) -> Self {
        Self { document_count }
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn percentage(self) -> f64 {
        (self.document_count as f64 / CAPACITY_MAX_DOCUMENTS as f64) * 100.0
    }

    pub fn label(self) -> String {
        format!("{:.0}%", self.percentage())
    }
}
