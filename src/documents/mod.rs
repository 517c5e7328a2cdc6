// ABOUTME: Document management for the target collection - listing, capacity, deletion and uploads

pub mod manager;
pub mod upload;

pub use manager::{DeleteOutcome, DocumentListing, DocumentManager};
pub use upload::{UploadFailure, UploadOutcome, UploadStage};
