// ABOUTME: Data models for chat sessions, messages, references, documents and uploads

pub mod chat;
pub mod document;

pub use chat::{ActiveChat, Author, ChatMessage, ChatReply, ChatSessionSummary};
pub use document::{Capacity, Collection, Document, Reference, SearchChunk, UploadedFile};
