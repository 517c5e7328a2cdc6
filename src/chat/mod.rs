// ABOUTME: Chat components - history, recent chats, questions, references and conversation export

pub mod export;
pub mod history;
pub mod query;
pub mod recent;
pub mod references;

pub use export::{ConversationExporter, ExportArtifact, ExportChoice, ExportOutcome};
pub use history::{HistoryLine, HistoryViewer};
pub use query::{QueryOutcome, QuerySubmitter};
pub use recent::RecentChats;
pub use references::{
    format_score, truncate_at_sentence, OffsetTracker, ReferenceEntry, ReferenceReport,
    ReferenceResolver,
};
