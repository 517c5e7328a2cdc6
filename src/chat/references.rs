// ABOUTME: Reference resolver - maps cited document names to ids and fetches one snippet per citation
// A per-document offset keeps repeated citations of the same document from showing the same chunk

use crate::client::{ArtemisApi, Scope};
use crate::error::Result;
use crate::models::{Collection, SearchChunk};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Only the first references of a message are resolved.
pub const MAX_REFERENCES: usize = 5;
/// Snippets are cut to a sentence boundary inside this many characters.
pub const SNIPPET_WINDOW: usize = 1000;
pub const DOCUMENT_INDEX_LIMIT: usize = 100;
pub const REFERENCES_HEADING: &str = "References (up to 5):";
pub const NO_REFERENCES: &str = "No references found for this response.";

/// Cut `text` after the last period within its first [`SNIPPET_WINDOW`] characters,
/// or to exactly that many characters when the window has no period.
pub fn truncate_at_sentence(text: &str) -> &str {
    let window_end = text
        .char_indices()
        .nth(SNIPPET_WINDOW)
        .map_or(text.len(), |(idx, _)| idx);
    let window = &text[..window_end];

    match window.rfind('.') {
        Some(pos) => &window[..=pos],
        None => window,
    }
}

/// Score as the service's own clients print it: whole numbers keep one decimal.
pub fn format_score(score: f64) -> String {
    if score.is_finite() && score.fract() == 0.0 {
        format!("{score:.1}")
    } else {
        score.to_string()
    }
}

/// Next search offset per document id, scoped to one resolution pass.
#[derive(Debug, Default, Clone)]
pub struct OffsetTracker {
    next: HashMap<String, usize>,
}

impl OffsetTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self, document_id: &str) -> usize {
        self.next.get(document_id).copied().unwrap_or(0)
    }

    pub fn advance(&mut self, document_id: &str) {
        *self.next.entry(document_id.to_string()).or_insert(0) += 1;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReferenceEntry {
    Snippet {
        document_name: String,
        score: f64,
        text: String,
    },
    NotFound {
        document_name: String,
    },
    NoText {
        document_name: String,
        offset: usize,
    },
}

impl fmt::Display for ReferenceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Snippet {
                document_name,
                score,
                text,
            } => write!(
                f,
                "Document: {document_name}, Score: {}, Text: {text}",
                format_score(*score)
            ),
            Self::NotFound { document_name } => {
                write!(f, "Document name '{document_name}' not found in collection.")
            }
            Self::NoText {
                document_name,
                offset,
            } => write!(
                f,
                "No additional text found for '{document_name}' at offset {offset}."
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceReport {
    pub collection: Collection,
    pub entries: Vec<ReferenceEntry>,
}

impl ReferenceReport {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Clone)]
pub struct ReferenceResolver {
    api: Arc<dyn ArtemisApi>,
    collection_id: String,
}

impl ReferenceResolver {
    pub fn new(api: Arc<dyn ArtemisApi>, collection_id: impl Into<String>) -> Self {
        Self {
            api,
            collection_id: collection_id.into(),
        }
    }

    pub fn collection_id(&self) -> &str {
        &self.collection_id
    }

    /// Fresh document name to id map for the collection.
    pub async fn document_index(&self) -> Result<HashMap<String, String>> {
        let documents = self
            .api
            .list_documents(Scope::Query, &self.collection_id, 0, DOCUMENT_INDEX_LIMIT)
            .await?;
        Ok(documents.into_iter().map(|doc| (doc.name, doc.id)).collect())
    }

    /// The single best chunk of `document_id` for `query` at `offset`.
    pub async fn snippet(
        &self,
        document_id: &str,
        query: &str,
        offset: usize,
    ) -> Result<Option<SearchChunk>> {
        let mut results = self
            .api
            .search_chunks(Scope::Query, &self.collection_id, query, document_id, offset, 1)
            .await?;
        Ok(if results.is_empty() {
            None
        } else {
            Some(results.swap_remove(0))
        })
    }

    pub async fn display_references(
        &self,
        message_id: &str,
        user_question: &str,
    ) -> Result<ReferenceReport> {
        let references = self
            .api
            .list_message_references(Scope::Query, message_id)
            .await?;
        let collection = self
            .api
            .get_collection(Scope::Query, &self.collection_id)
            .await?;
        let index = self.document_index().await?;
        debug!(
            "Message {} cites {} references, collection has {} documents",
            message_id,
            references.len(),
            index.len()
        );

        let mut offsets = OffsetTracker::new();
        let mut entries = Vec::new();

        for reference in references.iter().take(MAX_REFERENCES) {
            let document_name = reference.document_name.clone();
            let Some(document_id) = index.get(&document_name) else {
                entries.push(ReferenceEntry::NotFound { document_name });
                continue;
            };

            let offset = offsets.offset(document_id);
            match self.snippet(document_id, user_question, offset).await? {
                Some(chunk) => {
                    entries.push(ReferenceEntry::Snippet {
                        document_name,
                        score: reference.score,
                        text: truncate_at_sentence(&chunk.text).to_string(),
                    });
                    offsets.advance(document_id);
                }
                None => entries.push(ReferenceEntry::NoText {
                    document_name,
                    offset,
                }),
            }
        }

        info!("Resolved {} references for message {}", entries.len(), message_id);
        Ok(ReferenceReport {
            collection,
            entries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_keeps_text_up_to_last_period() {
        assert_eq!(truncate_at_sentence("One. Two. Three"), "One. Two.");
    }

    #[test]
    fn test_truncate_without_period_hard_cuts() {
        let text = "a".repeat(1500);
        assert_eq!(truncate_at_sentence(&text).len(), SNIPPET_WINDOW);
        assert_eq!(truncate_at_sentence("no period here"), "no period here");
    }

    #[test]
    fn test_truncate_ignores_periods_past_window() {
        let text = format!("{}.tail", "b".repeat(1200));
        assert_eq!(truncate_at_sentence(&text), "b".repeat(1000));

        let text = format!("{}.{}", "c".repeat(999), "d".repeat(50));
        assert_eq!(truncate_at_sentence(&text), format!("{}.", "c".repeat(999)));
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        let text = "é".repeat(1200);
        let cut = truncate_at_sentence(&text);
        assert_eq!(cut.chars().count(), SNIPPET_WINDOW);
    }

    #[test]
    fn test_offset_tracker_advances_per_document() {
        let mut offsets = OffsetTracker::new();
        assert_eq!(offsets.offset("a"), 0);
        offsets.advance("a");
        offsets.advance("a");
        offsets.advance("b");
        assert_eq!(offsets.offset("a"), 2);
        assert_eq!(offsets.offset("b"), 1);
        assert_eq!(offsets.offset("c"), 0);
    }

    #[test]
    fn test_entry_rendering() {
        let snippet = ReferenceEntry::Snippet {
            document_name: "policy.pdf".into(),
            score: 0.82,
            text: "All staff must comply.".into(),
        };
        assert_eq!(
            snippet.to_string(),
            "Document: policy.pdf, Score: 0.82, Text: All staff must comply."
        );

        let whole = ReferenceEntry::Snippet {
            document_name: "a.pdf".into(),
            score: 1.0,
            text: "T.".into(),
        };
        assert_eq!(whole.to_string(), "Document: a.pdf, Score: 1.0, Text: T.");

        let missing = ReferenceEntry::NoText {
            document_name: "x.pdf".into(),
            offset: 1,
        };
        assert_eq!(missing.to_string(), "No additional text found for 'x.pdf' at offset 1.");
    }

    #[test]
    fn test_format_score_keeps_decimal_for_whole_numbers() {
        assert_eq!(format_score(1.0), "1.0");
        assert_eq!(format_score(0.0), "0.0");
        assert_eq!(format_score(0.82), "0.82");
        assert_eq!(format_score(0.5), "0.5");
    }
}
