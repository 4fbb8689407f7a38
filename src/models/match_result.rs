// file: src/models/match_result.rs
// description: Match result models for fuzzy and filter searches
// reference: Used for row relevance search results

use super::catalog::Catalog;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowMatch {
    /// Dataset the row came from
    pub dataset: String,

    /// Zero-based row position within the dataset
    pub row_index: usize,

    /// Mean best-word similarity, 0.0-1.0
    pub score: f64,

    /// Resolved answer text, or the configured placeholder
    pub answer: String,

    /// Raw image cell, empty when the row has none
    pub image: String,
}

impl RowMatch {
    pub fn has_image(&self) -> bool {
        !self.image.trim().is_empty()
    }

    /// Format as a summary string for display
    pub fn format_summary(&self, max_answer_len: usize) -> String {
        let preview = if self.answer.chars().count() > max_answer_len {
            let cut: String = self.answer.chars().take(max_answer_len).collect();
            format!("{}...", cut)
        } else {
            self.answer.clone()
        };

        format!(
            "Score: {:.4} | {} #{}\n{}\n",
            self.score,
            self.dataset,
            self.row_index + 1,
            preview
        )
    }
}

/// Answer/image pair handed to callers; `(None, None)` means no match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub answer: Option<String>,
    pub image: Option<String>,
}

impl SearchOutcome {
    pub fn no_match() -> Self {
        Self::default()
    }

    pub fn is_match(&self) -> bool {
        self.answer.is_some()
    }
}

impl From<Option<RowMatch>> for SearchOutcome {
    fn from(found: Option<RowMatch>) -> Self {
        match found {
            Some(row) => Self {
                answer: Some(row.answer),
                image: Some(row.image),
            },
            None => Self::no_match(),
        }
    }
}

/// Copy of the catalog holding only rows (or tables) judged relevant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilteredCatalog {
    pub query: String,
    pub catalog: Catalog,
}

impl FilteredCatalog {
    pub fn new(query: impl Into<String>, catalog: Catalog) -> Self {
        Self {
            query: query.into(),
            catalog,
        }
    }

    pub fn total_rows(&self) -> usize {
        self.catalog.total_rows()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }
}
