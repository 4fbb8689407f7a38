// file: src/matcher/relevance.rs
// description: row relevance matching over dataset catalogs
// reference: brute-force fuzzy matching with Levenshtein ratios

use super::fields::FieldResolver;
use super::similarity::{best_word_similarity, mean_best_similarity};
use super::text::{normalize, tokenize};
use crate::config::{FilterMode, FilterScope, MatcherConfig};
use crate::models::{Catalog, Dataset, FilteredCatalog, Row, RowMatch, SearchOutcome};
use tracing::debug;

/// Decides which rows of a catalog are relevant to a free-text query.
///
/// Two modes are offered. `filter` keeps every qualifying row (or table) and
/// `best_match` scores every row and returns the single best one. Both scan
/// datasets in catalog order and rows in dataset order, and neither touches
/// the catalog it reads.
pub struct Matcher {
    config: MatcherConfig,
    answer_field: FieldResolver,
    image_field: FieldResolver,
}

#[derive(Debug, Clone, Copy)]
struct Scored<'a> {
    dataset: &'a str,
    row_index: usize,
    row: &'a Row,
    score: f64,
}

impl Matcher {
    pub fn new(config: MatcherConfig) -> Self {
        let answer_field = FieldResolver::new(&config.answer_field_aliases);
        let image_field = FieldResolver::new(&config.image_field_aliases);
        Self {
            config,
            answer_field,
            image_field,
        }
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    pub fn threshold(&self) -> f64 {
        self.config.threshold
    }

    /// Copy of the catalog restricted to relevant rows, or to whole tables
    /// holding at least one relevant row.
    ///
    /// Datasets without a qualifying row are left out entirely. In fuzzy
    /// mode a word similarity equal to the threshold counts as a hit.
    pub fn filter(&self, catalog: &Catalog, query: &str) -> FilteredCatalog {
        let normalized_query = normalize(query);
        if normalized_query.is_empty() {
            debug!("Blank query, nothing to filter");
            return FilteredCatalog::new(query, Catalog::new());
        }
        let query_words = tokenize(query);

        let mut filtered = Catalog::new();
        for dataset in catalog.iter() {
            let rows: Vec<Row> = dataset
                .rows
                .iter()
                .filter(|row| self.row_qualifies(row, &normalized_query, &query_words))
                .cloned()
                .collect();

            if rows.is_empty() {
                continue;
            }

            debug!(
                "Dataset {}: {} of {} rows relevant",
                dataset.name,
                rows.len(),
                dataset.len()
            );

            let kept = match self.config.filter_scope {
                FilterScope::Rows => Dataset::new(&dataset.name, dataset.columns.clone(), rows),
                FilterScope::Tables => dataset.clone(),
            };
            filtered.insert(kept);
        }

        FilteredCatalog::new(query, filtered)
    }

    fn row_qualifies(&self, row: &Row, normalized_query: &str, query_words: &[String]) -> bool {
        match self.config.filter_mode {
            FilterMode::Substring => row
                .text_cells()
                .any(|cell| normalize(cell).contains(normalized_query)),
            FilterMode::Fuzzy => {
                if query_words.is_empty() {
                    return false;
                }
                let row_words = row_words(row);
                query_words
                    .iter()
                    .all(|word| best_word_similarity(word, &row_words) >= self.config.threshold)
            }
        }
    }

    /// Mean over query words of each word's best similarity in the row.
    pub fn score_row(&self, query_words: &[String], row: &Row) -> f64 {
        mean_best_similarity(query_words, &row_words(row))
    }

    /// Highest scoring row across the catalog, if it clears the threshold.
    ///
    /// The first row reaching the top score wins ties. A score equal to the
    /// threshold is accepted.
    pub fn best_match(&self, catalog: &Catalog, query: &str) -> Option<RowMatch> {
        let query_words = tokenize(query);
        if query_words.is_empty() {
            debug!("Query has no words, skipping scoring");
            return None;
        }

        let mut best: Option<Scored> = None;
        for (dataset, row_index, row) in catalog.rows() {
            let score = self.score_row(&query_words, row);
            if best.is_none_or(|current| score > current.score) {
                best = Some(Scored {
                    dataset,
                    row_index,
                    row,
                    score,
                });
            }
        }

        let best = best?;
        if best.score < self.config.threshold {
            debug!(
                "Best score {:.4} ({} #{}) below threshold {:.2}",
                best.score, best.dataset, best.row_index, self.config.threshold
            );
            return None;
        }

        Some(self.to_match(best))
    }

    /// Rows clearing the threshold, best first; equal scores keep scan order.
    pub fn rank(&self, catalog: &Catalog, query: &str, limit: usize) -> Vec<RowMatch> {
        let query_words = tokenize(query);
        if query_words.is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut scored: Vec<Scored> = catalog
            .rows()
            .map(|(dataset, row_index, row)| Scored {
                dataset,
                row_index,
                row,
                score: self.score_row(&query_words, row),
            })
            .filter(|s| s.score >= self.config.threshold)
            .collect();

        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(limit);
        scored.into_iter().map(|s| self.to_match(s)).collect()
    }

    /// Answer and image for the best row; `(None, None)` when nothing matches.
    pub fn search(&self, catalog: &Catalog, query: &str) -> SearchOutcome {
        SearchOutcome::from(self.best_match(catalog, query))
    }

    fn to_match(&self, scored: Scored<'_>) -> RowMatch {
        let answer = self
            .answer_field
            .value(scored.row)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or(self.config.answer_placeholder.as_str())
            .to_string();
        let image = self
            .image_field
            .value(scored.row)
            .unwrap_or_default()
            .trim()
            .to_string();

        RowMatch {
            dataset: scored.dataset.to_string(),
            row_index: scored.row_index,
            score: scored.score,
            answer,
            image,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(MatcherConfig::default())
    }
}

fn row_words(row: &Row) -> Vec<String> {
    row.text_cells().flat_map(tokenize).collect()
}
