// file: src/matcher/similarity.rs
// description: word-level similarity scoring
// reference: https://docs.rs/strsim

use strsim::normalized_levenshtein;

/// Edit-distance ratio in [0, 1]; symmetric, 1.0 for identical strings.
pub fn similarity(a: &str, b: &str) -> f64 {
    normalized_levenshtein(a, b)
}

/// Best similarity of `word` against any of `candidates`, 0.0 when empty.
pub fn best_word_similarity(word: &str, candidates: &[String]) -> f64 {
    candidates
        .iter()
        .map(|candidate| similarity(word, candidate))
        .fold(0.0, f64::max)
}

/// Mean of each query word's best similarity against the row words.
///
/// Returns 0.0 for an empty query or an empty row.
pub fn mean_best_similarity(query_words: &[String], row_words: &[String]) -> f64 {
    if query_words.is_empty() || row_words.is_empty() {
        return 0.0;
    }

    let total: f64 = query_words
        .iter()
        .map(|word| best_word_similarity(word, row_words))
        .sum();

    total / query_words.len() as f64
}
