// file: src/utils/validation.rs
// description: data validation utilities and helpers
// reference: input validation patterns

use crate::error::{MatcherError, Result};
use std::path::Path;

pub struct Validator;

impl Validator {
    pub fn validate_threshold(threshold: f64) -> Result<()> {
        if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
            return Err(MatcherError::Validation(format!(
                "Threshold must be between 0.0 and 1.0, got {}",
                threshold
            )));
        }
        Ok(())
    }

    pub fn validate_aliases(field: &str, aliases: &[String]) -> Result<()> {
        if aliases.iter().all(|alias| alias.trim().is_empty()) {
            return Err(MatcherError::Validation(format!(
                "{} must contain at least one non-blank alias",
                field
            )));
        }
        Ok(())
    }

    pub fn validate_data_path(path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(MatcherError::Validation(format!(
                "Data path does not exist: {}",
                path.display()
            )));
        }

        if !path.is_file() && !path.is_dir() {
            return Err(MatcherError::Validation(format!(
                "Data path is neither a file nor a directory: {}",
                path.display()
            )));
        }

        Ok(())
    }

    pub fn is_blank_query(query: &str) -> bool {
        query.trim().is_empty()
    }

    pub fn truncate_text(text: &str, max_chars: usize) -> String {
        if text.chars().count() <= max_chars {
            text.to_string()
        } else {
            let cut: String = text.chars().take(max_chars).collect();
            format!("{}...", cut)
        }
    }
}
