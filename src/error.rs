// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, MatcherError>;

#[derive(Error, Debug)]
pub enum MatcherError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File operation failed for {path}: {source}")]
    FileOperation {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Dataset load error in {source_name}: {message}")]
    DatasetLoad {
        source_name: String,
        message: String,
    },

    #[error("Dataset not found: {0}")]
    DatasetNotFound(String),

    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("Unsupported data source: {0}")]
    UnsupportedSource(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid session transition: {0}")]
    Session(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
