// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod catalog;
pub mod dataset;
pub mod match_result;

pub use catalog::Catalog;
pub use dataset::{Dataset, Row};
pub use match_result::{FilteredCatalog, RowMatch, SearchOutcome};
