// file: src/matcher/mod.rs
// description: relevance matcher module exports
// reference: internal module structure

pub mod fields;
pub mod relevance;
pub mod similarity;
pub mod text;

pub use fields::FieldResolver;
pub use relevance::Matcher;
pub use similarity::similarity;
pub use text::{normalize, tokenize};
