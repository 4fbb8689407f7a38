// file: src/render/mod.rs
// description: answer rendering module exports
// reference: internal module structure

pub mod answer;
pub mod image;
pub mod patterns;

pub use answer::{AnswerRenderer, NO_MATCH_MESSAGE, strip_links};
pub use image::ImageRef;
