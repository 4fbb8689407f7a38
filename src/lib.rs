// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod error;
pub mod exporter;
pub mod loader;
pub mod matcher;
pub mod models;
pub mod render;
pub mod session;
pub mod utils;

pub use config::{Config, DataConfig, FilterMode, FilterScope, MatcherConfig, OutputConfig};
pub use error::{MatcherError, Result};
pub use exporter::{ExportManifest, JsonExporter};
pub use loader::{DatasetSource, DirectorySource, JsonSource, WorkbookSource, open_source};
pub use matcher::{FieldResolver, Matcher, normalize, similarity, tokenize};
pub use models::{Catalog, Dataset, FilteredCatalog, Row, RowMatch, SearchOutcome};
pub use render::{AnswerRenderer, ImageRef, strip_links};
pub use session::{Session, SessionState};
pub use utils::{OperationTimer, Validator};
