// file: src/loader/mod.rs
// description: dataset sources and source selection by path
// reference: internal module structure

pub mod directory;
pub mod json;
pub mod workbook;

pub use directory::DirectorySource;
pub use json::JsonSource;
pub use workbook::WorkbookSource;

use crate::error::{MatcherError, Result};
use crate::models::{Catalog, Dataset};
use std::path::Path;
use tracing::{debug, warn};

/// Something that can hand out named datasets.
pub trait DatasetSource {
    /// Dataset names in the order the source defines them.
    fn names(&self) -> Result<Vec<String>>;

    fn load(&self, name: &str) -> Result<Dataset>;

    /// Like `load`, but a failure yields an empty dataset.
    fn load_or_empty(&self, name: &str) -> Dataset {
        match self.load(name) {
            Ok(dataset) => dataset,
            Err(e) => {
                warn!("Failed to load dataset {}: {}", name, e);
                Dataset::empty(name)
            }
        }
    }

    /// Loads the named datasets, or all of them when `only` is empty.
    fn load_catalog(&self, only: &[String]) -> Result<Catalog> {
        let names = if only.is_empty() {
            self.names()?
        } else {
            only.to_vec()
        };

        let catalog: Catalog = names.iter().map(|name| self.load_or_empty(name)).collect();
        debug!(
            "Loaded {} datasets with {} rows",
            catalog.len(),
            catalog.total_rows()
        );
        Ok(catalog)
    }
}

pub(crate) fn is_workbook(path: &Path) -> bool {
    matches!(
        extension(path).as_deref(),
        Some("xlsx") | Some("xlsm") | Some("xls") | Some("ods")
    )
}

pub(crate) fn is_json(path: &Path) -> bool {
    extension(path).as_deref() == Some("json")
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
}

/// Picks a source from the path: directory, workbook or JSON file.
pub fn open_source(path: &Path) -> Result<Box<dyn DatasetSource>> {
    if path.is_dir() {
        return Ok(Box::new(DirectorySource::new(path)));
    }

    if is_workbook(path) {
        Ok(Box::new(WorkbookSource::new(path)))
    } else if is_json(path) {
        Ok(Box::new(JsonSource::new(path)))
    } else {
        Err(MatcherError::UnsupportedSource(path.display().to_string()))
    }
}
