// file: src/loader/directory.rs
// description: Directory walking for dataset files
// reference: https://docs.rs/walkdir

use super::{DatasetSource, JsonSource, WorkbookSource, is_json, is_workbook};
use crate::error::{MatcherError, Result};
use crate::models::{Catalog, Dataset};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Every JSON file and workbook below a directory, in path order.
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn scan(&self) -> Vec<Box<dyn DatasetSource>> {
        info!("Scanning directory: {}", self.root.display());

        let mut files: Vec<PathBuf> = WalkDir::new(&self.root)
            .follow_links(false)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| !is_hidden(path))
            .collect();
        files.sort();

        files
            .into_iter()
            .filter_map(|path| -> Option<Box<dyn DatasetSource>> {
                if is_json(&path) {
                    Some(Box::new(JsonSource::new(path)))
                } else if is_workbook(&path) {
                    Some(Box::new(WorkbookSource::new(path)))
                } else {
                    debug!("Skipping file: {}", path.display());
                    None
                }
            })
            .collect()
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.') || n.starts_with("~$"))
}

impl DatasetSource for DirectorySource {
    fn names(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = Vec::new();
        for source in self.scan() {
            match source.names() {
                Ok(found) => {
                    for name in found {
                        if names.contains(&name) {
                            warn!("Dataset {} defined more than once, keeping the last", name);
                        } else {
                            names.push(name);
                        }
                    }
                }
                Err(e) => warn!("Skipping unreadable source: {}", e),
            }
        }
        Ok(names)
    }

    fn load(&self, name: &str) -> Result<Dataset> {
        let mut found = None;
        for source in self.scan() {
            if source
                .names()
                .is_ok_and(|names| names.iter().any(|n| n == name))
            {
                found = Some(source.load(name)?);
            }
        }
        found.ok_or_else(|| MatcherError::DatasetNotFound(name.to_string()))
    }

    fn load_catalog(&self, only: &[String]) -> Result<Catalog> {
        // One pass over the tree; a later file replaces an earlier dataset of the same name.
        let mut merged = Catalog::new();
        for source in self.scan() {
            match source.load_catalog(&[]) {
                Ok(catalog) => {
                    for dataset in catalog {
                        merged.insert(dataset);
                    }
                }
                Err(e) => warn!("Skipping unreadable source: {}", e),
            }
        }

        if only.is_empty() {
            return Ok(merged);
        }

        Ok(only
            .iter()
            .map(|name| {
                merged.get(name).cloned().unwrap_or_else(|| {
                    warn!("Dataset {} not found under {}", name, self.root.display());
                    Dataset::empty(name.as_str())
                })
            })
            .collect())
    }
}
