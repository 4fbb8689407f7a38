// file: src/exporter/json.rs
// description: json export utilities for filtered datasets

use crate::error::{MatcherError, Result};
use crate::models::{Dataset, FilteredCatalog};
use chrono::Utc;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone)]
pub struct JsonExporter {
    output_dir: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct ExportManifest {
    pub exported_at: String,
    pub query: String,
    pub total_rows: usize,
    pub files: Vec<String>,
}

impl JsonExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir).map_err(|e| MatcherError::FileOperation {
            path: output_dir.clone(),
            source: e,
        })?;
        Ok(Self { output_dir })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Writes one `<dataset>.json` per dataset plus `manifest.json`.
    pub fn export_filtered(
        &self,
        filtered: &FilteredCatalog,
        pretty: bool,
    ) -> Result<ExportManifest> {
        info!("Starting JSON export to {:?}", self.output_dir);

        let mut files = Vec::new();
        for dataset in filtered.catalog.iter() {
            let file_name = format!("{}.json", sanitize_file_stem(&dataset.name));
            self.write(&file_name, &rows_as_objects(dataset), pretty)?;
            files.push(file_name);
        }

        let manifest = ExportManifest {
            exported_at: Utc::now().to_rfc3339(),
            query: filtered.query.clone(),
            total_rows: filtered.total_rows(),
            files,
        };
        self.write("manifest.json", &manifest, pretty)?;

        info!(
            "Export complete: {} rows in {} files",
            manifest.total_rows,
            manifest.files.len()
        );
        Ok(manifest)
    }

    fn write<T: Serialize>(&self, file_name: &str, value: &T, pretty: bool) -> Result<()> {
        let content = if pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };

        let path = self.output_dir.join(file_name);
        fs::write(&path, content).map_err(|e| MatcherError::FileOperation { path, source: e })
    }
}

/// Rows in the same `[{column: value}]` shape the JSON loader reads.
fn rows_as_objects(dataset: &Dataset) -> Vec<Map<String, Value>> {
    dataset
        .rows
        .iter()
        .map(|row| {
            row.cells()
                .map(|(column, value)| (column.to_string(), Value::String(value.to_string())))
                .collect()
        })
        .collect()
}

fn sanitize_file_stem(name: &str) -> String {
    let stem: String = name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if stem.is_empty() {
        "dataset".to_string()
    } else {
        stem
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{DatasetSource, JsonSource};
    use crate::models::Catalog;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_exporter_creation() {
        let dir = tempdir().unwrap();
        let exporter = JsonExporter::new(dir.path().join("nested/out"));
        assert!(exporter.is_ok());
    }

    #[test]
    fn test_export_writes_datasets_and_manifest() {
        let dir = tempdir().unwrap();
        let catalog: Catalog = vec![Dataset::from_records(
            "faq suporte",
            vec!["Pergunta".to_string(), "Resposta".to_string()],
            vec![vec!["erro".to_string(), "reinicie a fila".to_string()]],
        )]
        .into_iter()
        .collect();
        let filtered = FilteredCatalog::new("erro", catalog);

        let exporter = JsonExporter::new(dir.path()).unwrap();
        let manifest = exporter.export_filtered(&filtered, true).unwrap();

        assert_eq!(manifest.files, vec!["faq_suporte.json"]);
        assert_eq!(manifest.total_rows, 1);
        assert!(dir.path().join("manifest.json").exists());

        // Exported files load back through the JSON source.
        let reloaded = JsonSource::new(dir.path().join("faq_suporte.json"))
            .load("faq_suporte")
            .unwrap();
        assert_eq!(reloaded.rows[0].get("Resposta"), Some("reinicie a fila"));
    }

    #[test]
    fn test_sanitize_file_stem() {
        assert_eq!(sanitize_file_stem("preços/2024"), "preços_2024");
        assert_eq!(sanitize_file_stem(""), "dataset");
    }
}
