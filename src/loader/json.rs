// file: src/loader/json.rs
// description: datasets stored as JSON exports of spreadsheet tabs
// reference: https://docs.rs/serde_json

use super::DatasetSource;
use crate::error::{MatcherError, Result};
use crate::models::{Catalog, Dataset};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A JSON file holding either `{"<name>": [rows...], ...}` or a bare array of
/// rows, which becomes one dataset named after the file stem.
pub struct JsonSource {
    path: PathBuf,
}

impl JsonSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Value> {
        let content = fs::read_to_string(&self.path).map_err(|e| MatcherError::FileOperation {
            path: self.path.clone(),
            source: e,
        })?;
        debug!("Read {} bytes from {}", content.len(), self.path.display());
        Ok(serde_json::from_str(&content)?)
    }

    fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "dataset".to_string())
    }

    fn invalid(&self, message: impl Into<String>) -> MatcherError {
        MatcherError::DatasetLoad {
            source_name: self.path.display().to_string(),
            message: message.into(),
        }
    }

    fn rows(&self, name: &str, value: &Value) -> Result<Dataset> {
        let items = value
            .as_array()
            .ok_or_else(|| self.invalid(format!("dataset {} is not an array of rows", name)))?;

        // Non-object entries carry no named cells and are skipped.
        let objects: Vec<Map<String, Value>> = items
            .iter()
            .filter_map(|item| item.as_object().cloned())
            .collect();

        Ok(Dataset::from_json_rows(name, &objects))
    }
}

impl DatasetSource for JsonSource {
    fn names(&self) -> Result<Vec<String>> {
        match self.read()? {
            Value::Object(map) => Ok(map.keys().cloned().collect()),
            Value::Array(_) => Ok(vec![self.stem()]),
            _ => Err(self.invalid("expected an object of datasets or an array of rows")),
        }
    }

    fn load(&self, name: &str) -> Result<Dataset> {
        match self.read()? {
            Value::Object(map) => {
                let value = map
                    .get(name)
                    .ok_or_else(|| MatcherError::DatasetNotFound(name.to_string()))?;
                self.rows(name, value)
            }
            value @ Value::Array(_) if name == self.stem() => self.rows(name, &value),
            Value::Array(_) => Err(MatcherError::DatasetNotFound(name.to_string())),
            _ => Err(self.invalid("expected an object of datasets or an array of rows")),
        }
    }

    fn load_catalog(&self, only: &[String]) -> Result<Catalog> {
        // Parse once instead of once per dataset.
        let value = self.read()?;
        let dataset = |name: &str, found: Option<&Value>| match found {
            Some(rows) => self.rows(name, rows).unwrap_or_else(|e| {
                warn!("Failed to load dataset {}: {}", name, e);
                Dataset::empty(name)
            }),
            None => {
                warn!("Dataset {} not found in {}", name, self.path.display());
                Dataset::empty(name)
            }
        };

        let catalog = match &value {
            Value::Object(map) if only.is_empty() => map
                .iter()
                .map(|(name, rows)| dataset(name, Some(rows)))
                .collect(),
            Value::Object(map) => only
                .iter()
                .map(|name| dataset(name, map.get(name)))
                .collect(),
            Value::Array(_) => {
                let stem = self.stem();
                if only.is_empty() {
                    vec![dataset(&stem, Some(&value))].into_iter().collect()
                } else {
                    only.iter()
                        .map(|name| dataset(name, (*name == stem).then_some(&value)))
                        .collect()
                }
            }
            _ => return Err(self.invalid("expected an object of datasets or an array of rows")),
        };
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_object_of_datasets_keeps_order() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "base.json",
            r#"{
                "vendas": [{"Pergunta": "preço", "Resposta": "R$ 10"}],
                "faq": [{"Pergunta": "erro de impressão", "Resposta": "reinicie a fila", "Imagem": ""}]
            }"#,
        );

        let source = JsonSource::new(&path);
        assert_eq!(source.names().unwrap(), vec!["vendas", "faq"]);

        let catalog = source.load_catalog(&[]).unwrap();
        assert_eq!(catalog.names(), vec!["vendas", "faq"]);
        assert_eq!(
            catalog.get("faq").unwrap().rows[0].get("Resposta"),
            Some("reinicie a fila")
        );
    }

    #[test]
    fn test_bare_array_named_after_stem() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "faq.json", r#"[{"Pergunta": "a"}, 3, {"Pergunta": "b"}]"#);

        let source = JsonSource::new(&path);
        assert_eq!(source.names().unwrap(), vec!["faq"]);
        assert_eq!(source.load("faq").unwrap().len(), 2);
        assert!(source.load("outro").is_err());
    }

    #[test]
    fn test_only_filter_and_missing_dataset() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "base.json", r#"{"a": [{"x": "1"}], "b": "oops"}"#);
        let source = JsonSource::new(&path);

        let catalog = source.load_catalog(&["a".to_string()]).unwrap();
        assert_eq!(catalog.names(), vec!["a"]);

        let all = source.load_catalog(&[]).unwrap();
        assert_eq!(all.get("b").map(|d| d.len()), Some(0));
        assert!(matches!(
            source.load("c"),
            Err(MatcherError::DatasetNotFound(_))
        ));
    }

    #[test]
    fn test_requested_names_keep_requested_order() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "base.json",
            r#"{"a": [{"Pergunta": "x", "Resposta": "1"}], "b": [{"Pergunta": "y", "Resposta": "2"}]}"#,
        );
        let source = JsonSource::new(&path);

        let only = vec!["b".to_string(), "a".to_string(), "zzz".to_string()];
        let catalog = source.load_catalog(&only).unwrap();

        assert_eq!(catalog.names(), vec!["b", "a", "zzz"]);
        assert_eq!(catalog.get("b").unwrap().rows[0].get("Resposta"), Some("2"));
        assert!(catalog.get("zzz").unwrap().is_empty());
    }

    #[test]
    fn test_requested_names_on_bare_array() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "faq.json", r#"[{"Pergunta": "a"}]"#);
        let source = JsonSource::new(&path);

        let only = vec!["outro".to_string(), "faq".to_string()];
        let catalog = source.load_catalog(&only).unwrap();

        assert_eq!(catalog.names(), vec!["outro", "faq"]);
        assert!(catalog.get("outro").unwrap().is_empty());
        assert_eq!(catalog.get("faq").unwrap().len(), 1);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "broken.json", "{ not json");
        assert!(JsonSource::new(&path).names().is_err());
        assert!(JsonSource::new(dir.path().join("missing.json")).load("x").is_err());
    }
}
