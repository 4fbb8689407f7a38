// file: src/models/dataset.rs
// description: tabular dataset model with string-valued rows
// reference: internal data structures

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One row of a dataset: column name to cell text, in column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    cells: Vec<(String, String)>,
}

impl Row {
    pub fn new(cells: Vec<(String, String)>) -> Self {
        Self { cells }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    pub fn cells(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Cell values that carry any non-whitespace text.
    pub fn text_cells(&self) -> impl Iterator<Item = &str> {
        self.cells
            .iter()
            .map(|(_, value)| value.as_str())
            .filter(|value| !value.trim().is_empty())
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(name, _)| name.as_str())
    }

    pub fn is_blank(&self) -> bool {
        self.text_cells().next().is_none()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Dataset {
    pub fn new(name: impl Into<String>, columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows,
        }
    }

    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new(), Vec::new())
    }

    /// Builds a dataset from a header and ragged records.
    ///
    /// Short records are padded with empty cells. Cells past the header get
    /// synthetic `column_<n>` names so no value is dropped.
    pub fn from_records(
        name: impl Into<String>,
        header: Vec<String>,
        records: Vec<Vec<String>>,
    ) -> Self {
        let widest = records.iter().map(Vec::len).max().unwrap_or(0);
        let mut columns = unique_columns(header);
        while columns.len() < widest {
            columns.push(synthetic_column(columns.len()));
        }

        let rows = records
            .into_iter()
            .map(|mut record| {
                record.resize(columns.len(), String::new());
                Row::new(columns.iter().cloned().zip(record).collect())
            })
            .collect();

        Self::new(name, columns, rows)
    }

    /// Builds a dataset from JSON objects, one per row.
    ///
    /// Columns are collected in first-seen order across all rows, and rows
    /// missing a column get an empty cell for it.
    pub fn from_json_rows(name: impl Into<String>, objects: &[Map<String, Value>]) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for object in objects {
            for key in object.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }

        let rows = objects
            .iter()
            .map(|object| {
                Row::new(
                    columns
                        .iter()
                        .map(|column| {
                            let value = object.get(column).map(cell_text).unwrap_or_default();
                            (column.clone(), value)
                        })
                        .collect(),
                )
            })
            .collect();

        Self::new(name, columns, rows)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Converts a JSON scalar into cell text; null and nested values are absent.
fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

fn synthetic_column(index: usize) -> String {
    format!("column_{}", index + 1)
}

fn unique_columns(header: Vec<String>) -> Vec<String> {
    let mut columns: Vec<String> = Vec::with_capacity(header.len());
    for (index, name) in header.into_iter().enumerate() {
        let trimmed = name.trim();
        if trimmed.is_empty() || columns.iter().any(|c| c == trimmed) {
            columns.push(synthetic_column(index));
        } else {
            columns.push(trimmed.to_string());
        }
    }
    columns
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_ragged_records_are_padded() {
        let dataset = Dataset::from_records(
            "faq",
            strings(&["Pergunta", "Resposta", "Imagem"]),
            vec![strings(&["erro", "reinicie"]), strings(&["a", "b", "c"])],
        );

        assert_eq!(dataset.columns, strings(&["Pergunta", "Resposta", "Imagem"]));
        assert_eq!(dataset.rows[0].get("Imagem"), Some(""));
        assert_eq!(dataset.rows[1].get("Imagem"), Some("c"));
    }

    #[test]
    fn test_overlong_records_get_synthetic_columns() {
        let dataset = Dataset::from_records(
            "faq",
            strings(&["A"]),
            vec![strings(&["1", "2", "3"])],
        );

        assert_eq!(dataset.columns, strings(&["A", "column_2", "column_3"]));
        assert_eq!(dataset.rows[0].get("column_3"), Some("3"));
    }

    #[test]
    fn test_blank_and_duplicate_headers() {
        let dataset = Dataset::from_records("t", strings(&["A", "", "A"]), vec![]);
        assert_eq!(dataset.columns, strings(&["A", "column_2", "column_3"]));
    }

    #[test]
    fn test_json_rows_stringify_scalars() {
        let objects = vec![
            json!({"Pergunta": "preço", "Valor": 12.5, "Ativo": true})
                .as_object()
                .cloned()
                .unwrap(),
            json!({"Pergunta": null, "Extra": ["x"]})
                .as_object()
                .cloned()
                .unwrap(),
        ];

        let dataset = Dataset::from_json_rows("precos", &objects);

        assert_eq!(
            dataset.columns,
            strings(&["Pergunta", "Valor", "Ativo", "Extra"])
        );
        assert_eq!(dataset.rows[0].get("Valor"), Some("12.5"));
        assert_eq!(dataset.rows[0].get("Ativo"), Some("true"));
        assert_eq!(dataset.rows[0].get("Extra"), Some(""));
        assert!(dataset.rows[1].is_blank());
    }

    #[test]
    fn test_text_cells_skip_whitespace() {
        let row = Row::new(vec![
            ("A".to_string(), "  ".to_string()),
            ("B".to_string(), "texto".to_string()),
        ]);
        assert_eq!(row.text_cells().collect::<Vec<_>>(), vec!["texto"]);
    }
}
