// file: src/loader/workbook.rs
// description: spreadsheet workbooks where every sheet is a dataset
// reference: https://docs.rs/calamine

use super::DatasetSource;
use crate::error::{MatcherError, Result};
use crate::models::Dataset;
use calamine::{Data, Range, Reader, open_workbook_auto};
use std::path::{Path, PathBuf};
use tracing::debug;

/// An xlsx/xls/ods workbook. The first row of each sheet is the header and
/// every following non-empty row becomes a record.
pub struct WorkbookSource {
    path: PathBuf,
}

impl WorkbookSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn sheet_to_dataset(name: &str, range: &Range<Data>) -> Dataset {
        let mut rows = range.rows();

        let header: Vec<String> = match rows.next() {
            Some(cells) => cells.iter().map(cell_text).collect(),
            None => return Dataset::empty(name),
        };

        let records: Vec<Vec<String>> = rows
            .map(|cells| cells.iter().map(cell_text).collect::<Vec<_>>())
            .filter(|record| record.iter().any(|cell| !cell.trim().is_empty()))
            .collect();

        Dataset::from_records(name, header, records)
    }
}

impl DatasetSource for WorkbookSource {
    fn names(&self) -> Result<Vec<String>> {
        let workbook = open_workbook_auto(&self.path)?;
        Ok(workbook.sheet_names())
    }

    fn load(&self, name: &str) -> Result<Dataset> {
        let mut workbook = open_workbook_auto(&self.path)?;

        if !workbook.sheet_names().iter().any(|sheet| sheet == name) {
            return Err(MatcherError::DatasetNotFound(name.to_string()));
        }

        let range = workbook.worksheet_range(name)?;
        debug!(
            "Sheet {} in {}: {} rows x {} columns",
            name,
            self.path.display(),
            range.height(),
            range.width()
        );

        Ok(Self::sheet_to_dataset(name, &range))
    }
}

/// Cell text as a sheet export shows it; whole floats lose their `.0`.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::Error(_) => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_xlsxwriter::Workbook;
    use tempfile::TempDir;

    fn build_workbook(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("base.xlsx");
        let mut workbook = Workbook::new();

        let faq = workbook.add_worksheet();
        faq.set_name("faq").unwrap();
        faq.write_string(0, 0, "Pergunta").unwrap();
        faq.write_string(0, 1, "Resposta").unwrap();
        faq.write_string(0, 2, "Imagem").unwrap();
        faq.write_string(1, 0, "erro de impressão").unwrap();
        faq.write_string(1, 1, "reinicie a fila").unwrap();
        faq.write_string(2, 0, "toner").unwrap();
        faq.write_number(2, 1, 3.0).unwrap();

        let prices = workbook.add_worksheet();
        prices.set_name("precos").unwrap();
        prices.write_string(0, 0, "Item").unwrap();
        prices.write_string(1, 0, "papel").unwrap();
        prices.write_string(1, 1, "extra").unwrap();

        workbook.save(&path).unwrap();
        path
    }

    #[test]
    fn test_sheets_become_datasets() {
        let dir = TempDir::new().unwrap();
        let source = WorkbookSource::new(build_workbook(&dir));

        assert_eq!(source.names().unwrap(), vec!["faq", "precos"]);

        let faq = source.load("faq").unwrap();
        assert_eq!(faq.columns, vec!["Pergunta", "Resposta", "Imagem"]);
        assert_eq!(faq.len(), 2);
        assert_eq!(faq.rows[0].get("Resposta"), Some("reinicie a fila"));
        assert_eq!(faq.rows[0].get("Imagem"), Some(""));
        assert_eq!(faq.rows[1].get("Resposta"), Some("3"));
    }

    #[test]
    fn test_cells_past_header_are_kept() {
        let dir = TempDir::new().unwrap();
        let source = WorkbookSource::new(build_workbook(&dir));

        let prices = source.load("precos").unwrap();
        assert_eq!(prices.columns, vec!["Item", "column_2"]);
        assert_eq!(prices.rows[0].get("column_2"), Some("extra"));
    }

    #[test]
    fn test_missing_sheet_and_file() {
        let dir = TempDir::new().unwrap();
        let source = WorkbookSource::new(build_workbook(&dir));
        assert!(matches!(
            source.load("nada"),
            Err(MatcherError::DatasetNotFound(_))
        ));
        assert!(
            WorkbookSource::new(dir.path().join("missing.xlsx"))
                .names()
                .is_err()
        );
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&Data::Float(12.0)), "12");
        assert_eq!(cell_text(&Data::Float(12.5)), "12.5");
        assert_eq!(cell_text(&Data::String(" a ".to_string())), "a");
        assert_eq!(cell_text(&Data::Empty), "");
    }
}
