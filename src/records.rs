//! Row sources.
//!
//! A category's rows come either from a worksheet of an `.xlsx` file or from
//! a plain iteration count:
//!
//! - **Spreadsheet**: row 1 holds the field names, every later row is one
//!   record. Empty cells become `""` and rows with no value at all are
//!   skipped. Values are the text the cell stores (a numeric cell `250`
//!   reads as `"250"`).
//! - **Iterations**: `count` records whose single field holds `0`, `1`, …
//!   `count - 1`, for templates that are simply repeated (`##iter##`).

use crate::config::SourceConfig;
use crate::types::Record;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum RecordsError {
    #[error("Spreadsheet not found: {0}")]
    NotFound(PathBuf),
    #[error("Failed to read spreadsheet {path}: {message}")]
    Spreadsheet { path: PathBuf, message: String },
    #[error("Sheet {sheet:?} not found in {path}")]
    SheetNotFound { path: PathBuf, sheet: String },
    #[error("Spreadsheet {0} has no header row")]
    NoHeader(PathBuf),
    #[error("Column {column:?} missing from {source_name}")]
    MissingColumn { column: String, source_name: String },
}

/// One record plus the row it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Sheet row number (header is row 1), or 1-based iteration number.
    pub number: usize,
    pub record: Record,
}

/// All rows of one source, with the column names it declares.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowSet {
    /// Human-readable origin used in error messages.
    pub source_name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl RowSet {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.rows.iter().map(|r| &r.record)
    }

    /// Fail on the first column in `required` that the source doesn't declare.
    pub fn require_columns<'a>(
        &self,
        required: impl IntoIterator<Item = &'a str>,
    ) -> Result<(), RecordsError> {
        for column in required {
            if !self.columns.iter().any(|c| c == column) {
                return Err(RecordsError::MissingColumn {
                    column: column.to_string(),
                    source_name: self.source_name.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Load the rows described by `source`, resolving paths against `category_dir`.
pub fn load_rows(source: &SourceConfig, category_dir: &Path) -> Result<RowSet, RecordsError> {
    match source {
        SourceConfig::Spreadsheet { path, sheet } => {
            read_spreadsheet(&category_dir.join(path), sheet.as_deref())
        }
        SourceConfig::Iterations { count, field } => Ok(iterations(*count, field)),
    }
}

/// Records `{field: "0"}` … `{field: "count-1"}`.
pub fn iterations(count: u32, field: &str) -> RowSet {
    let rows = (0..count)
        .map(|i| Row {
            number: i as usize + 1,
            record: [(field, i.to_string())].into_iter().collect(),
        })
        .collect();
    RowSet {
        source_name: format!("{count} iterations"),
        columns: vec![field.to_string()],
        rows,
    }
}

/// Read one worksheet (the first one unless `sheet` names another).
pub fn read_spreadsheet(path: &Path, sheet: Option<&str>) -> Result<RowSet, RecordsError> {
    if !path.is_file() {
        return Err(RecordsError::NotFound(path.to_path_buf()));
    }
    let book =
        umya_spreadsheet::reader::xlsx::read(path).map_err(|e| RecordsError::Spreadsheet {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let worksheet = match sheet {
        Some(name) => book
            .get_sheet_by_name(name)
            .ok_or_else(|| RecordsError::SheetNotFound {
                path: path.to_path_buf(),
                sheet: name.to_string(),
            })?,
        None => book
            .get_sheet(&0)
            .ok_or_else(|| RecordsError::NoHeader(path.to_path_buf()))?,
    };

    let rows = rows_from_worksheet(worksheet, path)?;
    debug!(path = %path.display(), rows = rows.len(), "loaded spreadsheet");
    Ok(rows)
}

fn cell_text(sheet: &umya_spreadsheet::Worksheet, col: u32, row: u32) -> String {
    sheet
        .get_cell((col, row))
        .map(|cell| cell.get_value().to_string())
        .unwrap_or_default()
}

fn rows_from_worksheet(
    sheet: &umya_spreadsheet::Worksheet,
    path: &Path,
) -> Result<RowSet, RecordsError> {
    let (max_col, max_row) = sheet.get_highest_column_and_row();

    // Header cells, keeping their column index; blank headers are ignored.
    let header: Vec<(u32, String)> = (1..=max_col)
        .map(|col| (col, cell_text(sheet, col, 1).trim().to_string()))
        .filter(|(_, name)| !name.is_empty())
        .collect();
    if header.is_empty() {
        return Err(RecordsError::NoHeader(path.to_path_buf()));
    }

    let mut rows = Vec::new();
    for row in 2..=max_row {
        let record: Record = header
            .iter()
            .map(|(col, name)| (name.as_str(), cell_text(sheet, *col, row)))
            .collect();
        if record.is_empty() {
            continue;
        }
        rows.push(Row {
            number: row as usize,
            record,
        });
    }

    Ok(RowSet {
        source_name: path.display().to_string(),
        columns: header.into_iter().map(|(_, name)| name).collect(),
        rows,
    })
}
