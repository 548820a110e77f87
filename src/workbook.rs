use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use tracing::{info, warn};

use crate::error::PipelineError;

/// A single cell as loaded from the workbook.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
}

impl Cell {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(*v),
            Cell::Text(s) => s.trim().parse().ok(),
            Cell::Empty => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Label form of the cell. Whole numbers print as integers, so an
    /// `Index year` stored as `2021.0` becomes `"2021"`.
    pub fn as_label(&self) -> Option<String> {
        match self {
            Cell::Number(v) if v.fract() == 0.0 => Some(format!("{}", *v as i64)),
            Cell::Number(v) => Some(v.to_string()),
            Cell::Text(s) => Some(s.clone()),
            Cell::Empty => None,
        }
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Number(v)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

/// One worksheet: the header row plus its data rows.
#[derive(Debug, Clone)]
pub struct Sheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, headers: Vec<&str>, rows: Vec<Vec<Cell>>) -> Self {
        Self {
            name: name.into(),
            headers: headers.into_iter().map(str::to_string).collect(),
            rows,
        }
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == column)
    }

    /// Column index, or `MissingColumn` naming this sheet and the column.
    pub fn require_column(&self, column: &str) -> Result<usize, PipelineError> {
        self.column_index(column)
            .ok_or_else(|| PipelineError::MissingColumn {
                sheet: self.name.clone(),
                column: column.to_string(),
            })
    }

    /// Year label for detail tables: the first four characters of the sheet
    /// name (sheets are named by index year).
    pub fn year_label(&self) -> String {
        self.name.chars().take(4).collect()
    }
}

/// The workbook parsed once into memory. Immutable after load; every derived
/// table is computed from this single parse.
#[derive(Debug, Clone)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let mut book = open_workbook_auto(path)?;
        let names = book.sheet_names().to_owned();

        let mut sheets = Vec::with_capacity(names.len());
        for name in names {
            let range = book.worksheet_range(&name)?;
            let mut row_iter = range.rows();
            let headers: Vec<String> = match row_iter.next() {
                Some(row) => row.iter().map(|c| c.to_string().trim().to_string()).collect(),
                None => {
                    warn!(sheet = %name, "sheet has no header row, skipping");
                    continue;
                }
            };
            let rows: Vec<Vec<Cell>> = row_iter
                .map(|row| row.iter().map(convert_cell).collect())
                .collect();
            sheets.push(Sheet { name, headers, rows });
        }

        info!(path = %path.display(), sheets = sheets.len(), "workbook loaded");
        Ok(Self { sheets })
    }

    /// Build directly from in-memory sheets. Used by tests and any caller that
    /// already holds the data in another form.
    pub fn from_sheets(sheets: Vec<Sheet>) -> Self {
        Self { sheets }
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }
}

fn convert_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::Float(v) => Cell::Number(*v),
        Data::Int(v) => Cell::Number(*v as f64),
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Cell::Empty
            } else {
                Cell::Text(trimmed.to_string())
            }
        }
        Data::Bool(b) => Cell::Number(if *b { 1.0 } else { 0.0 }),
        other => Cell::Text(other.to_string()),
    }
}
