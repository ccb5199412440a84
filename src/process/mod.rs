// src/process/mod.rs
use calamine::{open_workbook_auto, Data, Reader};
use csv::ReaderBuilder;
use std::path::Path;
use tracing::{debug, info};

use crate::error::DatasetError;

pub mod columns;
pub mod date_parser;
pub mod filter;
pub mod normalize;
pub mod utils;

/// One scalar value from the sheet.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// A spreadsheet error value such as `#N/A`.
    Error(String),
}

impl Cell {
    /// String form of the value, or `None` when the cell carries nothing.
    pub fn render(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Text(s) if s.trim().is_empty() => None,
            Cell::Text(s) => Some(s.clone()),
            Cell::Int(i) => Some(i.to_string()),
            Cell::Float(f) => Some(utils::render_float(*f)),
            Cell::Bool(b) => Some(b.to_string()),
            Cell::Error(e) => Some(e.clone()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.render().is_none()
    }
}

impl From<&Data> for Cell {
    fn from(value: &Data) -> Self {
        match value {
            Data::Empty => Cell::Empty,
            Data::String(s) => Cell::Text(s.clone()),
            Data::Int(i) => Cell::Int(*i),
            Data::Float(f) => Cell::Float(*f),
            Data::Bool(b) => Cell::Bool(*b),
            Data::DateTime(dt) => match dt.as_datetime() {
                Some(ndt) => Cell::Text(ndt.format("%Y-%m-%d %H:%M:%S").to_string()),
                None => Cell::Float(dt.as_f64()),
            },
            Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
            Data::Error(e) => Cell::Error(e.to_string()),
        }
    }
}

/// The whole first sheet, header row split off from the data rows.
#[derive(Debug, Clone, Default)]
pub struct RawDataset {
    /// Column labels as published; unstable across dataset versions.
    pub headers: Vec<String>,
    /// Data rows, each padded to `headers.len()` cells.
    pub rows: Vec<Vec<Cell>>,
    /// 1-based sheet row of each entry in `rows`; the header is row 1.
    sheet_rows: Vec<usize>,
}

impl RawDataset {
    /// Build from header labels and rows. Labels are trimmed, short rows are
    /// padded with `Cell::Empty` and rows with no content at all are dropped.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let headers: Vec<String> = headers
            .into_iter()
            .map(|h| utils::clean_str(&h))
            .collect();
        let width = headers.len();
        let (sheet_rows, rows): (Vec<usize>, Vec<Vec<Cell>>) = rows
            .into_iter()
            .enumerate()
            .filter(|(_, row)| row.iter().any(|c| !c.is_empty()))
            .map(|(i, mut row)| {
                if row.len() < width {
                    row.resize(width, Cell::Empty);
                }
                (i + 2, row)
            })
            .unzip();
        Self {
            headers,
            rows,
            sheet_rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Sheet row number of `rows[row]`, counting dropped blank rows.
    pub fn sheet_row(&self, row: usize) -> usize {
        self.sheet_rows.get(row).copied().unwrap_or(row + 2)
    }

    pub fn cell(&self, row: usize, column: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&Cell::Empty)
    }
}

/// Load the dataset at `path`. `.csv` files go through the CSV reader, all
/// other extensions are opened as a workbook and only the first sheet is read.
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<RawDataset, DatasetError> {
    let path = path.as_ref();
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    let dataset = if is_csv {
        load_csv(path)?
    } else {
        load_workbook(path)?
    };

    info!(
        rows = dataset.len(),
        columns = dataset.headers.len(),
        "dataset loaded"
    );
    for (i, header) in dataset.headers.iter().enumerate() {
        debug!(index = i + 1, column = %header, "column");
    }
    Ok(dataset)
}

fn load_workbook(path: &Path) -> Result<RawDataset, DatasetError> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(DatasetError::NoSheet)??;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .ok_or(DatasetError::NoHeader)?
        .iter()
        .map(|c| c.to_string())
        .collect();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(DatasetError::NoHeader);
    }

    let data: Vec<Vec<Cell>> = rows
        .map(|row| row.iter().map(Cell::from).collect())
        .collect();
    Ok(RawDataset::new(headers, data))
}

fn load_csv(path: &Path) -> Result<RawDataset, DatasetError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(DatasetError::NoHeader);
    }

    let mut data: Vec<Vec<Cell>> = Vec::new();
    for record in rdr.records() {
        let record = record?;
        data.push(
            record
                .iter()
                .map(|field| {
                    if field.is_empty() {
                        Cell::Empty
                    } else {
                        Cell::Text(field.to_string())
                    }
                })
                .collect(),
        );
    }
    Ok(RawDataset::new(headers, data))
}
