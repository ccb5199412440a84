// src/process/normalize.rs
use tracing::{info, warn};

use crate::config::{DEFAULT_LIBRARY, SENTINEL};
use crate::error::RowError;
use crate::process::columns::{Field, ResolvedColumn, ResolvedColumnMap};
use crate::process::date_parser::normalize_shelving_date;
use crate::process::{Cell, RawDataset};
use crate::record::BookRecord;

/// Records built from a dataset, plus how many rows had to be dropped.
#[derive(Debug, Default)]
pub struct Normalized {
    pub books: Vec<BookRecord>,
    pub skipped: usize,
}

/// Value of `column` in `row`, with empties and `nan` mapped to the sentinel.
fn read_field(row: &[Cell], column: Option<&ResolvedColumn>) -> Result<String, RowError> {
    let Some(col) = column else {
        return Ok(SENTINEL.to_string());
    };
    match row.get(col.index).unwrap_or(&Cell::Empty) {
        Cell::Error(value) => Err(RowError::CellError {
            column: col.label.clone(),
            value: value.clone(),
        }),
        cell => Ok(match cell.render() {
            Some(v) if v != "nan" => v,
            _ => SENTINEL.to_string(),
        }),
    }
}

/// Map one raw row to a record.
pub fn normalize_row(row: &[Cell], columns: &ResolvedColumnMap) -> Result<BookRecord, RowError> {
    let field = |f: Field| read_field(row, columns.get(f));

    let library = match &columns.library {
        Some(col) => read_field(row, Some(col))?,
        None => DEFAULT_LIBRARY.to_string(),
    };

    Ok(BookRecord {
        title: field(Field::Title)?,
        author: field(Field::Author)?,
        publisher: field(Field::Publisher)?,
        publication_year: field(Field::PublicationYear)?,
        registration_number: field(Field::RegistrationNumber)?,
        shelving_date: normalize_shelving_date(&field(Field::ShelvingDate)?),
        library,
    })
}

/// Normalize the selected rows, skipping any that fail.
pub fn normalize_rows(
    dataset: &RawDataset,
    selected: &[usize],
    columns: &ResolvedColumnMap,
) -> Normalized {
    let mut out = Normalized {
        books: Vec::with_capacity(selected.len()),
        skipped: 0,
    };

    for &idx in selected {
        let Some(row) = dataset.rows.get(idx) else {
            continue;
        };
        match normalize_row(row, columns) {
            Ok(book) => out.books.push(book),
            Err(e) => {
                warn!(row = dataset.sheet_row(idx), error = %e, "skipping row");
                out.skipped += 1;
            }
        }
    }

    info!(
        converted = out.books.len(),
        skipped = out.skipped,
        "normalization done"
    );
    out
}
