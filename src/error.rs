use std::path::PathBuf;
use thiserror::Error;

/// Failures that stop a spreadsheet from being loaded at all.
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("workbook has no sheets")]
    NoSheet,

    #[error("first sheet has no header row")]
    NoHeader,
}

/// A single row that could not be turned into a record.
#[derive(Error, Debug, PartialEq)]
pub enum RowError {
    #[error("column '{column}' holds a spreadsheet error value {value}")]
    CellError { column: String, value: String },
}

/// Why a run fell back to sample data.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("no source available after {attempts} download attempt(s)")]
    Unavailable { attempts: usize },

    #[error("could not read dataset {}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: DatasetError,
    },

    #[error("dataset has a header but no data rows")]
    EmptyDataset,

    #[error("no value in column '{column}' matched the library keywords ({rows} rows scanned)")]
    NoKeywordMatch { column: String, rows: usize },

    #[error("every one of {skipped} row(s) failed to normalize")]
    NoRecords { skipped: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Likely to clear up on the next scheduled run.
    Transient,
    /// Upstream format or naming changed; someone should look.
    NeedsAttention,
}

impl PipelineError {
    pub fn severity(&self) -> Severity {
        match self {
            PipelineError::Unavailable { .. } | PipelineError::EmptyDataset => Severity::Transient,
            PipelineError::Unreadable { .. }
            | PipelineError::NoKeywordMatch { .. }
            | PipelineError::NoRecords { .. } => Severity::NeedsAttention,
        }
    }
}
