// src/pipeline.rs
use anyhow::Result;
use std::path::PathBuf;
use tracing::{error, info, warn};

use crate::config::{Config, LIVE_SOURCE_LABEL, SAMPLE_SOURCE_LABEL};
use crate::error::{PipelineError, Severity};
use crate::fetch::{self, Source};
use crate::output::{write_summary, OutputSummary};
use crate::process::{self, columns, filter, normalize, RawDataset};
use crate::record::BookRecord;
use crate::sample::sample_books;

/// What a run produced.
#[derive(Debug)]
pub struct RunReport {
    pub output: PathBuf,
    pub total_count: usize,
    pub source: String,
    /// Set when the artifact holds sample data instead of live data.
    pub fallback: Option<PipelineError>,
}

impl RunReport {
    pub fn is_live(&self) -> bool {
        self.fallback.is_none()
    }
}

/// Resolve, filter and normalize an in-memory dataset.
pub fn convert(dataset: &RawDataset) -> Result<Vec<BookRecord>, PipelineError> {
    if dataset.is_empty() {
        return Err(PipelineError::EmptyDataset);
    }

    let columns = columns::resolve_columns(&dataset.headers);
    let selected = filter::filter_rows(dataset, columns.library.as_ref());
    if selected.is_empty() {
        // only reachable with a library column: without one every row is kept
        let column = columns
            .library
            .as_ref()
            .map(|c| c.label.clone())
            .unwrap_or_default();
        return Err(PipelineError::NoKeywordMatch {
            column,
            rows: dataset.len(),
        });
    }

    let normalized = normalize::normalize_rows(dataset, &selected, &columns);
    if normalized.books.is_empty() {
        return Err(PipelineError::NoRecords {
            skipped: normalized.skipped,
        });
    }
    Ok(normalized.books)
}

/// Load the file behind `source` and convert it.
pub fn convert_source(source: &Source) -> Result<Vec<BookRecord>, PipelineError> {
    let dataset =
        process::load_dataset(source.path()).map_err(|e| PipelineError::Unreadable {
            path: source.path().to_path_buf(),
            source: e,
        })?;
    convert(&dataset)
}

/// One full pass: acquire, convert, write. Any failure short of writing the
/// artifact itself falls back to sample data.
pub fn run(config: &Config) -> Result<RunReport> {
    // ─── 1) acquire ──────────────────────────────────────────────────
    let outcome = fetch::acquire(config).and_then(|source| {
        // ─── 2) load, resolve, filter, normalize ─────────────────────
        let books = convert_source(&source)?;
        Ok((source, books))
    });

    // ─── 3) triage ───────────────────────────────────────────────────
    let (books, label, fallback, staged) = match outcome {
        Ok((source, books)) => (books, LIVE_SOURCE_LABEL, None, Some(source)),
        Err(e) => {
            match e.severity() {
                Severity::Transient => warn!(error = %e, "falling back to sample data"),
                Severity::NeedsAttention => error!(
                    error = %e,
                    cause = %std::error::Error::source(&e)
                        .map(|s| s.to_string())
                        .unwrap_or_default(),
                    "falling back to sample data; upstream data needs attention"
                ),
            }
            (sample_books(), SAMPLE_SOURCE_LABEL, Some(e), None)
        }
    };

    // ─── 4) write ────────────────────────────────────────────────────
    let summary = OutputSummary::new(books, label);
    write_summary(&config.output, &summary)?;

    for (i, book) in summary.books.iter().take(3).enumerate() {
        info!(n = i + 1, title = %book.title, author = %book.author, publisher = %book.publisher, "sample");
    }

    // ─── 5) drop the staged download ─────────────────────────────────
    if let Some(source) = staged {
        source.cleanup();
    }

    Ok(RunReport {
        output: config.output.clone(),
        total_count: summary.total_count,
        source: summary.source,
        fallback,
    })
}
