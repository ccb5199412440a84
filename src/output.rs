// src/output.rs
use anyhow::{ensure, Context, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
};
use tracing::info;

use crate::config::FILTER_LABEL;
use crate::record::BookRecord;

/// The artifact written to `books.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSummary {
    pub last_updated: String,
    pub total_count: usize,
    pub source: String,
    pub filter: String,
    pub books: Vec<BookRecord>,
}

impl OutputSummary {
    /// Wrap `books` with the current local time; `total_count` always
    /// equals `books.len()`.
    pub fn new(books: Vec<BookRecord>, source: &str) -> Self {
        Self {
            last_updated: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            total_count: books.len(),
            source: source.to_string(),
            filter: FILTER_LABEL.to_string(),
            books,
        }
    }
}

/// Write `summary` as indented UTF-8 JSON, replacing whatever is at `path`.
#[tracing::instrument(level = "info", skip(summary), fields(path = %path.as_ref().display()))]
pub fn write_summary<P: AsRef<Path>>(path: P, summary: &OutputSummary) -> Result<()> {
    let path = path.as_ref();
    ensure!(!summary.books.is_empty(), "refusing to write an empty book list");
    ensure!(
        summary.total_count == summary.books.len(),
        "total_count {} does not match {} books",
        summary.total_count,
        summary.books.len()
    );

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating output directory {:?}", parent))?;
    }

    let file = File::create(path).with_context(|| format!("creating {:?}", path))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, summary)
        .with_context(|| format!("serializing summary to {:?}", path))?;
    writer.write_all(b"\n")?;
    writer.flush().with_context(|| format!("flushing {:?}", path))?;

    info!(
        books = summary.total_count,
        source = %summary.source,
        last_updated = %summary.last_updated,
        "summary written"
    );
    Ok(())
}
