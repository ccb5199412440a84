// src/process/filter.rs
use std::collections::HashSet;
use tracing::info;

use crate::config::LIBRARY_KEYWORDS;
use crate::process::{columns::ResolvedColumn, RawDataset};

const PREVIEW_LIMIT: usize = 20;

/// True when `value` contains at least one of `keywords`.
pub fn matches_keywords(value: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| value.contains(k))
}

/// Indices of the rows that belong to the library network.
///
/// With no library column every row is kept. The returned indices are in
/// sheet order; an empty result from a non-empty dataset is for the caller to
/// treat as a failed resolution.
pub fn filter_rows(dataset: &RawDataset, library: Option<&ResolvedColumn>) -> Vec<usize> {
    let Some(col) = library else {
        info!(rows = dataset.len(), "no library column; keeping all rows");
        return (0..dataset.len()).collect();
    };

    log_library_names(dataset, col);
    info!(keywords = %LIBRARY_KEYWORDS.join(", "), "filtering");

    let kept: Vec<usize> = (0..dataset.len())
        .filter(|&row| {
            dataset
                .cell(row, col.index)
                .render()
                .map(|v| matches_keywords(&v, LIBRARY_KEYWORDS))
                .unwrap_or(false)
        })
        .collect();

    info!(kept = kept.len(), of = dataset.len(), "filter result");
    kept
}

/// Distinct non-empty values of `column`, in order of first appearance.
pub fn distinct_values(dataset: &RawDataset, column: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    dataset
        .rows
        .iter()
        .filter_map(|row| row.get(column).and_then(|c| c.render()))
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

fn log_library_names(dataset: &RawDataset, col: &ResolvedColumn) {
    let names = distinct_values(dataset, col.index);

    info!(distinct = names.len(), column = %col.label, "libraries in dataset");
    for name in names.iter().take(PREVIEW_LIMIT) {
        info!(library = %name);
    }
    if names.len() > PREVIEW_LIMIT {
        info!("... and {} more", names.len() - PREVIEW_LIMIT);
    }
}
