// src/config.rs

use clap::Parser;
use std::{path::PathBuf, time::Duration};

/// Candidate download locations on the public data portal, tried in order.
pub static DATA_URLS: &[&str] = &[
    "https://www.data.go.kr/cmm/cmm/fileDownload.do?atchFileId=FILE_000000002936489&fileDetailSn=1",
    "https://www.data.go.kr/cmm/cmm/fileDownload.do?atchFileId=FILE_000000002936489&fileDetailSn=2",
];

/// Landing page for manual downloads when every candidate fails.
pub const DATASET_PAGE: &str = "https://www.data.go.kr/data/15089203/fileData.do";

/// Library-name substrings that identify the Dalseong county network.
pub static LIBRARY_KEYWORDS: &[&str] = &["달성", "다사", "논공", "유가", "옥포", "화원", "구지"];

/// Library name used for every record when the dataset has no library column.
pub const DEFAULT_LIBRARY: &str = "달성군립도서관";

/// Placeholder for unresolved or missing fields.
pub const SENTINEL: &str = "-";

pub const LIVE_SOURCE_LABEL: &str = "대구광역시 공공데이터포털";
pub const SAMPLE_SOURCE_LABEL: &str = "샘플 데이터 (테스트용)";
pub const FILTER_LABEL: &str = "달성군립도서관";

/// Runtime options. Every flag can also come from the environment.
#[derive(Parser, Debug, Clone)]
#[command(name = "dalseong-books")]
#[command(about = "Extract Dalseong county library holdings from the Daegu public library dataset")]
pub struct Config {
    /// Candidate download URLs, tried in order (defaults to the data.go.kr files)
    #[arg(long = "source-url", env = "BOOKS_SOURCE_URLS", value_delimiter = ',')]
    pub source_urls: Vec<String>,

    /// Pre-downloaded workbook; when present the network is never touched
    #[arg(long, env = "BOOKS_LOCAL_FILE", default_value = "library_data.xlsx")]
    pub local_file: PathBuf,

    /// Where a downloaded workbook is staged before processing
    #[arg(long, env = "BOOKS_DOWNLOAD_FILE", default_value = "temp_library_data.xlsx")]
    pub download_file: PathBuf,

    /// Output JSON artifact
    #[arg(short, long, env = "BOOKS_OUTPUT", default_value = "books.json")]
    pub output: PathBuf,

    /// Per-request timeout in seconds
    #[arg(long, env = "BOOKS_TIMEOUT_SECS", default_value_t = 60)]
    pub timeout_secs: u64,

    /// Skip the network stage entirely
    #[arg(long, env = "BOOKS_OFFLINE")]
    pub offline: bool,
}

impl Config {
    /// Candidate URLs, falling back to the built-in list when none were given.
    pub fn sources(&self) -> Vec<String> {
        if self.source_urls.is_empty() {
            DATA_URLS.iter().map(|u| u.to_string()).collect()
        } else {
            self.source_urls.clone()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_urls: Vec::new(),
            local_file: PathBuf::from("library_data.xlsx"),
            download_file: PathBuf::from("temp_library_data.xlsx"),
            output: PathBuf::from("books.json"),
            timeout_secs: 60,
            offline: false,
        }
    }
}
