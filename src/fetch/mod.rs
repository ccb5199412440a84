// src/fetch/mod.rs
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{error, info, warn};
use url::Url;

use crate::config::{Config, DATASET_PAGE};
use crate::error::PipelineError;

pub mod download;

/// Where the dataset for this run lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// A file the operator placed on disk; never deleted.
    Local(PathBuf),
    /// Staged by this run; removed after successful processing.
    Downloaded(PathBuf),
}

impl Source {
    pub fn path(&self) -> &Path {
        match self {
            Source::Local(p) | Source::Downloaded(p) => p,
        }
    }

    /// Delete a staged download. Local files are left alone.
    pub fn cleanup(&self) {
        if let Source::Downloaded(path) = self {
            match fs::remove_file(path) {
                Ok(()) => info!(path = %path.display(), "removed staged download"),
                Err(e) => warn!(path = %path.display(), error = %e, "failed to remove staged download"),
            }
        }
    }
}

/// Find the dataset: a local file wins, otherwise each candidate URL is tried
/// once, in order, until one downloads.
#[tracing::instrument(level = "info", skip(config))]
pub fn acquire(config: &Config) -> Result<Source, PipelineError> {
    if let Ok(meta) = fs::metadata(&config.local_file) {
        if meta.is_file() {
            info!(
                path = %config.local_file.display(),
                bytes = meta.len(),
                "using existing local file"
            );
            return Ok(Source::Local(config.local_file.clone()));
        }
    }

    if config.offline {
        warn!("offline mode and no local file");
        return Err(PipelineError::Unavailable { attempts: 0 });
    }

    let candidates = config.sources();
    let client = match download::build_client(config.timeout()) {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "failed to build HTTP client");
            log_manual_instructions(&config.local_file);
            return Err(PipelineError::Unavailable { attempts: 0 });
        }
    };

    let total = candidates.len();
    for (i, candidate) in candidates.iter().enumerate() {
        let host = Url::parse(candidate)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_default();
        info!(attempt = i + 1, of = total, host = %host, url = %candidate, "downloading");

        match download::download_file(&client, candidate, &config.download_file) {
            Ok(d) => {
                info!(
                    status = d.status,
                    content_type = d.content_type.as_deref().unwrap_or("?"),
                    bytes = d.bytes,
                    path = %config.download_file.display(),
                    "download complete"
                );
                return Ok(Source::Downloaded(config.download_file.clone()));
            }
            Err(e) => {
                warn!(attempt = i + 1, error = %format!("{:#}", e), "download failed");
            }
        }
    }

    error!(attempts = total, "every download attempt failed");
    log_manual_instructions(&config.local_file);
    Err(PipelineError::Unavailable { attempts: total })
}

fn log_manual_instructions(local_file: &Path) {
    warn!("download the dataset manually:");
    warn!("  1. open {}", DATASET_PAGE);
    warn!("  2. download '대구광역시_공공도서관 단행자료현황'");
    warn!("  3. save it as '{}' and run again", local_file.display());
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::{
        io::{Read, Write},
        net::TcpListener,
        thread::{self, JoinHandle},
    };
    use tempfile::tempdir;

    /// Serve exactly one HTTP response on a loopback port; the handle yields
    /// the raw request text.
    fn serve_once(status: &'static str, body: &'static [u8]) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/library.xlsx", listener.local_addr().unwrap());
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request: Vec<u8> = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let head = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/octet-stream\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                status,
                body.len()
            );
            let mut response = head.into_bytes();
            response.extend_from_slice(body);
            // the client may hang up early on error statuses
            let _ = stream.write_all(&response);
            String::from_utf8_lossy(&request).to_string()
        });
        (url, handle)
    }

    fn config_in(dir: &Path) -> Config {
        Config {
            local_file: dir.join("library_data.xlsx"),
            download_file: dir.join("temp_library_data.xlsx"),
            output: dir.join("books.json"),
            timeout_secs: 5,
            ..Default::default()
        }
    }

    #[test]
    fn test_local_file_skips_network() -> Result<()> {
        let dir = tempdir()?;
        let mut cfg = config_in(dir.path());
        fs::write(&cfg.local_file, b"xlsx bytes")?;
        // would fail if it were contacted
        cfg.source_urls = vec!["http://127.0.0.1:9/never.xlsx".into()];

        let source = acquire(&cfg)?;
        assert_eq!(source, Source::Local(cfg.local_file.clone()));
        source.cleanup();
        assert!(cfg.local_file.exists());
        Ok(())
    }

    #[test]
    fn test_offline_without_local_file() {
        let dir = tempdir().unwrap();
        let cfg = Config {
            offline: true,
            ..config_in(dir.path())
        };
        assert!(matches!(
            acquire(&cfg),
            Err(PipelineError::Unavailable { attempts: 0 })
        ));
    }

    #[test]
    fn test_all_candidates_fail() {
        let dir = tempdir().unwrap();
        let cfg = Config {
            source_urls: vec![
                "not a url".into(),
                "http://127.0.0.1:9/library.xlsx".into(),
            ],
            ..config_in(dir.path())
        };
        assert!(matches!(
            acquire(&cfg),
            Err(PipelineError::Unavailable { attempts: 2 })
        ));
        assert!(!cfg.download_file.exists());
    }

    #[test]
    fn test_http_error_moves_to_next_candidate() -> Result<()> {
        let dir = tempdir()?;
        let (bad_url, bad) = serve_once("404 Not Found", b"missing");
        let (good_url, good) = serve_once("200 OK", b"PK\x03\x04workbook");
        let cfg = Config {
            source_urls: vec![bad_url, good_url],
            ..config_in(dir.path())
        };

        let source = acquire(&cfg)?;
        assert_eq!(source, Source::Downloaded(cfg.download_file.clone()));
        assert_eq!(fs::read(&cfg.download_file)?, b"PK\x03\x04workbook");

        bad.join().unwrap();
        let request = good.join().unwrap().to_lowercase();
        assert!(request.contains("user-agent: mozilla/5.0"));
        assert!(request.contains("accept-language: ko-kr"));

        source.cleanup();
        assert!(!cfg.download_file.exists());
        Ok(())
    }
}
