use anyhow::{Context, Result};
use reqwest::{
    blocking::Client,
    header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, USER_AGENT},
};
use std::{fs, path::Path, time::Duration};
use url::Url;

// The portal answers bare clients with an error page.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
const SPREADSHEET_ACCEPT: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet, application/vnd.ms-excel, */*";
const KOREAN_ACCEPT_LANGUAGE: &str = "ko-KR,ko;q=0.9,en-US;q=0.8,en;q=0.7";

/// What came back from a successful download.
#[derive(Debug, Clone)]
pub struct Downloaded {
    pub status: u16,
    pub content_type: Option<String>,
    pub bytes: usize,
}

/// Blocking client with browser-like default headers, a per-request timeout
/// and a cookie store shared across candidates.
pub fn build_client(timeout: Duration) -> reqwest::Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers.insert(ACCEPT, HeaderValue::from_static(SPREADSHEET_ACCEPT));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(KOREAN_ACCEPT_LANGUAGE));

    Client::builder()
        .default_headers(headers)
        .timeout(timeout)
        .cookie_store(true)
        .build()
}

/// Download `url_str` and write the body to `dest`, fully flushed before
/// returning.
pub fn download_file(client: &Client, url_str: &str, dest: impl AsRef<Path>) -> Result<Downloaded> {
    let dest = dest.as_ref();
    let url = Url::parse(url_str).with_context(|| format!("parsing URL {}", url_str))?;

    let resp = client
        .get(url.as_str())
        .send()
        .with_context(|| format!("GET {}", url))?
        .error_for_status()?;
    let status = resp.status().as_u16();
    let content_type = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = resp
        .bytes()
        .with_context(|| format!("reading body from {}", url))?;

    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(dest, &body).with_context(|| format!("writing {:?}", dest))?;

    Ok(Downloaded {
        status,
        content_type,
        bytes: body.len(),
    })
}
