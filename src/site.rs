use crate::domain::constants::INDEX_FILE_NAME;
use crate::domain::models::IndexEntry;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(thiserror::Error, Debug)]
pub enum SiteError {
    #[error("search index unavailable: {0}")]
    IndexUnavailable(String),
    #[error("search index fetch failed with HTTP status {0}")]
    IndexHttp(u16),
    #[error("search index is not a JSON array")]
    IndexNotArray,
    #[error("page snapshot invalid: {0}")]
    PageInvalid(String),
    #[error("page has no {0}")]
    WidgetMissing(&'static str),
    #[error("role not found on page: {0}")]
    RoleNotFound(String),
    #[error("config invalid: {0}")]
    ConfigInvalid(String),
    #[error("unrecognized session event: {0}")]
    SessionInput(String),
}

impl SiteError {
    pub fn code(&self) -> &'static str {
        match self {
            SiteError::IndexUnavailable(_) | SiteError::IndexHttp(_) | SiteError::IndexNotArray => {
                "INDEX_UNAVAILABLE"
            }
            SiteError::PageInvalid(_) => "PAGE_INVALID",
            SiteError::WidgetMissing(_) => "WIDGET_MISSING",
            SiteError::RoleNotFound(_) => "ROLE_NOT_FOUND",
            SiteError::ConfigInvalid(_) => "CONFIG_INVALID",
            SiteError::SessionInput(_) => "SESSION_INPUT",
        }
    }
}

pub fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// URL of the index for a remote base. The base gets a trailing slash so
/// `https://host/docs` and `https://host/docs/` resolve the same way.
pub fn index_url(base: &str) -> String {
    if base.ends_with(".json") {
        return base.to_string();
    }
    if base.ends_with('/') {
        format!("{}{}", base, INDEX_FILE_NAME)
    } else {
        format!("{}/{}", base, INDEX_FILE_NAME)
    }
}

pub fn resolve_index_file(source: &str) -> PathBuf {
    let p = Path::new(source);
    if p.is_dir() {
        p.join(INDEX_FILE_NAME)
    } else {
        p.to_path_buf()
    }
}

/// Human-readable location the index is read from.
pub fn describe_source(source: &str) -> String {
    if is_remote(source) {
        index_url(source)
    } else {
        resolve_index_file(source).to_string_lossy().to_string()
    }
}

fn fetch_index_text(base: &str, timeout_ms: u64) -> anyhow::Result<String> {
    let url = index_url(base);
    tracing::debug!(%url, timeout_ms, "fetching search index");
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_millis(timeout_ms))
        .build()?;
    let resp = client
        .get(&url)
        .send()
        .map_err(|e| SiteError::IndexUnavailable(e.to_string()))?;
    let status = resp.status();
    if !status.is_success() {
        return Err(SiteError::IndexHttp(status.as_u16()).into());
    }
    Ok(resp.text()?)
}

pub fn load_index_raw(source: &str, timeout_ms: u64) -> anyhow::Result<String> {
    if is_remote(source) {
        return fetch_index_text(source, timeout_ms);
    }
    let file = resolve_index_file(source);
    std::fs::read_to_string(&file)
        .map_err(|e| SiteError::IndexUnavailable(format!("{}: {}", file.display(), e)).into())
}

/// Parses the index array. Elements that are not objects become entries with
/// every field missing rather than failing the whole index.
pub fn parse_index(raw: &str) -> anyhow::Result<Vec<IndexEntry>> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    let serde_json::Value::Array(items) = value else {
        return Err(SiteError::IndexNotArray.into());
    };
    Ok(items
        .into_iter()
        .map(|item| match item {
            serde_json::Value::Object(_) => {
                serde_json::from_value::<IndexEntry>(item).unwrap_or_default()
            }
            _ => IndexEntry::default(),
        })
        .collect())
}

pub fn load_index(source: &str, timeout_ms: u64) -> anyhow::Result<Vec<IndexEntry>> {
    let raw = load_index_raw(source, timeout_ms)?;
    parse_index(&raw)
}
