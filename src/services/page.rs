use crate::domain::models::PageSnapshot;
use crate::site::SiteError;
use std::path::Path;

pub fn parse_page(raw: &str) -> anyhow::Result<PageSnapshot> {
    serde_json::from_str(raw).map_err(|e| SiteError::PageInvalid(e.to_string()).into())
}

pub fn load_page(path: &str) -> anyhow::Result<PageSnapshot> {
    let raw = std::fs::read_to_string(Path::new(path))
        .map_err(|e| SiteError::PageInvalid(format!("{}: {}", path, e)))?;
    parse_page(&raw)
}
