use crate::domain::constants::{
    DEFAULT_BASE_URL, DEFAULT_DEBOUNCE_MS, DEFAULT_FETCH_TIMEOUT_MS, DEFAULT_MAX_RESULTS,
    DEFAULT_NAVBAR_EXCERPT, DEFAULT_PAGE_EXCERPT,
};
use crate::site::SiteError;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Default, Clone)]
pub struct Settings {
    #[serde(default)]
    pub index: IndexSettings,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub filter: FilterSettings,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct IndexSettings {
    pub base_url: String,
    pub timeout_ms: u64,
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_FETCH_TIMEOUT_MS,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct SearchSettings {
    pub debounce_ms: u64,
    pub max_results: usize,
    pub page_excerpt: usize,
    pub navbar_excerpt: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            max_results: DEFAULT_MAX_RESULTS,
            page_excerpt: DEFAULT_PAGE_EXCERPT,
            navbar_excerpt: DEFAULT_NAVBAR_EXCERPT,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct FilterSettings {
    pub debounce_ms: u64,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

fn settings_path() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")?;
    Ok(PathBuf::from(home).join(".config/dictsite/config.toml"))
}

pub fn parse_settings(raw: &str) -> anyhow::Result<Settings> {
    toml::from_str(raw).map_err(|e| SiteError::ConfigInvalid(e.to_string()).into())
}

pub fn load_settings() -> anyhow::Result<Settings> {
    let Ok(path) = settings_path() else {
        return Ok(Settings::default());
    };
    if !path.exists() {
        return Ok(Settings::default());
    }
    tracing::debug!(path = %path.display(), "loading config");
    let raw = std::fs::read_to_string(path)?;
    parse_settings(&raw)
}

impl Settings {
    /// Base URL from the command line wins over the config file.
    pub fn with_base_url(mut self, base_url: Option<&str>) -> Self {
        if let Some(b) = base_url {
            self.index.base_url = b.to_string();
        }
        self
    }
}
