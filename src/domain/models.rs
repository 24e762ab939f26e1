use crate::cli::Placement;
use crate::domain::constants::UNDEFINED_FIELD;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

#[derive(Serialize)]
pub struct JsonErr {
    pub ok: bool,
    pub error: ErrorBody,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

/// One record of the site generator's `index.json`.
///
/// Fields are optional because the index is not schema-checked: a missing
/// field renders as `undefined` instead of failing the load.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct IndexEntry {
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub section: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub permalink: Option<String>,
}

impl IndexEntry {
    pub fn title(&self) -> &str {
        text_or_undefined(&self.title)
    }

    pub fn section(&self) -> &str {
        text_or_undefined(&self.section)
    }

    pub fn category(&self) -> &str {
        text_or_undefined(&self.category)
    }

    pub fn content(&self) -> &str {
        text_or_undefined(&self.content)
    }

    pub fn status(&self) -> &str {
        text_or_undefined(&self.status)
    }

    pub fn permalink(&self) -> &str {
        text_or_undefined(&self.permalink)
    }

    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("title", &self.title),
            ("section", &self.section),
            ("category", &self.category),
            ("content", &self.content),
            ("status", &self.status),
            ("permalink", &self.permalink),
        ]
        .into_iter()
        .filter(|(_, v)| v.is_none())
        .map(|(name, _)| name)
        .collect()
    }
}

fn text_or_undefined(v: &Option<String>) -> &str {
    v.as_deref().unwrap_or(UNDEFINED_FIELD)
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// Current values of the card filter controls. Empty strings mean "unset".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub search_term: String,
    pub status: String,
    pub category: String,
    pub data_type: String,
}

/// Text a card exposes to the filter: title, category label and badge.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct CardElement {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, alias = "category_label")]
    pub category: Option<String>,
    #[serde(default)]
    pub badge: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SelectKind {
    Status,
    Category,
    DataType,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct FilterSection {
    #[serde(default)]
    pub search_input: bool,
    #[serde(default)]
    pub selects: Vec<SelectKind>,
    /// Grid containers in document order; `null` is a container without a card.
    #[serde(default)]
    pub cards: Vec<Option<CardElement>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RoleButton {
    pub role: String,
    /// Marks the "all roles" button that is activated on load.
    #[serde(default)]
    pub default: bool,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct RoleRow {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub condition: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RolesSection {
    #[serde(default)]
    pub buttons: Vec<RoleButton>,
    #[serde(default)]
    pub attributes: Vec<RoleRow>,
    #[serde(default)]
    pub actions: Vec<RoleRow>,
}

/// The elements a page exposes to the widgets.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct PageSnapshot {
    #[serde(default)]
    pub search_mounts: Vec<Placement>,
    #[serde(default)]
    pub filter: Option<FilterSection>,
    #[serde(default)]
    pub roles: Option<RolesSection>,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Shown,
    Hidden,
    /// Container without a card; left as it was.
    Skipped,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PanelChange {
    Inserted,
    Shown,
    Hidden,
    Unchanged,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PanelState {
    Shown,
    Hidden,
}

#[derive(Serialize, Clone, Debug)]
pub struct SearchHit {
    pub title: String,
    pub section: String,
    pub category: String,
    pub icon: String,
    pub excerpt: String,
    pub permalink: String,
}

#[derive(Serialize, Clone, Debug)]
pub struct SearchReport {
    pub query: String,
    pub placement: Placement,
    pub panel: PanelState,
    pub degraded: bool,
    pub results: Vec<SearchHit>,
}

#[derive(Serialize, Clone, Debug)]
pub struct CardReport {
    pub position: usize,
    pub title: String,
    pub visibility: Visibility,
}

#[derive(Serialize, Clone, Debug)]
pub struct FilterReport {
    pub total: usize,
    pub visible_count: usize,
    pub cards: Vec<CardReport>,
    pub no_results_panel: PanelChange,
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    Attribute,
    Action,
}

#[derive(Serialize, Clone, Debug)]
pub struct RowReport {
    pub kind: RowKind,
    pub name: String,
    pub visible: bool,
}

#[derive(Serialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RoleCounters {
    pub attributes_visible: usize,
    pub attributes_total: usize,
    pub actions_visible: usize,
    pub actions_total: usize,
}

#[derive(Serialize, Clone, Debug)]
pub struct RoleReport {
    pub active_role: String,
    pub attributes_info: String,
    pub actions_info: String,
    pub counters: RoleCounters,
    pub rows: Vec<RowReport>,
}

#[derive(Serialize, Clone, Debug)]
pub struct MissingFields {
    pub position: usize,
    pub fields: Vec<&'static str>,
}

#[derive(Serialize, Clone, Debug)]
pub struct ValidateReport {
    pub source: String,
    pub entries: usize,
    pub missing_fields: Vec<MissingFields>,
    pub duplicate_permalinks: Vec<String>,
}

/// One line of `session` output.
#[derive(Serialize, Clone, Debug)]
#[serde(tag = "widget", rename_all = "snake_case")]
pub enum SessionUpdate {
    Filter(FilterReport),
    Roles(RoleReport),
    Search(SearchReport),
    PanelClosed { placement: Placement },
}
