use crate::cli::Placement;
use crate::domain::constants::{lookup, CATEGORY_ICONS, DEFAULT_CATEGORY_ICON};
use crate::domain::models::{IndexEntry, PanelState, SearchHit, SearchReport};
use crate::services::render::ResultRenderer;
use crate::services::settings::SearchSettings;

/// Lifecycle of the index behind the search widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexState {
    Uninitialized,
    IndexLoaded,
    Ready,
}

/// Immutable entries plus the lowercased text each one is matched against.
#[derive(Debug)]
pub struct SearchIndex {
    state: IndexState,
    degraded: bool,
    entries: Vec<IndexEntry>,
    haystacks: Vec<String>,
}

impl Default for SearchIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchIndex {
    pub fn new() -> Self {
        Self {
            state: IndexState::Uninitialized,
            degraded: false,
            entries: Vec::new(),
            haystacks: Vec::new(),
        }
    }

    /// Builds a ready index from a load result. A failed load is logged and
    /// leaves an empty, degraded index so every query returns nothing.
    pub fn from_load(result: anyhow::Result<Vec<IndexEntry>>) -> Self {
        let mut index = Self::new();
        match result {
            Ok(entries) => index.load(entries),
            Err(e) => {
                tracing::error!(error = %e, "error loading search index");
                index.degraded = true;
            }
        }
        index.prepare();
        index
    }

    pub fn load(&mut self, entries: Vec<IndexEntry>) {
        tracing::debug!(entries = entries.len(), "search index loaded");
        self.entries = entries;
        self.state = IndexState::IndexLoaded;
    }

    pub fn prepare(&mut self) {
        self.haystacks = self.entries.iter().map(haystack).collect();
        self.state = IndexState::Ready;
    }

    pub fn state(&self) -> IndexState {
        self.state
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First `limit` entries, in index order, whose joined fields contain the
    /// trimmed query case-insensitively. `None` for a blank query.
    pub fn search(&self, query: &str, limit: usize) -> Option<Vec<&IndexEntry>> {
        let q = query.trim();
        if q.is_empty() {
            return None;
        }
        if self.state != IndexState::Ready {
            return Some(Vec::new());
        }
        let needle = q.to_lowercase();
        Some(
            self.entries
                .iter()
                .zip(&self.haystacks)
                .filter(|(_, hay)| hay.contains(&needle))
                .map(|(entry, _)| entry)
                .take(limit)
                .collect(),
        )
    }
}

fn haystack(entry: &IndexEntry) -> String {
    [
        entry.title(),
        entry.section(),
        entry.category(),
        entry.content(),
        entry.status(),
    ]
    .join(" ")
    .to_lowercase()
}

pub fn category_icon(category: &str) -> &'static str {
    lookup(CATEGORY_ICONS, category).unwrap_or(DEFAULT_CATEGORY_ICON)
}

pub fn excerpt(content: &str, max_chars: usize) -> String {
    let mut out: String = content.chars().take(max_chars).collect();
    out.push_str("...");
    out
}

pub fn to_hit(entry: &IndexEntry, excerpt_chars: usize) -> SearchHit {
    SearchHit {
        title: entry.title().to_string(),
        section: entry.section().to_string(),
        category: entry.category().to_string(),
        icon: category_icon(entry.category()).to_string(),
        excerpt: excerpt(entry.content(), excerpt_chars),
        permalink: entry.permalink().to_string(),
    }
}

/// Where a document click landed relative to the navbar search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Inside,
    Outside,
}

/// One mount point (home page list or navbar dropdown).
pub struct SearchWidget {
    placement: Placement,
    settings: SearchSettings,
    panel: PanelState,
    markup: String,
}

impl SearchWidget {
    pub fn new(placement: Placement, settings: SearchSettings) -> Self {
        Self {
            placement,
            settings,
            panel: PanelState::Hidden,
            markup: String::new(),
        }
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn panel(&self) -> PanelState {
        self.panel
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    fn excerpt_chars(&self) -> usize {
        match self.placement {
            Placement::Page => self.settings.page_excerpt,
            Placement::Navbar => self.settings.navbar_excerpt,
        }
    }

    pub fn perform(
        &mut self,
        index: &SearchIndex,
        query: &str,
        renderer: &dyn ResultRenderer,
    ) -> SearchReport {
        let results: Vec<SearchHit> = match index.search(query, self.settings.max_results) {
            None => {
                self.panel = PanelState::Hidden;
                self.markup.clear();
                Vec::new()
            }
            Some(found) => {
                let hits: Vec<SearchHit> = found
                    .into_iter()
                    .map(|e| to_hit(e, self.excerpt_chars()))
                    .collect();
                self.markup = renderer.render(self.placement, &hits);
                self.panel = PanelState::Shown;
                hits
            }
        };
        SearchReport {
            query: query.to_string(),
            placement: self.placement,
            panel: self.panel,
            degraded: index.is_degraded(),
            results,
        }
    }

    /// Closes the navbar panel on clicks outside the input/results region.
    /// Returns true when the panel was open and got closed.
    pub fn on_document_click(&mut self, target: ClickTarget) -> bool {
        if self.placement != Placement::Navbar || target == ClickTarget::Inside {
            return false;
        }
        let was_open = self.panel == PanelState::Shown;
        self.panel = PanelState::Hidden;
        was_open
    }
}
