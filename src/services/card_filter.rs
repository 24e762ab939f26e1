use crate::domain::constants::{lookup, CATEGORY_PHRASES, STATUS_LABELS};
use crate::domain::models::{
    CardElement, CardReport, FilterCriteria, FilterReport, FilterSection, PanelChange, SelectKind,
    Visibility,
};

pub struct FilterOutcome {
    pub visibility: Vec<Visibility>,
    pub visible_count: usize,
}

/// Lowercased card text, read once per filter pass.
struct CardText {
    title: String,
    category: String,
    badge: String,
}

impl CardText {
    fn read(card: &CardElement) -> Self {
        Self {
            title: card.title.as_deref().unwrap_or("").to_lowercase(),
            category: card.category.as_deref().unwrap_or("").to_lowercase(),
            badge: card.badge.as_deref().unwrap_or("").to_lowercase().trim().to_string(),
        }
    }
}

pub fn card_matches(card: &CardElement, criteria: &FilterCriteria) -> bool {
    let text = CardText::read(card);

    let term = criteria.search_term.trim().to_lowercase();
    let matches_search =
        term.is_empty() || text.title.contains(&term) || text.category.contains(&term);

    let matches_status = match lookup(STATUS_LABELS, &criteria.status) {
        Some(label) => text.badge == label,
        None => true,
    };

    let matches_category = match lookup(CATEGORY_PHRASES, &criteria.category) {
        Some(phrase) => text.category.contains(phrase),
        None => true,
    };

    let matches_data_type =
        criteria.data_type.is_empty() || text.badge == criteria.data_type.to_lowercase();

    matches_search && matches_status && matches_category && matches_data_type
}

pub fn filter_cards(cards: &[Option<CardElement>], criteria: &FilterCriteria) -> FilterOutcome {
    let mut visible_count = 0;
    let visibility = cards
        .iter()
        .map(|slot| match slot {
            None => Visibility::Skipped,
            Some(card) if card_matches(card, criteria) => {
                visible_count += 1;
                Visibility::Shown
            }
            Some(_) => Visibility::Hidden,
        })
        .collect();
    FilterOutcome {
        visibility,
        visible_count,
    }
}

/// The "no results" block appended to the grid the first time a filter
/// pass leaves nothing visible.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum NoResultsPanel {
    #[default]
    Absent,
    Shown,
    Hidden,
}

impl NoResultsPanel {
    pub fn update(&mut self, visible_count: usize) -> PanelChange {
        let (next, change) = match (*self, visible_count) {
            (NoResultsPanel::Absent, 0) => (NoResultsPanel::Shown, PanelChange::Inserted),
            (_, 0) => (NoResultsPanel::Shown, PanelChange::Shown),
            (NoResultsPanel::Absent, _) => (NoResultsPanel::Absent, PanelChange::Unchanged),
            (_, _) => (NoResultsPanel::Hidden, PanelChange::Hidden),
        };
        *self = next;
        change
    }

    pub fn is_visible(&self) -> bool {
        *self == NoResultsPanel::Shown
    }
}

/// Card grid widget: control values plus the no-results panel state.
pub struct CardFilter {
    cards: Vec<Option<CardElement>>,
    selects: Vec<SelectKind>,
    criteria: FilterCriteria,
    panel: NoResultsPanel,
}

impl CardFilter {
    /// `None` when the page lacks the search input or has no card containers.
    pub fn mount(section: Option<&FilterSection>) -> Option<Self> {
        let section = match section {
            Some(s) if s.search_input && !s.cards.is_empty() => s,
            _ => {
                tracing::info!("card filter elements not found; filter disabled");
                return None;
            }
        };
        tracing::info!(cards = section.cards.len(), "card filter initialized");
        Some(Self {
            cards: section.cards.clone(),
            selects: section.selects.clone(),
            criteria: FilterCriteria::default(),
            panel: NoResultsPanel::default(),
        })
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn panel(&self) -> NoResultsPanel {
        self.panel
    }

    pub fn has_select(&self, kind: SelectKind) -> bool {
        self.selects.contains(&kind)
    }

    /// Stores the search box value. The caller decides when to `apply`.
    pub fn set_search_input(&mut self, value: &str) {
        self.criteria.search_term = value.to_string();
    }

    /// Sets a select value. Returns false when the page has no such select.
    pub fn select(&mut self, kind: SelectKind, value: &str) -> bool {
        if !self.has_select(kind) {
            tracing::debug!(?kind, "select not present on page; change ignored");
            return false;
        }
        let slot = match kind {
            SelectKind::Status => &mut self.criteria.status,
            SelectKind::Category => &mut self.criteria.category,
            SelectKind::DataType => &mut self.criteria.data_type,
        };
        *slot = value.to_string();
        true
    }

    pub fn reset(&mut self) -> FilterReport {
        self.criteria = FilterCriteria::default();
        self.apply()
    }

    pub fn apply(&mut self) -> FilterReport {
        let outcome = filter_cards(&self.cards, &self.criteria);
        let change = self.panel.update(outcome.visible_count);
        let cards = self
            .cards
            .iter()
            .zip(&outcome.visibility)
            .enumerate()
            .map(|(position, (slot, visibility))| CardReport {
                position,
                title: slot
                    .as_ref()
                    .and_then(|c| c.title.clone())
                    .unwrap_or_default(),
                visibility: *visibility,
            })
            .collect();
        FilterReport {
            total: self.cards.iter().filter(|c| c.is_some()).count(),
            visible_count: outcome.visible_count,
            cards,
            no_results_panel: change,
        }
    }
}
