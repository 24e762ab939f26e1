use crate::domain::constants::ALL_ROLES;
use crate::domain::models::{
    RoleButton, RoleCounters, RoleReport, RoleRow, RolesSection, RowKind, RowReport,
};
use crate::services::condition::Condition;
use crate::site::SiteError;

struct ParsedRow {
    kind: RowKind,
    name: String,
    condition: Condition,
}

impl ParsedRow {
    fn new(kind: RowKind, row: &RoleRow) -> Self {
        Self {
            kind,
            name: row.name.clone(),
            condition: Condition::parse(row.condition.as_deref()),
        }
    }
}

/// Role buttons plus the attribute/action rows they toggle.
pub struct RoleSimulator {
    buttons: Vec<RoleButton>,
    rows: Vec<ParsedRow>,
    active: usize,
}

impl RoleSimulator {
    /// Parses every row condition and activates the default button, else the
    /// `all` button, else the first one. `None` when the page has no role buttons.
    pub fn mount(section: Option<&RolesSection>) -> Option<(Self, RoleReport)> {
        let Some(section) = section.filter(|s| !s.buttons.is_empty()) else {
            tracing::info!("role buttons not found; simulation disabled");
            return None;
        };
        let rows = section
            .attributes
            .iter()
            .map(|r| ParsedRow::new(RowKind::Attribute, r))
            .chain(
                section
                    .actions
                    .iter()
                    .map(|r| ParsedRow::new(RowKind::Action, r)),
            )
            .collect();
        let initial = section
            .buttons
            .iter()
            .position(|b| b.default)
            .or_else(|| section.buttons.iter().position(|b| b.role == ALL_ROLES))
            .unwrap_or(0);
        let mut sim = Self {
            buttons: section.buttons.clone(),
            rows,
            active: initial,
        };
        let report = sim.activate(initial);
        tracing::info!(
            buttons = sim.buttons.len(),
            rows = sim.rows.len(),
            "role-based access simulation initialized"
        );
        Some((sim, report))
    }

    pub fn active_role(&self) -> &str {
        &self.buttons[self.active].role
    }

    pub fn select(&mut self, role: &str) -> anyhow::Result<RoleReport> {
        let idx = self
            .buttons
            .iter()
            .position(|b| b.role == role)
            .ok_or_else(|| SiteError::RoleNotFound(role.to_string()))?;
        Ok(self.activate(idx))
    }

    fn activate(&mut self, idx: usize) -> RoleReport {
        self.active = idx;
        let role = self.buttons[idx].role.clone();
        let show_all = role == ALL_ROLES;

        let rows: Vec<RowReport> = self
            .rows
            .iter()
            .map(|r| RowReport {
                kind: r.kind,
                name: r.name.clone(),
                visible: show_all || r.condition.evaluate_for_role(&role),
            })
            .collect();
        let counters = count_rows(&rows);

        let (attributes_info, actions_info) = if show_all {
            (
                "Showing all attributes (all roles)".to_string(),
                "Showing all actions (all roles)".to_string(),
            )
        } else {
            (
                format!(
                    "Showing {} attribute(s) for role: {}",
                    counters.attributes_visible, role
                ),
                format!(
                    "Showing {} action(s) for role: {}",
                    counters.actions_visible, role
                ),
            )
        };

        RoleReport {
            active_role: role,
            attributes_info,
            actions_info,
            counters,
            rows,
        }
    }
}

fn count_rows(rows: &[RowReport]) -> RoleCounters {
    let mut c = RoleCounters::default();
    for r in rows {
        match r.kind {
            RowKind::Attribute => {
                c.attributes_total += 1;
                if r.visible {
                    c.attributes_visible += 1;
                }
            }
            RowKind::Action => {
                c.actions_total += 1;
                if r.visible {
                    c.actions_visible += 1;
                }
            }
        }
    }
    c
}
