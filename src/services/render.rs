//! Markup for the search results panel and the card grid's no-results block.
//!
//! Widgets hand plain data to a [`ResultRenderer`]; nothing outside this
//! module builds markup.

use crate::cli::Placement;
use crate::domain::models::SearchHit;

/// Renders a list of hits for one mount point.
pub trait ResultRenderer {
    fn render(&self, placement: Placement, hits: &[SearchHit]) -> String;
}

/// UIkit markup matching the site theme.
pub struct HtmlRenderer;

/// Tab-separated rows for terminals.
pub struct TextRenderer;

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

impl ResultRenderer for HtmlRenderer {
    fn render(&self, placement: Placement, hits: &[SearchHit]) -> String {
        match placement {
            Placement::Page if hits.is_empty() => {
                r#"<li class="uk-text-center uk-text-muted">No results found</li>"#.to_string()
            }
            Placement::Navbar if hits.is_empty() => {
                r#"<div class="uk-text-center uk-text-muted uk-padding-small">No results found</div>"#
                    .to_string()
            }
            Placement::Page => hits.iter().map(page_item).collect(),
            Placement::Navbar => hits.iter().map(navbar_item).collect(),
        }
    }
}

fn page_item(hit: &SearchHit) -> String {
    format!(
        r#"<li style="text-align: left;">
    <div style="margin-bottom: 4px;">
        <strong style="font-size: 1.1em;">{title}</strong>
    </div>
    <div style="margin-bottom: 8px; display: flex; align-items: center; gap: 8px; font-size: 0.9em; color: #6b7280;">
        <span uk-icon="icon: {icon}; ratio: 0.8"></span>
        <span>{category} • {section}</span>
    </div>
    <p style="margin: 0; font-size: 0.95em; color: #374151; line-height: 1.4;">
        {excerpt}
    </p>
    <a href="{permalink}" class="uk-button uk-button-text uk-button-small uk-margin-small-top" style="padding-left: 0;">View Details →</a>
</li>
"#,
        title = escape_html(&hit.title),
        icon = escape_html(&hit.icon),
        category = escape_html(&hit.category),
        section = escape_html(&hit.section),
        excerpt = escape_html(&hit.excerpt),
        permalink = escape_html(&hit.permalink),
    )
}

fn navbar_item(hit: &SearchHit) -> String {
    format!(
        r#"<div style="padding: 12px; border-bottom: 1px solid #e5e5e5;">
    <div style="margin-bottom: 4px;">
        <strong style="font-size: 1.05em; color: #1f2937;">{title}</strong>
    </div>
    <div style="margin-bottom: 6px; display: flex; align-items: center; gap: 8px; font-size: 0.85em; color: #6b7280;">
        <span uk-icon="icon: {icon}; ratio: 0.7"></span>
        <span>{category} • {section}</span>
    </div>
    <p style="margin: 0 0 8px 0; font-size: 0.9em; color: #4b5563; line-height: 1.4;">
        {excerpt}
    </p>
    <a href="{permalink}" class="uk-button uk-button-text uk-button-small" style="padding: 0; font-size: 0.9em;">View Details →</a>
</div>
"#,
        title = escape_html(&hit.title),
        icon = escape_html(&hit.icon),
        category = escape_html(&hit.category),
        section = escape_html(&hit.section),
        excerpt = escape_html(&hit.excerpt),
        permalink = escape_html(&hit.permalink),
    )
}

impl ResultRenderer for TextRenderer {
    fn render(&self, _placement: Placement, hits: &[SearchHit]) -> String {
        if hits.is_empty() {
            return "No results found\n".to_string();
        }
        hits.iter()
            .map(|h| format!("{}\t{}\t{}\t{}\n", h.title, h.category, h.section, h.permalink))
            .collect()
    }
}

pub fn no_results_panel() -> &'static str {
    r#"<div id="no-results-message" class="uk-width-1-1 uk-text-center uk-margin-large-top uk-margin-large-bottom">
    <div style="padding: 60px 20px;">
        <span uk-icon="icon: search; ratio: 3" class="uk-text-muted"></span>
        <h3 class="uk-margin-small-top">No results found</h3>
        <p class="uk-text-muted uk-margin-small-top">Try adjusting your filters or search term</p>
        <button id="reset-filters-btn" class="uk-button uk-button-default uk-margin-top">
            <span uk-icon="icon: refresh"></span> Reset Filters
        </button>
    </div>
</div>
"#
}
