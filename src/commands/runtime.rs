use crate::*;
use std::collections::HashSet;

pub fn handle_runtime_commands(cli: &Cli, settings: &Settings) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Search {
            query,
            placement,
            html,
        } => {
            let index = SearchIndex::from_load(site::load_index(
                &settings.index.base_url,
                settings.index.timeout_ms,
            ));
            let mut widget = SearchWidget::new(*placement, settings.search);
            let renderer: &dyn ResultRenderer = if *html { &HtmlRenderer } else { &TextRenderer };
            let report = widget.perform(&index, query, renderer);
            print_one(cli.json, report, |_| widget.markup().trim_end().to_string())?;
        }
        Commands::Filter {
            page,
            search,
            status,
            category,
            data_type,
            html,
        } => {
            let snapshot = load_page(page)?;
            let mut filter = CardFilter::mount(snapshot.filter.as_ref())
                .ok_or(SiteError::WidgetMissing("card filter (search input and cards)"))?;
            if let Some(term) = search {
                filter.set_search_input(term);
            }
            for (kind, value) in [
                (SelectKind::Status, status),
                (SelectKind::Category, category),
                (SelectKind::DataType, data_type),
            ] {
                if let Some(v) = value {
                    filter.select(kind, v);
                }
            }
            let report = filter.apply();
            print_one(cli.json, &report, |r| {
                let mut lines: Vec<String> = r
                    .cards
                    .iter()
                    .map(|c| format!("{}\t{:?}\t{}", c.position, c.visibility, c.title))
                    .collect();
                lines.push(format!("visible: {}/{}", r.visible_count, r.total));
                lines.join("\n")
            })?;
            if *html && !cli.json && filter.panel().is_visible() {
                print!("{}", no_results_panel());
            }
        }
        Commands::Roles { page, role } => {
            let snapshot = load_page(page)?;
            let (mut sim, initial) = RoleSimulator::mount(snapshot.roles.as_ref())
                .ok_or(SiteError::WidgetMissing("role buttons"))?;
            let report = match role {
                Some(r) => sim.select(r)?,
                None => initial,
            };
            print_one(cli.json, report, |r| {
                let mut lines = vec![
                    format!("role: {}", r.active_role),
                    r.attributes_info.clone(),
                    r.actions_info.clone(),
                ];
                for row in &r.rows {
                    lines.push(format!(
                        "{:?}\t{}\t{}",
                        row.kind,
                        row.name,
                        if row.visible { "shown" } else { "hidden" }
                    ));
                }
                lines.join("\n")
            })?;
        }
        Commands::Validate => {
            let source = &settings.index.base_url;
            let entries = site::load_index(source, settings.index.timeout_ms)?;
            let report = validate_index(site::describe_source(source), &entries);
            print_one(cli.json, report, |r| {
                format!(
                    "index valid: {} entries, {} with missing fields, {} duplicate permalinks",
                    r.entries,
                    r.missing_fields.len(),
                    r.duplicate_permalinks.len()
                )
            })?;
        }
        Commands::Session { .. } => unreachable!("handled before runtime commands"),
    }

    Ok(())
}

pub fn validate_index(source: String, entries: &[IndexEntry]) -> ValidateReport {
    let missing_fields = entries
        .iter()
        .enumerate()
        .filter_map(|(position, e)| {
            let fields = e.missing_fields();
            if fields.is_empty() {
                None
            } else {
                Some(MissingFields { position, fields })
            }
        })
        .collect();

    let mut seen = HashSet::new();
    let mut duplicate_permalinks = Vec::new();
    for e in entries {
        if let Some(p) = &e.permalink {
            if !seen.insert(p.as_str()) && !duplicate_permalinks.contains(p) {
                duplicate_permalinks.push(p.clone());
            }
        }
    }

    ValidateReport {
        source,
        entries: entries.len(),
        missing_fields,
        duplicate_permalinks,
    }
}
