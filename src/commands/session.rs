use crate::*;
use std::io::BufRead;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    FilterSearch(String),
    FilterSelect(SelectKind, String),
    FilterReset,
    Role(String),
    Search(Placement, String),
    Click(ClickTarget),
}

/// Parses one stdin line. Blank lines and `#` comments yield `None`.
pub fn parse_event(line: &str) -> anyhow::Result<Option<SessionEvent>> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() || line.trim_start().starts_with('#') {
        return Ok(None);
    }
    let (name, arg) = line.split_once(' ').unwrap_or((line, ""));
    let event = match name {
        "filter.search" => SessionEvent::FilterSearch(arg.to_string()),
        "filter.status" => SessionEvent::FilterSelect(SelectKind::Status, arg.trim().to_string()),
        "filter.category" => {
            SessionEvent::FilterSelect(SelectKind::Category, arg.trim().to_string())
        }
        "filter.type" => SessionEvent::FilterSelect(SelectKind::DataType, arg.trim().to_string()),
        "filter.reset" => SessionEvent::FilterReset,
        "role" => SessionEvent::Role(arg.trim().to_string()),
        "search.page" => SessionEvent::Search(Placement::Page, arg.to_string()),
        "search.navbar" => SessionEvent::Search(Placement::Navbar, arg.to_string()),
        "click" => match arg.trim() {
            "inside" => SessionEvent::Click(ClickTarget::Inside),
            "outside" => SessionEvent::Click(ClickTarget::Outside),
            other => return Err(SiteError::SessionInput(format!("click {}", other)).into()),
        },
        _ => return Err(SiteError::SessionInput(line.to_string()).into()),
    };
    Ok(Some(event))
}

/// Forwards input lines until EOF or a read error. Lines that are not UTF-8
/// are logged and skipped.
fn forward_lines(mut reader: impl BufRead, tx: &Sender<String>) {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(error = %e, "session input read failed");
                break;
            }
        }
        while matches!(buf.last(), Some(b'\n' | b'\r')) {
            buf.pop();
        }
        let line = match String::from_utf8(buf.clone()) {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!(error = %e, "skipping session input that is not UTF-8");
                continue;
            }
        };
        if tx.send(line).is_err() {
            break;
        }
    }
}

fn spawn_stdin_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        forward_lines(stdin.lock(), &tx);
    });
    rx
}

fn session_text(update: &SessionUpdate) -> String {
    match update {
        SessionUpdate::Filter(r) => format!(
            "filter\tvisible {}/{}\tpanel {:?}",
            r.visible_count, r.total, r.no_results_panel
        ),
        SessionUpdate::Roles(r) => format!(
            "roles\t{}\t{}\t{}",
            r.active_role, r.attributes_info, r.actions_info
        ),
        SessionUpdate::Search(r) => format!(
            "search\t{}\t{}\t{} result(s)\t{:?}",
            r.placement.as_str(),
            r.query,
            r.results.len(),
            r.panel
        ),
        SessionUpdate::PanelClosed { placement } => {
            format!("search\t{}\tclosed", placement.as_str())
        }
    }
}

/// Widgets mounted from the page snapshot plus their debounced inputs.
struct Session {
    json: bool,
    filter: Option<CardFilter>,
    filter_pending: Debouncer<()>,
    roles: Option<RoleSimulator>,
    index: Option<SearchIndex>,
    searches: Vec<(SearchWidget, Debouncer<String>)>,
}

impl Session {
    fn mount(json: bool, settings: &Settings, page: &PageSnapshot) -> anyhow::Result<Self> {
        let filter = CardFilter::mount(page.filter.as_ref());

        let roles = match RoleSimulator::mount(page.roles.as_ref()) {
            Some((sim, report)) => {
                print_line(json, SessionUpdate::Roles(report), session_text)?;
                Some(sim)
            }
            None => None,
        };

        let mut searches: Vec<(SearchWidget, Debouncer<String>)> = Vec::new();
        for placement in &page.search_mounts {
            if searches.iter().any(|(w, _)| w.placement() == *placement) {
                continue;
            }
            searches.push((
                SearchWidget::new(*placement, settings.search),
                Debouncer::from_millis(settings.search.debounce_ms),
            ));
        }
        let index = if searches.is_empty() {
            tracing::info!("no search inputs on page; search disabled");
            None
        } else {
            let index = SearchIndex::from_load(site::load_index(
                &settings.index.base_url,
                settings.index.timeout_ms,
            ));
            tracing::info!(entries = index.len(), "search initialized");
            Some(index)
        };

        Ok(Self {
            json,
            filter,
            filter_pending: Debouncer::from_millis(settings.filter.debounce_ms),
            roles,
            index,
            searches,
        })
    }

    fn emit(&self, update: SessionUpdate) -> anyhow::Result<()> {
        print_line(self.json, update, session_text)
    }

    fn next_deadline(&self) -> Option<Instant> {
        earliest(
            std::iter::once(self.filter_pending.deadline())
                .chain(self.searches.iter().map(|(_, d)| d.deadline())),
        )
    }

    fn handle(&mut self, now: Instant, event: SessionEvent) -> anyhow::Result<()> {
        match event {
            SessionEvent::FilterSearch(value) => {
                let Some(filter) = self.filter.as_mut() else {
                    tracing::debug!("card filter not mounted; input ignored");
                    return Ok(());
                };
                filter.set_search_input(&value);
                self.filter_pending.push(now, ());
            }
            SessionEvent::FilterSelect(kind, value) => {
                let Some(filter) = self.filter.as_mut() else {
                    tracing::debug!("card filter not mounted; change ignored");
                    return Ok(());
                };
                if filter.select(kind, &value) {
                    let report = filter.apply();
                    self.emit(SessionUpdate::Filter(report))?;
                }
            }
            SessionEvent::FilterReset => {
                let Some(filter) = self.filter.as_mut() else {
                    tracing::debug!("card filter not mounted; reset ignored");
                    return Ok(());
                };
                let report = filter.reset();
                self.emit(SessionUpdate::Filter(report))?;
            }
            SessionEvent::Role(role) => {
                let Some(sim) = self.roles.as_mut() else {
                    tracing::debug!("role simulator not mounted; click ignored");
                    return Ok(());
                };
                match sim.select(&role) {
                    Ok(report) => self.emit(SessionUpdate::Roles(report))?,
                    Err(e) => tracing::warn!(error = %e, "role click ignored"),
                }
            }
            SessionEvent::Search(placement, query) => {
                match self
                    .searches
                    .iter_mut()
                    .find(|(w, _)| w.placement() == placement)
                {
                    Some((_, pending)) => pending.push(now, query),
                    None => tracing::debug!(
                        placement = placement.as_str(),
                        "search input not on page; input ignored"
                    ),
                }
            }
            SessionEvent::Click(target) => {
                let mut closed = Vec::new();
                for (widget, _) in self.searches.iter_mut() {
                    if widget.on_document_click(target) {
                        closed.push(widget.placement());
                    }
                }
                for placement in closed {
                    self.emit(SessionUpdate::PanelClosed { placement })?;
                }
            }
        }
        Ok(())
    }

    /// Runs every debounced handler whose quiet period has ended.
    fn fire_due(&mut self, now: Instant) -> anyhow::Result<()> {
        if self.filter_pending.poll(now).is_some() {
            if let Some(filter) = self.filter.as_mut() {
                let report = filter.apply();
                self.emit(SessionUpdate::Filter(report))?;
            }
        }

        let mut reports = Vec::new();
        if let Some(index) = &self.index {
            for (widget, pending) in self.searches.iter_mut() {
                if let Some(query) = pending.poll(now) {
                    reports.push(widget.perform(index, &query, &HtmlRenderer));
                }
            }
        }
        for report in reports {
            self.emit(SessionUpdate::Search(report))?;
        }
        Ok(())
    }
}

pub fn handle_session_command(cli: &Cli, settings: &Settings) -> anyhow::Result<bool> {
    let Commands::Session { page } = &cli.command else {
        return Ok(false);
    };

    let snapshot = load_page(page)?;
    let mut session = Session::mount(cli.json, settings, &snapshot)?;
    let rx = spawn_stdin_reader();
    let mut input_open = true;

    loop {
        session.fire_due(Instant::now())?;
        let next = session.next_deadline();

        if !input_open {
            match next {
                Some(at) => {
                    std::thread::sleep(at.saturating_duration_since(Instant::now()));
                    continue;
                }
                None => break,
            }
        }

        let received = match next {
            Some(at) => rx.recv_timeout(at.saturating_duration_since(Instant::now())),
            None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };
        match received {
            Ok(line) => match parse_event(&line) {
                Ok(Some(event)) => session.handle(Instant::now(), event)?,
                Ok(None) => {}
                Err(e) => tracing::warn!(error = %e, "skipping session input"),
            },
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                tracing::debug!("session input closed");
                input_open = false;
            }
        }
    }

    Ok(true)
}
