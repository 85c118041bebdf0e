use std::time::{Duration, Instant};

use ratatui::prelude::*;

use strategy_showcase::config::Config;
use strategy_showcase::page::LOAD_ERROR_MESSAGE;
use strategy_showcase::store::{LoadError, StrategyStore};
use strategy_showcase::view::{DetailView, PortfolioView, SummaryCard, ViewEvent, ViewUpdate};
use strategy_showcase::widgets::disclaimer::DisclaimerGate;
use strategy_showcase::widgets::nav::{self, SectionBounds};

// ─── Constants ───

/// Lines below the top of the viewport at which a section counts as reached.
pub const NAV_DETECT_LINES: i64 = 2;

/// Lines left above a section after jumping to it.
pub const NAV_JUMP_LINES: i64 = 1;

pub const STATUS_TTL: Duration = Duration::from_secs(5);

const MUTED: Style = Style::new().fg(Color::DarkGray);

/// Section ids and the labels the nav bar shows for them, in document order.
pub const SECTIONS: [(&str, &str); 3] = [
    ("overview", "Overview"),
    ("portfolio", "Portfolio"),
    ("disclosures", "Disclosures"),
];

/// Scrollable main document plus the geometry the key handlers need.
pub struct Document {
    pub lines: Vec<Line<'static>>,
    pub sections: Vec<SectionBounds>,
    /// First line of each visible card.
    pub card_tops: Vec<usize>,
    pub card_heights: Vec<usize>,
}

pub struct App {
    pub config: Config,
    pub loaded: Result<StrategyStore, LoadError>,
    pub view: PortfolioView,
    /// Open detail popup, mirrors `view.open_strategy_id()`.
    pub detail: Option<DetailView>,
    /// Selected card among the visible ones.
    pub cursor: usize,
    pub scroll: usize,
    /// Body height in lines, refreshed every frame.
    pub viewport: usize,
    pub gate: DisclaimerGate,
    pub started: Instant,
    pub status_msg: Option<(String, Instant)>,
}

impl App {
    pub fn new(config: Config, loaded: Result<StrategyStore, LoadError>) -> Self {
        let gate = DisclaimerGate::from_flag(
            &config.disclaimer_flag_path,
            Duration::from_millis(config.disclaimer_delay_ms),
            config.disclaimer_exit_url.clone(),
        );
        Self {
            config,
            loaded,
            view: PortfolioView::new(),
            detail: None,
            cursor: 0,
            scroll: 0,
            viewport: 20,
            gate,
            started: Instant::now(),
            status_msg: None,
        }
    }

    pub fn total(&self) -> usize {
        self.loaded.as_ref().map(|s| s.len()).unwrap_or(0)
    }

    pub fn cards(&self) -> Vec<SummaryCard> {
        match &self.loaded {
            Ok(store) => self.view.summaries(store.all()),
            Err(_) => Vec::new(),
        }
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_msg = Some((msg.into(), Instant::now()));
    }

    /// Called every loop tick: reveals the gate, expires the status line.
    pub fn tick(&mut self) {
        self.gate.on_tick(self.started.elapsed());
        if let Some((_, at)) = &self.status_msg {
            if at.elapsed() >= STATUS_TTL {
                self.status_msg = None;
            }
        }
    }

    // ─── Document layout ───

    pub fn document(&self) -> Document {
        let mut lines: Vec<Line<'static>> = Vec::new();
        let mut sections = Vec::with_capacity(SECTIONS.len());
        let mut card_tops = Vec::new();
        let mut card_heights = Vec::new();

        // Overview
        let top = lines.len();
        lines.push(Line::from(Span::styled(
            self.config.site_title.clone(),
            Style::new().fg(Color::White).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Data: {}", self.config.data_source.label()),
            MUTED,
        )));
        lines.push(Line::from(match &self.loaded {
            Ok(store) => format!("{} strategies", store.len()),
            Err(_) => "No strategies loaded".to_string(),
        }));
        lines.push(Line::from(""));
        push_section(&mut sections, "overview", top, lines.len());

        // Portfolio
        let top = lines.len();
        lines.push(Line::from(Span::styled(
            "Strategies",
            Style::new().fg(Color::White).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
        match &self.loaded {
            Err(e) => {
                lines.push(Line::from(Span::styled(LOAD_ERROR_MESSAGE, Style::new().fg(Color::Red))));
                lines.push(Line::from(Span::styled(e.to_string(), MUTED)));
                lines.push(Line::from(""));
            }
            Ok(store) => {
                let cards = self.view.summaries(store.all());
                if cards.is_empty() {
                    lines.push(Line::from(Span::styled("No strategies.", MUTED)));
                }
                for (i, card) in cards.iter().enumerate() {
                    let start = lines.len();
                    card_tops.push(start);
                    self.card_lines(card, i == self.cursor, &mut lines);
                    card_heights.push(lines.len() - start);
                }
                if self.view.has_more(store.len()) {
                    lines.push(Line::from(Span::styled(
                        format!("[m] Load more ({} of {} shown)", cards.len(), store.len()),
                        Style::new().fg(Color::Cyan),
                    )));
                } else {
                    lines.push(Line::from(Span::styled(
                        format!("All {} strategies shown", store.len()),
                        MUTED,
                    )));
                }
                lines.push(Line::from(""));
            }
        }
        push_section(&mut sections, "portfolio", top, lines.len());

        // Disclosures
        let top = lines.len();
        lines.push(Line::from(Span::styled(
            "Disclosures",
            Style::new().fg(Color::White).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Past performance is not indicative of future results.",
            MUTED,
        )));
        lines.push(Line::from(Span::styled(
            "Returns are shown as reported and are not audited.",
            MUTED,
        )));
        lines.push(Line::from(""));
        push_section(&mut sections, "disclosures", top, lines.len());

        Document { lines, sections, card_tops, card_heights }
    }

    fn card_lines(&self, card: &SummaryCard, selected: bool, lines: &mut Vec<Line<'static>>) {
        let color = card.theme.term_color();
        let marker = if selected { "▶ " } else { "  " };
        let name_style = if selected {
            Style::new().fg(color).add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::new().fg(color).add_modifier(Modifier::BOLD)
        };
        lines.push(Line::from(vec![
            Span::styled(marker, Style::new().fg(color)),
            Span::styled(card.name.clone(), name_style),
            Span::raw("  "),
            Span::styled(format!("[{}]", card.category), Style::new().fg(color)),
        ]));
        lines.push(Line::from(Span::styled(format!("    {}", card.description), MUTED)));
        for row in &card.rows {
            lines.push(Line::from(vec![
                Span::raw(format!("    {:<10}", row.label)),
                Span::styled(
                    format!("{:>8}", row.ytd),
                    Style::new().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("  ({}: {})", card.benchmark_name, row.benchmark_ytd), MUTED),
            ]));
        }
        let mut links = vec![Span::styled("    [Enter] Monthly details", Style::new().fg(Color::Cyan))];
        if let Some(file) = &card.holdings_file {
            links.push(Span::styled(
                format!("   Holdings ({}): {}", self.config.holdings_label, self.config.holdings_href(file)),
                MUTED,
            ));
        }
        lines.push(Line::from(links));
        lines.push(Line::from(""));
    }

    // ─── Scrolling & navigation ───

    pub fn active_section(&self) -> Option<String> {
        let doc = self.document();
        nav::active_section_with(self.scroll as i64, NAV_DETECT_LINES, &doc.sections).map(str::to_string)
    }

    fn max_scroll(&self, doc: &Document) -> usize {
        doc.lines.len().saturating_sub(self.viewport)
    }

    pub fn scroll_by(&mut self, delta: isize) {
        let doc = self.document();
        let next = (self.scroll as isize + delta).max(0) as usize;
        self.scroll = next.min(self.max_scroll(&doc));
    }

    pub fn jump_to(&mut self, section_id: &str) {
        let doc = self.document();
        if let Some(section) = doc.sections.iter().find(|s| s.id == section_id) {
            let target = nav::scroll_target_with(section, NAV_JUMP_LINES) as usize;
            self.scroll = target.min(self.max_scroll(&doc));
        }
    }

    /// Move the card cursor and keep the selected card on screen.
    pub fn move_cursor(&mut self, delta: isize) {
        let doc = self.document();
        if doc.card_tops.is_empty() {
            return;
        }
        let last = doc.card_tops.len() as isize - 1;
        self.cursor = (self.cursor as isize + delta).clamp(0, last) as usize;

        let top = doc.card_tops[self.cursor];
        let bottom = top + doc.card_heights[self.cursor];
        if top < self.scroll {
            self.scroll = top;
        } else if bottom > self.scroll + self.viewport {
            self.scroll = bottom.saturating_sub(self.viewport).min(top);
        }
    }

    // ─── View events ───

    pub fn load_more(&mut self) {
        let store = match &self.loaded {
            Ok(store) => store,
            Err(_) => return,
        };
        if !self.view.has_more(store.len()) {
            self.set_status(format!("All {} strategies shown", store.len()));
            return;
        }
        let msg = match self.view.apply(store, ViewEvent::LoadMore) {
            Ok(ViewUpdate::Summaries(cards)) => format!("Showing {} of {}", cards.len(), store.len()),
            Ok(_) => return,
            Err(e) => format!("Load more failed: {}", e),
        };
        self.set_status(msg);
    }

    pub fn open_selected(&mut self) {
        let store = match &self.loaded {
            Ok(store) => store,
            Err(_) => return,
        };
        let id = match self.view.summaries(store.all()).get(self.cursor) {
            Some(card) => card.id.clone(),
            None => return,
        };
        match self.view.apply(store, ViewEvent::Open(id)) {
            Ok(ViewUpdate::Detail(d)) => self.detail = Some(d),
            Ok(_) => {}
            Err(e) => self.set_status(format!("Open failed: {}", e)),
        }
    }

    /// Switch the open detail to the year `offset` tabs away. Positive is older.
    pub fn switch_year(&mut self, offset: isize) {
        let store = match &self.loaded {
            Ok(store) => store,
            Err(_) => return,
        };
        let year = match self.detail.as_ref().and_then(|d| d.adjacent_year(offset)) {
            Some(y) => y,
            None => return,
        };
        match self.view.apply(store, ViewEvent::SelectYear(year)) {
            Ok(ViewUpdate::Detail(d)) => self.detail = Some(d),
            Ok(_) => {}
            Err(e) => self.set_status(format!("{}", e)),
        }
    }

    pub fn close_detail(&mut self) {
        self.view.close();
        self.detail = None;
    }
}

fn push_section(sections: &mut Vec<SectionBounds>, id: &str, top: usize, end: usize) {
    sections.push(SectionBounds::new(id, top as i64, (end - top) as i64));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use strategy_showcase::config::DataSource;
    use strategy_showcase::types::Year;

    fn config(flag_dir: &std::path::Path) -> Config {
        Config {
            data_source: DataSource::File(PathBuf::from("data/portfolio-data.json")),
            output_dir: PathBuf::from("site"),
            site_title: "Portfolio Strategies".to_string(),
            downloads_prefix: "downloads/".to_string(),
            holdings_label: "Feb-26".to_string(),
            disclaimer_flag_path: flag_dir.join("disclaimer.json"),
            disclaimer_delay_ms: 0,
            disclaimer_exit_url: "https://google.com".to_string(),
        }
    }

    fn store(n: usize) -> StrategyStore {
        let strategies: Vec<String> = (0..n)
            .map(|i| {
                format!(
                    r#"{{"id": "s{i}", "name": "Strategy {i}", "color": "cyan",
                        "performance": {{
                          "2024": {{"ytd": "+4%", "months": [{{"month": "Jan 24", "return": "+4%"}}]}},
                          "2025": {{"ytd": "-1%", "months": [{{"month": "Jan 25", "return": "-1%"}}]}}
                        }}}}"#
                )
            })
            .collect();
        StrategyStore::from_json(&format!(r#"{{"strategies": [{}]}}"#, strategies.join(","))).unwrap()
    }

    /// Scenario: document for 8 strategies, first page visible
    /// Expected: three contiguous sections covering every line, one card top per visible card
    #[test]
    fn test_document_sections_cover_lines() {
        let dir = tempfile::tempdir().unwrap();
        let app = App::new(config(dir.path()), Ok(store(8)));
        let doc = app.document();

        let ids: Vec<&str> = doc.sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["overview", "portfolio", "disclosures"]);
        let mut expected_top = 0;
        for s in &doc.sections {
            assert_eq!(s.top, expected_top);
            expected_top += s.height;
        }
        assert_eq!(expected_top as usize, doc.lines.len());
        assert_eq!(doc.card_tops.len(), 6);
        // name + description + 2 year rows + links + blank
        assert!(doc.card_heights.iter().all(|&h| h == 6));
    }

    /// Scenario: scroll position at the top, then jump to disclosures
    /// Expected: nav reports overview, then disclosures
    #[test]
    fn test_active_section_follows_scroll() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(config(dir.path()), Ok(store(8)));
        app.viewport = 4;
        assert_eq!(app.active_section().as_deref(), Some("overview"));

        app.jump_to("disclosures");
        assert_eq!(app.active_section().as_deref(), Some("disclosures"));
    }

    /// Scenario: cursor moved past the last card in a short viewport
    /// Expected: clamped at the last visible card, scroll keeps it on screen
    #[test]
    fn test_move_cursor_clamps_and_scrolls() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(config(dir.path()), Ok(store(8)));
        app.viewport = 10;
        app.move_cursor(100);
        assert_eq!(app.cursor, 5);

        let doc = app.document();
        let top = doc.card_tops[5];
        assert!(app.scroll <= top);
        assert!(top + doc.card_heights[5] <= app.scroll + app.viewport);

        app.move_cursor(-100);
        assert_eq!(app.cursor, 0);
        assert!(app.scroll <= doc.card_tops[0]);
    }

    /// Scenario: load more on 8 strategies, twice
    /// Expected: all 8 visible after the first, second only reports completion
    #[test]
    fn test_load_more() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(config(dir.path()), Ok(store(8)));
        app.load_more();
        assert_eq!(app.cards().len(), 8);
        assert_eq!(app.status_msg.as_ref().unwrap().0, "Showing 8 of 8");

        app.load_more();
        assert_eq!(app.view.visible_count(), 12);
        assert_eq!(app.status_msg.as_ref().unwrap().0, "All 8 strategies shown");
    }

    /// Scenario: open the selected card, step to the older year, close
    /// Expected: detail starts on the newest year, switches to 2024, then clears
    #[test]
    fn test_open_switch_close() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(config(dir.path()), Ok(store(2)));
        app.move_cursor(1);
        app.open_selected();
        assert_eq!(app.view.open_strategy_id(), Some("s1"));
        assert_eq!(app.detail.as_ref().unwrap().selected_year, Some(Year(2025)));

        app.switch_year(1);
        assert_eq!(app.detail.as_ref().unwrap().selected_year, Some(Year(2024)));
        // Already on the oldest tab
        app.switch_year(1);
        assert_eq!(app.view.selected_year(), Some(Year(2024)));

        app.close_detail();
        assert!(app.detail.is_none());
        assert_eq!(app.view.open_strategy_id(), None);
    }

    /// Scenario: failed load
    /// Expected: no cards, error text in the portfolio section, open is a no-op
    #[test]
    fn test_failed_load_document() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(config(dir.path()), Err(LoadError::Status(500)));
        let doc = app.document();
        assert!(doc.card_tops.is_empty());
        let text: Vec<String> = doc.lines.iter().map(|l| l.to_string()).collect();
        assert!(text.iter().any(|l| l == LOAD_ERROR_MESSAGE));

        app.open_selected();
        assert!(app.detail.is_none());
    }

    /// Scenario: no stored flag, zero delay
    /// Expected: gate shows on the first tick
    #[test]
    fn test_tick_reveals_gate() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(config(dir.path()), Ok(store(1)));
        assert!(!app.gate.is_visible());
        app.tick();
        assert!(app.gate.is_visible());
    }
}
