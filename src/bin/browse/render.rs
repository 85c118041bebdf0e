use ratatui::prelude::*;
use ratatui::widgets::*;

use strategy_showcase::view::DetailView;

use crate::app::{App, SECTIONS};

// ─── Colors & style helpers ───

const BORDER: Style = Style::new().fg(Color::DarkGray);
const ACCENT: Color = Color::Cyan;

fn return_color(is_positive: bool) -> Color {
    if is_positive { Color::White } else { Color::LightRed }
}

/// Rect of `pct_x`% x `pct_y`% centered in `area`.
fn centered(area: Rect, pct_x: u16, pct_y: u16) -> Rect {
    let width = area.width * pct_x / 100;
    let height = area.height * pct_y / 100;
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

// ─── Main draw ───

pub fn draw(app: &App, frame: &mut Frame) {
    let [header_area, body_area, nav_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(5),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    render_header(app, header_area, frame.buffer_mut());
    render_body(app, body_area, frame);
    render_nav(app, nav_area, frame.buffer_mut());
    render_footer(app, footer_area, frame.buffer_mut());

    if let Some(detail) = &app.detail {
        render_detail(detail, centered(frame.area(), 80, 80), frame);
    }
    if app.gate.is_visible() {
        render_gate(centered(frame.area(), 60, 40), frame);
    }
}

/// Body height for a full frame of `height` rows: everything but header, nav and footer.
pub fn body_height(height: u16) -> usize {
    height.saturating_sub(3) as usize
}

// ─── Header / footer ───

fn render_header(app: &App, area: Rect, buf: &mut Buffer) {
    let count = match &app.loaded {
        Ok(_) => format!("{} of {} strategies", app.cards().len(), app.total()),
        Err(_) => "load failed".to_string(),
    };
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", app.config.site_title),
            Style::new().fg(Color::Black).bg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(count, BORDER),
    ]);
    Paragraph::new(line).render(area, buf);
}

fn render_footer(app: &App, area: Rect, buf: &mut Buffer) {
    let line = match &app.status_msg {
        Some((msg, _)) => Line::from(Span::styled(format!(" {}", msg), Style::new().fg(Color::Yellow))),
        None if app.gate.is_visible() => Line::from(Span::styled(
            " [a] accept  [r] reject  [Esc] close",
            BORDER,
        )),
        None if app.detail.is_some() => Line::from(Span::styled(
            " [←/h] newer  [→/l] older  [Esc] close  [q] quit",
            BORDER,
        )),
        None => Line::from(Span::styled(
            " [↑↓/jk] select  [PgUp/PgDn] scroll  [Enter] details  [m] more  [1-3] jump  [q] quit",
            BORDER,
        )),
    };
    Paragraph::new(line).render(area, buf);
}

// ─── Document & nav ───

fn render_body(app: &App, area: Rect, frame: &mut Frame) {
    let doc = app.document();
    let scroll = app.scroll.min(u16::MAX as usize) as u16;
    let body = Paragraph::new(Text::from(doc.lines)).scroll((scroll, 0));
    frame.render_widget(body, area);
}

fn render_nav(app: &App, area: Rect, buf: &mut Buffer) {
    let active = app.active_section();
    let mut spans = Vec::with_capacity(SECTIONS.len() * 2);
    for (i, (id, label)) in SECTIONS.iter().enumerate() {
        let style = if active.as_deref() == Some(*id) {
            Style::new().fg(Color::Black).bg(ACCENT).add_modifier(Modifier::BOLD)
        } else {
            BORDER
        };
        spans.push(Span::styled(format!(" {} {} ", i + 1, label), style));
        spans.push(Span::raw(" "));
    }
    Paragraph::new(Line::from(spans)).alignment(Alignment::Center).render(area, buf);
}

// ─── Detail popup ───

fn render_detail(detail: &DetailView, area: Rect, frame: &mut Frame) {
    frame.render_widget(Clear, area);
    let block = Block::bordered()
        .title(format!(" {} ", detail.title))
        .border_style(Style::new().fg(ACCENT));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [tabs_area, cum_area, table_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(2),
        Constraint::Min(3),
    ])
    .areas(inner);

    let mut tabs = Vec::with_capacity(detail.tabs.len() * 2);
    for tab in &detail.tabs {
        let style = if tab.active {
            Style::new().fg(Color::White).bg(ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::new().fg(Color::Gray)
        };
        tabs.push(Span::styled(format!(" {} ", tab.label), style));
        tabs.push(Span::raw(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(tabs)), tabs_area);

    let cumulative = match &detail.cumulative {
        Some(cum) => Line::from(vec![
            Span::raw(format!("{}  ", cum.label)),
            Span::styled(cum.ytd.clone(), Style::new().fg(Color::White).add_modifier(Modifier::BOLD)),
            Span::styled(format!("  ({}: {})", detail.benchmark_name, cum.benchmark_ytd), BORDER),
        ]),
        None => Line::from(Span::styled("No performance recorded", BORDER)),
    };
    frame.render_widget(Paragraph::new(cumulative), cum_area);

    let rows: Vec<Row> = detail
        .table
        .as_ref()
        .map(|t| t.rows.as_slice())
        .unwrap_or(&[])
        .iter()
        .map(|m| {
            Row::new(vec![
                Cell::from(m.month.clone()),
                Cell::from(m.ret.clone()).style(Style::new().fg(return_color(m.is_positive))),
                Cell::from(m.holdings_excel.clone().unwrap_or_default()).style(BORDER),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [Constraint::Length(12), Constraint::Length(10), Constraint::Min(10)],
    )
    .header(Row::new(vec!["Month", "Return", "Holdings"]).style(Style::new().add_modifier(Modifier::BOLD)))
    .block(Block::bordered().border_style(BORDER));
    frame.render_widget(table, table_area);
}

// ─── Disclaimer gate ───

fn render_gate(area: Rect, frame: &mut Frame) {
    frame.render_widget(Clear, area);
    let text = Text::from(vec![
        Line::from(Span::styled("Disclaimer", Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from("The information shown is for educational purposes only and is not"),
        Line::from("investment advice. Past performance does not guarantee future returns."),
        Line::from(""),
        Line::from(Span::styled("[a] I agree   [r] Leave   [Esc] Close", Style::new().fg(ACCENT))),
    ]);
    let popup = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(Block::bordered().border_style(Style::new().fg(Color::Yellow)));
    frame.render_widget(popup, area);
}
