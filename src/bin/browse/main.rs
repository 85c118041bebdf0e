//! Browse TUI: the portfolio page in a terminal.
//! Summary cards with pagination, monthly detail popup, section nav and the disclaimer gate.
//!
//! Usage: cargo run --bin browse
//! Keys: [Up/k Down/j] select | [PgUp/PgDn] scroll | [Enter] details | [m] load more
//!       [Left/h Right/l] year | [1-3] jump to section | [Esc] close | [q] quit

mod app;
mod render;

use std::io::{self, stdout};
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event as CEvent, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use strategy_showcase::config::Config;
use strategy_showcase::store::StrategyStore;
use strategy_showcase::widgets::disclaimer::GateOutcome;

use crate::app::{App, SECTIONS};

/// What the event loop does after a key.
enum Flow {
    Continue,
    Quit,
    /// Disclaimer rejected: leave for this destination.
    Exit(String),
}

// ─── Input handling ───

fn handle_gate_key(app: &mut App, key: KeyEvent) -> Flow {
    match key.code {
        KeyCode::Char('a') => {
            let msg = match app.gate.accept(&app.config.disclaimer_flag_path) {
                Ok(_) => "Disclaimer accepted".to_string(),
                Err(e) => format!("Could not save disclaimer flag: {}", e),
            };
            app.set_status(msg);
        }
        KeyCode::Char('r') => {
            if let GateOutcome::Exit(url) = app.gate.reject() {
                return Flow::Exit(url);
            }
        }
        KeyCode::Esc => {
            app.gate.dismiss();
        }
        _ => {}
    }
    Flow::Continue
}

fn handle_detail_key(app: &mut App, key: KeyEvent) -> Flow {
    match key.code {
        KeyCode::Char('q') => return Flow::Quit,
        KeyCode::Esc => app.close_detail(),
        KeyCode::Left | KeyCode::Char('h') => app.switch_year(-1),
        KeyCode::Right | KeyCode::Char('l') => app.switch_year(1),
        _ => {}
    }
    Flow::Continue
}

fn handle_key(app: &mut App, key: KeyEvent) -> Flow {
    // The gate blocks everything underneath it.
    if app.gate.is_visible() {
        return handle_gate_key(app, key);
    }
    if app.detail.is_some() {
        return handle_detail_key(app, key);
    }

    let page = app.viewport.max(1) as isize;
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return Flow::Quit,
        KeyCode::Down | KeyCode::Char('j') => app.move_cursor(1),
        KeyCode::Up | KeyCode::Char('k') => app.move_cursor(-1),
        KeyCode::PageDown => app.scroll_by(page),
        KeyCode::PageUp => app.scroll_by(-page),
        KeyCode::Char('m') => app.load_more(),
        KeyCode::Enter => app.open_selected(),
        KeyCode::Char(c @ '1'..='3') => {
            let idx = c as usize - '1' as usize;
            app.jump_to(SECTIONS[idx].0);
        }
        _ => {}
    }
    Flow::Continue
}

// ─── Main ───

#[tokio::main]
async fn main() -> io::Result<()> {
    let config = Config::from_env();
    let http = reqwest::Client::new();

    eprintln!("[BROWSE] Loading portfolio from {}...", config.data_source.label());
    let loaded = StrategyStore::load(&http, &config.data_source).await;
    match &loaded {
        Ok(store) => eprintln!("[BROWSE] Loaded {} strategies. Starting TUI...", store.len()),
        Err(e) => eprintln!("[BROWSE] Error loading portfolio data: {}", e),
    }

    let mut app = App::new(config, loaded);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let tick_rate = Duration::from_millis(50);
    let mut last_tick = Instant::now();

    let flow = loop {
        app.viewport = render::body_height(terminal.size()?.height);
        terminal.draw(|frame| render::draw(&app, frame))?;

        let timeout = tick_rate.checked_sub(last_tick.elapsed()).unwrap_or(Duration::ZERO);

        if crossterm::event::poll(timeout)? {
            if let CEvent::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    let flow = handle_key(&mut app, key);
                    if !matches!(flow, Flow::Continue) {
                        break flow;
                    }
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }
    };

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Flow::Exit(url) = flow {
        eprintln!("[GATE] Disclaimer rejected");
        println!("{}", url);
    }

    Ok(())
}
