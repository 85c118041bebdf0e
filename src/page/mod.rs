pub mod html;

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::config::Config;
use crate::store::{LoadError, StrategyStore};
use crate::types::{Strategy, Year};
use crate::view::{PortfolioView, SummaryCard, ViewEvent, ViewUpdate, PAGE_SIZE};

pub use html::{escape, render_detail, render_index, LOAD_ERROR_MESSAGE};

/// What the portfolio section shows for one pagination state.
#[derive(Clone, Debug, PartialEq)]
pub enum PortfolioSection {
    /// Load failed: inline message, no cards.
    Failed(String),
    Cards {
        cards: Vec<SummaryCard>,
        /// Next pagination state, present iff more cards remain.
        next_page: Option<String>,
    },
}

impl PortfolioSection {
    pub fn from_state(loaded: &Result<StrategyStore, LoadError>, view: &PortfolioView) -> Self {
        match loaded {
            Err(e) => PortfolioSection::Failed(e.to_string()),
            Ok(store) => PortfolioSection::Cards {
                cards: view.summaries(store.all()),
                next_page: view
                    .has_more(store.len())
                    .then(|| index_file(view.visible_count() + PAGE_SIZE)),
            },
        }
    }

    pub fn cards(&self) -> &[SummaryCard] {
        match self {
            PortfolioSection::Failed(_) => &[],
            PortfolioSection::Cards { cards, .. } => cards,
        }
    }
}

/// File name of the index page showing `visible_count` cards.
pub fn index_file(visible_count: usize) -> String {
    if visible_count <= PAGE_SIZE {
        "index.html".to_string()
    } else {
        format!("strategies-{}.html", visible_count)
    }
}

/// File-name-safe slugs for strategy ids. Every detail file name a slug
/// produces is unique within the site, not just the slug itself.
#[derive(Clone, Debug, Default)]
pub struct SiteLinks {
    slugs: HashMap<String, String>,
}

impl SiteLinks {
    pub fn new(store: &StrategyStore) -> Self {
        let mut slugs = HashMap::with_capacity(store.len());
        let mut taken: HashSet<String> = HashSet::new();
        for s in store.all() {
            let base = slugify(&s.id);
            let mut slug = base.clone();
            let mut n = 2;
            loop {
                let files = detail_files(&slug, s);
                if files.iter().all(|f| !taken.contains(f)) {
                    taken.extend(files);
                    break;
                }
                slug = format!("{}-{}", base, n);
                n += 1;
            }
            slugs.insert(s.id.clone(), slug);
        }
        Self { slugs }
    }

    pub fn detail_href(&self, strategy_id: &str, year: Option<Year>) -> String {
        let slug = self
            .slugs
            .get(strategy_id)
            .cloned()
            .unwrap_or_else(|| slugify(strategy_id));
        detail_file(&slug, year)
    }
}

fn detail_file(slug: &str, year: Option<Year>) -> String {
    match year {
        Some(y) => format!("strategy-{}-{}.html", slug, y),
        None => format!("strategy-{}.html", slug),
    }
}

/// Every detail page `strategy` would be written to under `slug`.
fn detail_files(slug: &str, strategy: &Strategy) -> Vec<String> {
    if strategy.performance.is_empty() {
        vec![detail_file(slug, None)]
    } else {
        strategy.performance.keys().map(|&y| detail_file(slug, Some(y))).collect()
    }
}

fn slugify(id: &str) -> String {
    let slug: String = id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c.to_ascii_lowercase() } else { '-' })
        .collect();
    if slug.is_empty() {
        "strategy".to_string()
    } else {
        slug
    }
}

/// Shared inputs for every page render.
pub struct PageContext<'a> {
    pub config: &'a Config,
    pub links: &'a SiteLinks,
    pub generated_at: DateTime<Utc>,
}

/// Walks the view model through every pagination and detail state and writes
/// one HTML file per state into `out_dir`. Returns the written paths.
pub fn write_site(
    config: &Config,
    loaded: &Result<StrategyStore, LoadError>,
    out_dir: &Path,
    generated_at: DateTime<Utc>,
) -> std::io::Result<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir)?;
    let mut written = Vec::new();

    let links = match loaded {
        Ok(store) => SiteLinks::new(store),
        Err(_) => SiteLinks::default(),
    };
    let ctx = PageContext { config, links: &links, generated_at };

    let mut view = PortfolioView::new();
    let store = match loaded {
        Ok(store) => store,
        Err(e) => {
            eprintln!("[SITE] Load failed ({}), writing error page only", e);
            let section = PortfolioSection::from_state(loaded, &view);
            written.push(write_page(out_dir, &index_file(PAGE_SIZE), &render_index(&ctx, &section))?);
            return Ok(written);
        }
    };

    // Pagination states
    loop {
        let section = PortfolioSection::from_state(loaded, &view);
        let file = index_file(view.visible_count());
        written.push(write_page(out_dir, &file, &render_index(&ctx, &section))?);
        if !view.has_more(store.len()) {
            break;
        }
        view.apply(store, ViewEvent::LoadMore).map_err(to_io)?;
    }

    // Detail states: open each strategy, then visit every other year tab
    for strategy in store.all() {
        let detail = match view.apply(store, ViewEvent::Open(strategy.id.clone())).map_err(to_io)? {
            ViewUpdate::Detail(d) => d,
            _ => continue,
        };
        let file = links.detail_href(&strategy.id, detail.selected_year);
        written.push(write_page(out_dir, &file, &render_detail(&ctx, &detail))?);

        for tab in detail.tabs.iter().filter(|t| !t.active) {
            let update = view.apply(store, ViewEvent::SelectYear(tab.year)).map_err(to_io)?;
            if let ViewUpdate::Detail(d) = update {
                let file = links.detail_href(&strategy.id, Some(tab.year));
                written.push(write_page(out_dir, &file, &render_detail(&ctx, &d))?);
            }
        }
        view.apply(store, ViewEvent::Close).map_err(to_io)?;
    }

    eprintln!("[SITE] Wrote {} pages to {}", written.len(), out_dir.display());
    Ok(written)
}

fn write_page(out_dir: &Path, file: &str, html: &str) -> std::io::Result<PathBuf> {
    let path = out_dir.join(file);
    std::fs::write(&path, html)?;
    Ok(path)
}

fn to_io(e: crate::view::ViewError) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, e)
}
