pub mod detail;
pub mod summary;

use crate::store::StrategyStore;
use crate::types::{Strategy, Year};

pub use detail::{
    detail_view, is_non_negative, latest_detail, month_table, parse_leading_number, CumulativePanel, DetailView,
    InvalidYearError, MonthRow, MonthTable, YearTab,
};
pub use summary::{render_summaries, summary_card, Pagination, SummaryCard, YearRow, PAGE_SIZE};

// ─── Event contract ───

/// UI actions, one per named state transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewEvent {
    LoadMore,
    Open(String),
    SelectYear(Year),
    Close,
}

/// What the rendering layer has to redraw after an event.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewUpdate {
    Summaries(Vec<SummaryCard>),
    Detail(DetailView),
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    UnknownStrategy(String),
    NothingOpen,
    InvalidYear(InvalidYearError),
}

impl std::fmt::Display for ViewError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewError::UnknownStrategy(id) => write!(f, "unknown strategy {}", id),
            ViewError::NothingOpen => write!(f, "no strategy is open"),
            ViewError::InvalidYear(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ViewError {}

impl From<InvalidYearError> for ViewError {
    fn from(err: InvalidYearError) -> Self {
        ViewError::InvalidYear(err)
    }
}

// ─── View model ───

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenDetail {
    pub strategy_id: String,
    /// None only when the open strategy has no performance years.
    pub selected_year: Option<Year>,
}

/// Transient page state: pagination cursor plus the open modal, if any.
/// Owned by the page controller; the strategy collection is passed in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PortfolioView {
    pagination: Pagination,
    open: Option<OpenDetail>,
}

impl PortfolioView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visible_count(&self) -> usize {
        self.pagination.visible_count()
    }

    pub fn has_more(&self, total: usize) -> bool {
        self.pagination.has_more(total)
    }

    pub fn summaries(&self, strategies: &[Strategy]) -> Vec<SummaryCard> {
        render_summaries(strategies, self.visible_count())
    }

    pub fn load_more(&mut self) {
        self.pagination.load_more();
    }

    pub fn open_strategy_id(&self) -> Option<&str> {
        self.open.as_ref().map(|o| o.strategy_id.as_str())
    }

    pub fn selected_year(&self) -> Option<Year> {
        self.open.as_ref().and_then(|o| o.selected_year)
    }

    /// Opens `strategy` on its most recent year, discarding any earlier selection.
    pub fn open(&mut self, strategy: &Strategy) -> DetailView {
        let view = latest_detail(strategy);
        self.open = Some(OpenDetail {
            strategy_id: strategy.id.clone(),
            selected_year: view.selected_year,
        });
        view
    }

    /// Selects `year` of `strategy`. On error the view state is untouched.
    pub fn select_year(
        &mut self,
        strategy: &Strategy,
        year: Year,
    ) -> Result<MonthTable, InvalidYearError> {
        let table = month_table(strategy, year)?;
        self.open = Some(OpenDetail {
            strategy_id: strategy.id.clone(),
            selected_year: Some(year),
        });
        Ok(table)
    }

    pub fn close(&mut self) {
        self.open = None;
    }

    /// Derived modal content for the current state, if a known strategy is open.
    pub fn detail(&self, store: &StrategyStore) -> Option<DetailView> {
        let open = self.open.as_ref()?;
        let strategy = store.get(&open.strategy_id)?;
        detail_view(strategy, open.selected_year).ok()
    }

    /// Applies one UI event and returns what needs redrawing.
    pub fn apply(&mut self, store: &StrategyStore, event: ViewEvent) -> Result<ViewUpdate, ViewError> {
        match event {
            ViewEvent::LoadMore => {
                if self.has_more(store.len()) {
                    self.load_more();
                }
                Ok(ViewUpdate::Summaries(self.summaries(store.all())))
            }
            ViewEvent::Open(id) => {
                let strategy = store.get(&id).ok_or(ViewError::UnknownStrategy(id))?;
                Ok(ViewUpdate::Detail(self.open(strategy)))
            }
            ViewEvent::SelectYear(year) => {
                let id = self.open_strategy_id().ok_or(ViewError::NothingOpen)?.to_string();
                let strategy = store.get(&id).ok_or(ViewError::UnknownStrategy(id))?;
                self.select_year(strategy, year)?;
                Ok(ViewUpdate::Detail(detail_view(strategy, Some(year))?))
            }
            ViewEvent::Close => {
                self.close();
                Ok(ViewUpdate::Closed)
            }
        }
    }
}
