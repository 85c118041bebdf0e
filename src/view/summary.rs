use crate::theme::Theme;
use crate::types::{Strategy, Year};

/// Cards revealed per "load more" step, and on first render.
pub const PAGE_SIZE: usize = 6;

/// Year rows shown on a summary card.
pub const MAX_SUMMARY_YEARS: usize = 4;

/// One label/value/benchmark triple on a card.
#[derive(Clone, Debug, PartialEq)]
pub struct YearRow {
    pub year: Year,
    /// "CY25 YTD" for the current year, "CY24" otherwise.
    pub label: String,
    pub ytd: String,
    pub benchmark_ytd: String,
    pub is_current: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SummaryCard {
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub theme: Theme,
    pub benchmark_name: String,
    pub holdings_file: Option<String>,
    pub rows: Vec<YearRow>,
}

pub fn summary_card(strategy: &Strategy) -> SummaryCard {
    let current = strategy.current_year();
    let rows = strategy
        .performance
        .iter()
        .rev()
        .take(MAX_SUMMARY_YEARS)
        .map(|(&year, rec)| {
            let is_current = Some(year) == current;
            let label = if is_current {
                format!("{} YTD", year.short_label())
            } else {
                year.short_label()
            };
            YearRow {
                year,
                label,
                ytd: rec.ytd.clone(),
                benchmark_ytd: rec.benchmark_ytd.clone(),
                is_current,
            }
        })
        .collect();

    SummaryCard {
        id: strategy.id.clone(),
        name: strategy.name.clone(),
        category: strategy.category.clone(),
        description: strategy.description.clone(),
        theme: strategy.color,
        benchmark_name: strategy.benchmark_name.clone(),
        holdings_file: strategy.holdings_file.clone(),
        rows,
    }
}

/// Cards for the first `min(visible_count, len)` strategies, in input order.
pub fn render_summaries(strategies: &[Strategy], visible_count: usize) -> Vec<SummaryCard> {
    strategies.iter().take(visible_count).map(summary_card).collect()
}

/// Pagination cursor. Only ever grows within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    visible_count: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new()
    }
}

impl Pagination {
    pub fn new() -> Self {
        Self { visible_count: PAGE_SIZE }
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    /// No clamp: callers stop offering "load more" once `has_more` is false.
    pub fn load_more(&mut self) {
        self.visible_count += PAGE_SIZE;
    }

    /// Whether the "load more" affordance should be shown.
    pub fn has_more(&self, total: usize) -> bool {
        self.visible_count < total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    /// Scenario: 3 strategies rendered with the initial visible count of 6
    /// Expected: exactly 3 cards, same order as input
    #[test]
    fn test_render_fewer_than_page() {
        let store = sample_store();
        let cards = render_summaries(store.all(), PAGE_SIZE);
        let ids: Vec<&str> = cards.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["compounder", "momentum", "income"]);
    }

    /// Scenario: 14 strategies, visible counts 6, 12, 18
    /// Expected: min(visible, len) cards each time, prefix of the input order
    #[test]
    fn test_render_card_count_is_min() {
        let store = make_store(14);
        for (visible, expected) in [(6, 6), (12, 12), (18, 14)] {
            let cards = render_summaries(store.all(), visible);
            assert_eq!(cards.len(), expected, "visible={}", visible);
            for (i, card) in cards.iter().enumerate() {
                assert_eq!(card.id, format!("s{}", i));
            }
        }
    }

    /// Scenario: strategy with five years of history
    /// Expected: four rows, newest first, only the newest labelled YTD
    #[test]
    fn test_card_caps_at_four_years() {
        let store = sample_store();
        let card = summary_card(store.get("income").unwrap());
        let labels: Vec<&str> = card.rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["CY25 YTD", "CY24", "CY23", "CY22"]);
        assert!(card.rows[0].is_current);
        assert!(card.rows[1..].iter().all(|r| !r.is_current));
        assert_eq!(card.rows[0].ytd, "+11%");
        assert_eq!(card.rows[0].benchmark_ytd, "+6%");
    }

    /// Scenario: unknown colour tag "violet" on a strategy
    /// Expected: card carries the fallback Blue theme
    #[test]
    fn test_card_theme_fallback() {
        let store = sample_store();
        assert_eq!(summary_card(store.get("momentum").unwrap()).theme, Theme::Blue);
        assert_eq!(summary_card(store.get("compounder").unwrap()).theme, Theme::Emerald);
    }

    /// Scenario: strategy with an empty performance map
    /// Expected: card renders with no year rows
    #[test]
    fn test_card_empty_performance() {
        let strategy = make_strategy("empty", &[]);
        let card = summary_card(&strategy);
        assert!(card.rows.is_empty());
        assert_eq!(card.name, "Strategy empty");
    }

    /// Scenario: load_more applied k times for k in 0..5
    /// Expected: visible count is 6 + 6k; has_more flips exactly when visible >= len
    #[test]
    fn test_load_more_steps() {
        let total = 20;
        let mut p = Pagination::new();
        for k in 0..5 {
            assert_eq!(p.visible_count(), 6 + 6 * k);
            assert_eq!(p.has_more(total), p.visible_count() < total);
            p.load_more();
        }
        assert!(!p.has_more(total));
    }

    /// Scenario: collection of exactly 6 strategies
    /// Expected: no "load more" from the start
    #[test]
    fn test_has_more_boundary() {
        let p = Pagination::new();
        assert!(!p.has_more(6));
        assert!(p.has_more(7));
        assert!(!p.has_more(0));
    }
}
