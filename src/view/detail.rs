use crate::types::{Strategy, Year};

/// Requested year is not a key of the strategy's performance map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidYearError {
    pub strategy_id: String,
    pub year: Year,
}

impl std::fmt::Display for InvalidYearError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "strategy {} has no performance for {}", self.strategy_id, self.year)
    }
}

impl std::error::Error for InvalidYearError {}

#[derive(Clone, Debug, PartialEq)]
pub struct MonthRow {
    pub month: String,
    pub ret: String,
    /// Parsed return >= 0. Presentation only.
    pub is_positive: bool,
    pub holdings_excel: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MonthTable {
    pub year: Year,
    pub rows: Vec<MonthRow>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct YearTab {
    pub year: Year,
    pub label: String,
    pub ytd: String,
    pub benchmark_ytd: String,
    pub active: bool,
}

/// Cumulative figures for the selected year, shown above the month table.
#[derive(Clone, Debug, PartialEq)]
pub struct CumulativePanel {
    pub label: String,
    pub ytd: String,
    pub benchmark_ytd: String,
}

/// Everything the modal needs for one (strategy, selected year) state.
#[derive(Clone, Debug, PartialEq)]
pub struct DetailView {
    pub strategy_id: String,
    pub strategy_name: String,
    pub benchmark_name: String,
    pub title: String,
    /// Newest first.
    pub tabs: Vec<YearTab>,
    pub selected_year: Option<Year>,
    pub cumulative: Option<CumulativePanel>,
    pub table: Option<MonthTable>,
}

impl DetailView {
    /// Year `offset` tabs away from the selected one, if any.
    /// Positive offsets move towards older years.
    pub fn adjacent_year(&self, offset: isize) -> Option<Year> {
        let idx = self.tabs.iter().position(|t| t.active)? as isize + offset;
        if idx < 0 {
            return None;
        }
        self.tabs.get(idx as usize).map(|t| t.year)
    }
}

/// Leading numeric portion of a display string, the way a browser's
/// parseFloat reads it: "-2.1%" → -2.1, "+0.0%" → 0.0, "n/a" → None.
pub fn parse_leading_number(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }

    // Exponent only counts when followed by at least one digit.
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

pub fn is_non_negative(ret: &str) -> bool {
    parse_leading_number(ret).map_or(false, |v| v >= 0.0)
}

/// Month rows for `year`, each tagged with its sign.
pub fn month_table(strategy: &Strategy, year: Year) -> Result<MonthTable, InvalidYearError> {
    let rec = strategy.year(year).ok_or_else(|| InvalidYearError {
        strategy_id: strategy.id.clone(),
        year,
    })?;

    let rows = rec
        .months
        .iter()
        .map(|m| MonthRow {
            month: m.month.clone(),
            ret: m.ret.clone(),
            is_positive: is_non_negative(&m.ret),
            holdings_excel: m.holdings_excel.clone(),
        })
        .collect();

    Ok(MonthTable { year, rows })
}

/// Derived modal content. `selected` must be a key of the map or None.
pub fn detail_view(strategy: &Strategy, selected: Option<Year>) -> Result<DetailView, InvalidYearError> {
    let table = selected.map(|y| month_table(strategy, y)).transpose()?;
    Ok(build_detail(strategy, selected, table))
}

/// Modal content opened on the most recent year.
pub fn latest_detail(strategy: &Strategy) -> DetailView {
    let selected = strategy.current_year();
    let table = selected.and_then(|y| month_table(strategy, y).ok());
    build_detail(strategy, selected, table)
}

fn build_detail(strategy: &Strategy, selected: Option<Year>, table: Option<MonthTable>) -> DetailView {
    let tabs = strategy
        .performance
        .iter()
        .rev()
        .map(|(&year, rec)| YearTab {
            year,
            label: year.short_label(),
            ytd: rec.ytd.clone(),
            benchmark_ytd: rec.benchmark_ytd.clone(),
            active: Some(year) == selected,
        })
        .collect();

    let cumulative = selected
        .and_then(|y| strategy.year(y).map(|rec| (y, rec)))
        .map(|(y, rec)| CumulativePanel {
            label: y.short_label(),
            ytd: rec.ytd.clone(),
            benchmark_ytd: rec.benchmark_ytd.clone(),
        });

    DetailView {
        strategy_id: strategy.id.clone(),
        strategy_name: strategy.name.clone(),
        benchmark_name: strategy.benchmark_name.clone(),
        title: format!("{} - Monthly Performance", strategy.name),
        tabs,
        selected_year: selected,
        cumulative,
        table,
    }
}
