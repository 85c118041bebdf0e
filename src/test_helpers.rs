// Shared test fixtures for store, view and page tests.
// Only compiled under #[cfg(test)].

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::config::{Config, DataSource};
use crate::store::StrategyStore;
use crate::theme::Theme;
use crate::types::{MonthRecord, Strategy, Year, YearRecord};

pub const SAMPLE_DOCUMENT: &str = r#"{
  "strategies": [
    {
      "id": "compounder",
      "name": "The Compounder",
      "category": "Quality Growth",
      "description": "Concentrated portfolio of <durable> compounders.",
      "color": "emerald",
      "benchmark_name": "Nifty 50",
      "holdings_file": "compounder-holdings.xlsx",
      "performance": {
        "2024": {
          "ytd": "+18.4%",
          "benchmark_ytd": "+9.1%",
          "months": [
            {"month": "Jan 24", "return": "+5.2%", "holdings_excel": "downloads/compounder-jan24.xlsx"},
            {"month": "Feb 24", "return": "-1.3%"}
          ]
        },
        "2025": {
          "ytd": "+12.3%",
          "benchmark_ytd": "+8.2%",
          "months": [
            {"month": "Jan 25", "return": "+12.3%", "holdings_excel": "downloads/compounder-jan25.xlsx"},
            {"month": "Feb 25", "return": "-2.1%", "holdings_excel": "downloads/compounder-feb25.xlsx"},
            {"month": "Mar 25", "return": "+0.0%"}
          ]
        },
        "2023": {"ytd": "+22.0%", "benchmark_ytd": "+19.5%", "months": []},
        "2022": {"ytd": "-4.0%", "benchmark_ytd": "+1.2%", "months": []}
      }
    },
    {
      "id": "momentum",
      "name": "Momentum Plus",
      "category": "Tactical",
      "description": "Trend following across sectors.",
      "color": "violet",
      "benchmark_name": "Nifty 500",
      "performance": {
        "2025": {"ytd": "+3.0%", "benchmark_ytd": "+2.0%", "months": [{"month": "Jan 25", "return": "+3.0%"}]}
      }
    },
    {
      "id": "income",
      "name": "Steady Income",
      "category": "Dividend",
      "description": "Dividend payers.",
      "color": "orange",
      "benchmark_name": "Nifty Div",
      "holdings_file": "income.xlsx",
      "performance": {
        "2021": {"ytd": "+7%", "benchmark_ytd": "+6%"},
        "2022": {"ytd": "+8%", "benchmark_ytd": "+6%"},
        "2023": {"ytd": "+9%", "benchmark_ytd": "+6%"},
        "2024": {"ytd": "+10%", "benchmark_ytd": "+6%"},
        "2025": {"ytd": "+11%", "benchmark_ytd": "+6%"}
      }
    }
  ]
}"#;

pub fn make_config() -> Config {
    Config {
        data_source: DataSource::File(PathBuf::from("data/portfolio-data.json")),
        output_dir: PathBuf::from("site"),
        site_title: "Portfolio Strategies".to_string(),
        downloads_prefix: "downloads/".to_string(),
        holdings_label: "Feb-26".to_string(),
        disclaimer_flag_path: PathBuf::from(".showcase/disclaimer.json"),
        disclaimer_delay_ms: 1000,
        disclaimer_exit_url: "https://google.com".to_string(),
    }
}

pub fn sample_store() -> StrategyStore {
    StrategyStore::from_json(SAMPLE_DOCUMENT).unwrap()
}

/// Build a strategy with one month per given year and ytd "+{year % 100}%".
pub fn make_strategy(id: &str, years: &[u16]) -> Strategy {
    let performance: BTreeMap<Year, YearRecord> = years
        .iter()
        .map(|&y| {
            (
                Year(y),
                YearRecord {
                    ytd: format!("+{}%", y % 100),
                    benchmark_ytd: "+1.0%".to_string(),
                    months: vec![MonthRecord {
                        month: format!("Jan {:02}", y % 100),
                        ret: format!("+{}.0%", y % 100),
                        holdings_excel: None,
                    }],
                },
            )
        })
        .collect();

    Strategy {
        id: id.to_string(),
        name: format!("Strategy {}", id),
        category: "Test".to_string(),
        description: String::new(),
        color: Theme::Blue,
        benchmark_name: "Index".to_string(),
        holdings_file: None,
        performance,
    }
}

/// Store of `n` strategies with ids "s0".."s{n-1}".
pub fn make_store(n: usize) -> StrategyStore {
    let strategies = (0..n)
        .map(|i| make_strategy(&format!("s{}", i), &[2024, 2025]))
        .collect();
    StrategyStore::from_strategies(strategies).unwrap()
}
