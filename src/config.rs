use std::path::PathBuf;

/// Where the portfolio document comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataSource {
    Http(String),
    File(PathBuf),
}

impl DataSource {
    pub fn from_str(s: &str) -> Self {
        let s = s.trim();
        let lower = s.to_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            DataSource::Http(s.to_string())
        } else {
            DataSource::File(PathBuf::from(s))
        }
    }

    /// Human-readable label for logs: the URL or the file path.
    pub fn label(&self) -> String {
        match self {
            DataSource::Http(url) => url.clone(),
            DataSource::File(path) => path.display().to_string(),
        }
    }
}

pub const DEFAULT_DATA_PATH: &str = "data/portfolio-data.json";

/// Configuration loaded from environment variables.
#[derive(Clone, Debug)]
pub struct Config {
    // Input
    pub data_source: DataSource,

    // Static site output
    pub output_dir: PathBuf,
    pub site_title: String,
    pub downloads_prefix: String,
    pub holdings_label: String,

    // Disclaimer gate
    pub disclaimer_flag_path: PathBuf,
    pub disclaimer_delay_ms: u64,
    pub disclaimer_exit_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            data_source: DataSource::from_str(
                &std::env::var("PORTFOLIO_DATA").unwrap_or_else(|_| DEFAULT_DATA_PATH.into()),
            ),
            output_dir: PathBuf::from(
                std::env::var("OUTPUT_DIR").unwrap_or_else(|_| "site".into()),
            ),
            site_title: std::env::var("SITE_TITLE")
                .unwrap_or_else(|_| "Portfolio Strategies".into()),
            downloads_prefix: std::env::var("DOWNLOADS_PREFIX")
                .unwrap_or_else(|_| "downloads/".into()),
            holdings_label: std::env::var("HOLDINGS_LABEL").unwrap_or_else(|_| "Feb-26".into()),
            disclaimer_flag_path: PathBuf::from(
                std::env::var("DISCLAIMER_FLAG")
                    .unwrap_or_else(|_| ".showcase/disclaimer.json".into()),
            ),
            disclaimer_delay_ms: std::env::var("DISCLAIMER_DELAY_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1000),
            disclaimer_exit_url: std::env::var("DISCLAIMER_EXIT_URL")
                .unwrap_or_else(|_| "https://google.com".into()),
        }
    }

    /// Link target for a strategy-level holdings file.
    pub fn holdings_href(&self, holdings_file: &str) -> String {
        format!("{}{}", self.downloads_prefix, holdings_file)
    }
}
