use std::collections::HashSet;

use serde_json::error::Category;

use crate::config::DataSource;
use crate::types::{PortfolioDocument, Strategy};

// ─── Errors ───

/// Failure of the one-shot portfolio load. No partial collection is exposed.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadError {
    Http(String),
    Status(u16),
    Io(String),
    Parse(String),
    Schema(String),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Http(e) => write!(f, "HTTP error: {}", e),
            LoadError::Status(code) => write!(f, "unexpected HTTP status {}", code),
            LoadError::Io(e) => write!(f, "read error: {}", e),
            LoadError::Parse(e) => write!(f, "malformed JSON: {}", e),
            LoadError::Schema(e) => write!(f, "unexpected document shape: {}", e),
        }
    }
}

impl std::error::Error for LoadError {}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        match err.classify() {
            Category::Data => LoadError::Schema(err.to_string()),
            Category::Io => LoadError::Io(err.to_string()),
            Category::Syntax | Category::Eof => LoadError::Parse(err.to_string()),
        }
    }
}

// ─── Store ───

/// The strategy collection, loaded once and read-only afterwards.
#[derive(Clone, Debug, Default)]
pub struct StrategyStore {
    strategies: Vec<Strategy>,
}

impl StrategyStore {
    /// Single-attempt load: fetch (or read) the document, then parse it.
    pub async fn load(client: &reqwest::Client, source: &DataSource) -> Result<Self, LoadError> {
        eprintln!("[STORE] Loading strategies from {}", source.label());
        let text = match source {
            DataSource::Http(url) => fetch_text(client, url).await?,
            DataSource::File(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(|e| LoadError::Io(format!("{}: {}", path.display(), e)))?,
        };
        let store = Self::from_json(&text)?;
        eprintln!("[STORE] Loaded {} strategies", store.len());
        Ok(store)
    }

    pub fn from_json(text: &str) -> Result<Self, LoadError> {
        let doc: PortfolioDocument = serde_json::from_str(text)?;
        Self::from_strategies(doc.strategies)
    }

    /// Wraps an already-parsed collection, keeping source order. Ids must be unique.
    pub fn from_strategies(strategies: Vec<Strategy>) -> Result<Self, LoadError> {
        let mut seen = HashSet::with_capacity(strategies.len());
        for s in &strategies {
            if !seen.insert(s.id.as_str()) {
                return Err(LoadError::Schema(format!("duplicate strategy id {:?}", s.id)));
            }
            if s.performance.is_empty() {
                eprintln!("[STORE] Strategy {} has no performance years", s.id);
            }
        }
        Ok(Self { strategies })
    }

    pub fn all(&self) -> &[Strategy] {
        &self.strategies
    }

    pub fn get(&self, id: &str) -> Option<&Strategy> {
        self.strategies.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

async fn fetch_text(client: &reqwest::Client, url: &str) -> Result<String, LoadError> {
    let resp = client
        .get(url)
        .send()
        .await
        .map_err(|e| LoadError::Http(e.to_string()))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(LoadError::Status(status.as_u16()));
    }

    resp.text().await.map_err(|e| LoadError::Http(format!("body error: {}", e)))
}
