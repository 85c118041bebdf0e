use std::collections::BTreeMap;

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::theme::Theme;

// ─── Year ───

/// Calendar year key of a performance map, parsed once at load.
///
/// Ordered numerically, so "10000" sorts after "9999".
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct Year(pub u16);

impl Year {
    /// Only canonical keys are accepted: "2025", not " 2025" or "02025".
    pub fn parse(s: &str) -> Result<Self, String> {
        let year = s
            .parse::<u16>()
            .map(Year)
            .map_err(|_| format!("invalid year key {:?}", s))?;
        if year.0.to_string() != s {
            return Err(format!("non-canonical year key {:?}", s));
        }
        Ok(year)
    }

    /// "CY25" for 2025.
    pub fn short_label(&self) -> String {
        format!("CY{:02}", self.0 % 100)
    }
}

impl TryFrom<String> for Year {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Year::parse(&s)
    }
}

impl std::fmt::Display for Year {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ─── Strategy records (immutable after load) ───

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MonthRecord {
    pub month: String,
    /// Signed percentage display string, e.g. "-2.1%".
    #[serde(rename = "return")]
    pub ret: String,
    #[serde(default)]
    pub holdings_excel: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct YearRecord {
    pub ytd: String,
    #[serde(default)]
    pub benchmark_ytd: String,
    /// Chronological.
    #[serde(default)]
    pub months: Vec<MonthRecord>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Strategy {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub color: Theme,
    #[serde(default)]
    pub benchmark_name: String,
    #[serde(default)]
    pub holdings_file: Option<String>,
    #[serde(deserialize_with = "deserialize_performance")]
    pub performance: BTreeMap<Year, YearRecord>,
}

impl Strategy {
    /// Most recent year, treated as the YTD year. None only for an empty map.
    pub fn current_year(&self) -> Option<Year> {
        self.performance.keys().next_back().copied()
    }

    /// Year keys, most recent first.
    pub fn years_desc(&self) -> Vec<Year> {
        self.performance.keys().rev().copied().collect()
    }

    pub fn year(&self, year: Year) -> Option<&YearRecord> {
        self.performance.get(&year)
    }
}

/// Top-level shape of the portfolio document.
#[derive(Debug, Deserialize)]
pub struct PortfolioDocument {
    pub strategies: Vec<Strategy>,
}

/// Ids may be written as strings or bare numbers; both normalise to a string.
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

/// Year map that refuses to let a second entry replace the first.
fn deserialize_performance<'de, D>(deserializer: D) -> Result<BTreeMap<Year, YearRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    struct PerformanceVisitor;

    impl<'de> Visitor<'de> for PerformanceVisitor {
        type Value = BTreeMap<Year, YearRecord>;

        fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("a map of year keys to year records")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut out = BTreeMap::new();
            while let Some((year, rec)) = map.next_entry::<Year, YearRecord>()? {
                if out.insert(year, rec).is_some() {
                    return Err(de::Error::custom(format!("duplicate year key {}", year)));
                }
            }
            Ok(out)
        }
    }

    deserializer.deserialize_map(PerformanceVisitor)
}
