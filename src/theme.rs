use ratatui::style::Color;
use serde::{Deserialize, Deserializer};

/// Presentation theme selected by a strategy's `color` tag.
///
/// Unknown, missing, null or non-string tags fall back to `Blue`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Theme {
    #[default]
    Blue,
    Emerald,
    Purple,
    Cyan,
    Orange,
    Pink,
}

impl Theme {
    pub const ALL: [Theme; 6] = [
        Theme::Blue,
        Theme::Emerald,
        Theme::Purple,
        Theme::Cyan,
        Theme::Orange,
        Theme::Pink,
    ];

    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "emerald" => Theme::Emerald,
            "purple" => Theme::Purple,
            "cyan" => Theme::Cyan,
            "orange" => Theme::Orange,
            "pink" => Theme::Pink,
            _ => Theme::Blue,
        }
    }

    /// Stable key handed to the rendering layer.
    pub fn key(&self) -> &'static str {
        match self {
            Theme::Blue => "blue",
            Theme::Emerald => "emerald",
            Theme::Purple => "purple",
            Theme::Cyan => "cyan",
            Theme::Orange => "orange",
            Theme::Pink => "pink",
        }
    }

    /// Badge background classes for the HTML card.
    pub fn badge_bg_class(&self) -> String {
        let k = self.key();
        format!("bg-gradient-to-br from-{k}-500/20 to-{k}-600/20")
    }

    /// Badge text class for the HTML card.
    pub fn badge_text_class(&self) -> String {
        format!("text-{}-400", self.key())
    }

    /// Terminal accent colour for the browse front end.
    pub fn term_color(&self) -> Color {
        match self {
            Theme::Blue => Color::LightBlue,
            Theme::Emerald => Color::LightGreen,
            Theme::Purple => Color::Magenta,
            Theme::Cyan => Color::Cyan,
            Theme::Orange => Color::Rgb(251, 146, 60),
            Theme::Pink => Color::LightMagenta,
        }
    }
}

impl From<String> for Theme {
    fn from(tag: String) -> Self {
        Theme::from_tag(&tag)
    }
}

impl<'de> Deserialize<'de> for Theme {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = serde_json::Value::deserialize(deserializer)?;
        Ok(raw.as_str().map(Theme::from_tag).unwrap_or_default())
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}
