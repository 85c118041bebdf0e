use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persisted acceptance record. Stands in for the browser's local storage key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DisclaimerFlag {
    pub accepted: bool,
    pub accepted_at: Option<DateTime<Utc>>,
}

impl DisclaimerFlag {
    /// True only for a readable record with `accepted: true`.
    pub fn is_accepted(path: &Path) -> bool {
        let text = match std::fs::read_to_string(path) {
            Ok(t) => t,
            Err(_) => return false,
        };
        match serde_json::from_str::<DisclaimerFlag>(&text) {
            Ok(flag) => flag.accepted,
            Err(e) => {
                eprintln!("[GATE] Ignoring unreadable flag {}: {}", path.display(), e);
                false
            }
        }
    }

    pub fn store_accepted(path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let flag = DisclaimerFlag {
            accepted: true,
            accepted_at: Some(Utc::now()),
        };
        let text = serde_json::to_string_pretty(&flag)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, text)
    }
}

/// Outcome of a gate interaction the caller has to act on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateOutcome {
    Hidden,
    /// Leave the page for this destination. The flag stays unset.
    Exit(String),
}

/// Blocking disclaimer overlay shown once after a start-up delay.
pub struct DisclaimerGate {
    accepted: bool,
    visible: bool,
    shown: bool,
    delay: Duration,
    exit_url: String,
}

impl DisclaimerGate {
    pub fn new(accepted: bool, delay: Duration, exit_url: String) -> Self {
        Self {
            accepted,
            visible: false,
            shown: false,
            delay,
            exit_url,
        }
    }

    /// Read the persisted flag once at start-up.
    pub fn from_flag(path: &Path, delay: Duration, exit_url: String) -> Self {
        Self::new(DisclaimerFlag::is_accepted(path), delay, exit_url)
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    /// Reveal the gate once `elapsed` since start-up reaches the delay.
    /// Only ever fires once: a dismissed gate stays hidden.
    pub fn on_tick(&mut self, elapsed: Duration) {
        if !self.accepted && !self.shown && elapsed >= self.delay {
            self.visible = true;
            self.shown = true;
        }
    }

    /// Accept: persist the flag, hide the gate. Hidden even if persisting fails.
    pub fn accept(&mut self, flag_path: &Path) -> std::io::Result<GateOutcome> {
        self.accepted = true;
        self.visible = false;
        DisclaimerFlag::store_accepted(flag_path)?;
        Ok(GateOutcome::Hidden)
    }

    pub fn reject(&self) -> GateOutcome {
        GateOutcome::Exit(self.exit_url.clone())
    }

    /// Escape: hide without persisting anything.
    pub fn dismiss(&mut self) -> GateOutcome {
        self.visible = false;
        GateOutcome::Hidden
    }
}
