//! Highscore record
//!
//! A single best score with the name of whoever set it. Persisted as
//! `{"name": ..., "score": ...}` by [`crate::persistence`].

use serde::{Deserialize, Serialize};

/// Name shown before anyone has set a score
pub const NO_NAME: &str = "—";

/// Label used when the player leaves the name prompt empty
pub const DEFAULT_NAME: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highscore {
    pub name: String,
    pub score: u32,
}

impl Default for Highscore {
    fn default() -> Self {
        Self {
            name: NO_NAME.to_string(),
            score: 0,
        }
    }
}

impl Highscore {
    pub fn new(name: impl Into<String>, score: u32) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }

    /// Record for a prompt answer; missing or blank names become [`DEFAULT_NAME`]
    pub fn named(name: Option<&str>, score: u32) -> Self {
        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_NAME);
        Self::new(name, score)
    }

    /// Whether `score` strictly beats this record
    pub fn beaten_by(&self, score: u32) -> bool {
        score > self.score
    }
}
