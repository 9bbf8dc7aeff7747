//! High score leaderboard
//!
//! Top 10 finished runs. Persisted to LocalStorage on the web; native builds
//! keep it in memory only.

use serde::{Deserialize, Serialize};

use crate::sim::Session;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// One finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: i64,
    /// Set reached when the run ended
    pub set_reached: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// Leaderboard, sorted best first. Ties keep the earlier run ahead.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "hotdog_vendor_highscores";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self::default()
    }

    /// Only positive scores that beat the current last place count
    pub fn qualifies(&self, score: i64) -> bool {
        if score <= 0 {
            return false;
        }
        self.entries.len() < MAX_HIGH_SCORES
            || self.entries.last().is_none_or(|e| score > e.score)
    }

    /// Rank (1-indexed) the score would get, if it qualifies
    pub fn potential_rank(&self, score: i64) -> Option<usize> {
        self.qualifies(score).then(|| self.insert_position(score) + 1)
    }

    fn insert_position(&self, score: i64) -> usize {
        self.entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len())
    }

    /// Insert a run. Returns the rank achieved, or None if it didn't place.
    pub fn add_score(&mut self, score: i64, set_reached: u32, timestamp: f64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let pos = self.insert_position(score);
        self.entries.insert(
            pos,
            HighScoreEntry {
                score,
                set_reached,
                timestamp,
            },
        );
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(pos + 1)
    }

    /// Record a finished session. Ignored while the session is still running.
    pub fn record_session(&mut self, session: &Session, timestamp: f64) -> Option<usize> {
        if !session.is_game_over() {
            return None;
        }
        self.add_score(session.score(), session.set_number(), timestamp)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Best recorded score
    pub fn top_score(&self) -> Option<i64> {
        self.entries.first().map(|e| e.score)
    }

    #[cfg(target_arch = "wasm32")]
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }

    /// Load from LocalStorage, or start empty
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let loaded = Self::storage()
            .and_then(|storage| storage.get_item(Self::STORAGE_KEY).ok().flatten())
            .and_then(|json| serde_json::from_str::<HighScores>(&json).ok());

        match loaded {
            Some(scores) => {
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            None => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
        }
    }

    /// Write to LocalStorage. An empty board is never written.
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        if self.is_empty() {
            return;
        }
        let Some(storage) = Self::storage() else {
            return;
        };
        match serde_json::to_string(self) {
            Ok(json) => {
                if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                    log::warn!("Could not write high scores to LocalStorage");
                }
            }
            Err(e) => log::warn!("Could not encode high scores: {}", e),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
