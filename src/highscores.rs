//! High score leaderboard system
//!
//! Persisted as JSON next to the binary, tracks top 10 scores.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

#[derive(Debug, Error)]
pub enum HighScoreError {
    #[error("failed to write high scores to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode high scores: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Player's score
    pub score: u64,
    /// Level reached
    pub level: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: u64,
}

/// High score leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().is_none_or(|e| score > e.score)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a new score to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, score: u64, level: u32, timestamp: u64) -> Option<usize> {
        let rank = self.potential_rank(score)?;
        self.entries.insert(
            rank - 1,
            HighScoreEntry {
                score,
                level,
                timestamp,
            },
        );
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// One line per entry, e.g. `1. 120 (level 3) 5 mins ago`
    pub fn board_lines(&self, now: u64) -> Vec<String> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| {
                format!(
                    "{}. {} (level {}) {}",
                    i + 1,
                    e.score,
                    e.level,
                    format_age(e.timestamp, now)
                )
            })
            .collect()
    }

    /// Load high scores from `path`; a missing or unreadable file starts fresh
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(err) => {
                log::info!("No high scores at {} ({}), starting fresh", path.display(), err);
                return Self::new();
            }
        };

        match serde_json::from_str::<HighScores>(&json) {
            Ok(mut scores) => {
                // Hand-edited files may be out of order
                scores.entries.sort_by(|a, b| b.score.cmp(&a.score));
                scores.entries.truncate(MAX_HIGH_SCORES);
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            Err(err) => {
                log::warn!("Ignoring corrupt high scores at {}: {}", path.display(), err);
                Self::new()
            }
        }
    }

    /// Save high scores to `path`
    pub fn save(&self, path: &Path) -> Result<(), HighScoreError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| HighScoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}

/// Format a timestamp as a relative date string
pub fn format_age(timestamp: u64, now: u64) -> String {
    let diff_mins = now.saturating_sub(timestamp) / 60_000;
    let diff_hours = diff_mins / 60;
    let diff_days = diff_hours / 24;

    match (diff_days, diff_hours, diff_mins) {
        (1, _, _) => "Yesterday".to_string(),
        (d, _, _) if d > 1 => format!("{} days ago", d),
        (_, 1, _) => "1 hour ago".to_string(),
        (_, h, _) if h > 1 => format!("{} hours ago", h),
        (_, _, 1) => "1 min ago".to_string(),
        (_, _, m) if m > 1 => format!("{} mins ago", m),
        _ => "Just now".to_string(),
    }
}
