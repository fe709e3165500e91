//! High score leaderboard system
//!
//! The game itself only needs one number at start and one at the end of a
//! run; the file-backed store keeps the top 10 so the host can show them.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// Persistence boundary used by the run loop
pub trait HighScoreStore {
    /// Best score so far, 0 when none
    fn read_highscore(&mut self) -> i32;

    /// Record a finished run's score
    fn write_highscore(&mut self, score: i32);
}

/// A single high score entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: i32,
    /// Stage reached, 1-based
    pub stage: u8,
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
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
    pub fn qualifies(&self, score: i32) -> bool {
        if score <= 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Add a new score to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, score: i32, stage: u8) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry { score, stage };

        // Find insertion point (sorted descending by score)
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<i32> {
        self.entries.first().map(|e| e.score)
    }
}

/// Leaderboard kept in a JSON file
#[derive(Debug, Clone)]
pub struct JsonHighScoreStore {
    path: PathBuf,
    scores: HighScores,
    /// Stage recorded with the next written score
    pub stage: u8,
}

impl JsonHighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            scores: HighScores::new(),
            stage: 1,
        }
    }

    pub fn scores(&self) -> &HighScores {
        &self.scores
    }

    fn load(&mut self) {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) => {
                log::info!("No high scores at {} ({}), starting fresh", self.path.display(), e);
                self.scores = HighScores::new();
                return;
            }
        };
        match serde_json::from_str::<HighScores>(&json) {
            Ok(scores) => {
                log::info!("Loaded {} high scores", scores.entries.len());
                self.scores = scores;
            }
            Err(e) => {
                log::warn!("Ignoring unreadable high scores {}: {}", self.path.display(), e);
                self.scores = HighScores::new();
            }
        }
    }

    fn save(&self) {
        let json = match serde_json::to_string_pretty(&self.scores) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not encode high scores: {}", e);
                return;
            }
        };
        match fs::write(&self.path, json) {
            Ok(()) => log::info!("High scores saved ({} entries)", self.scores.entries.len()),
            Err(e) => log::warn!("Could not save high scores to {}: {}", self.path.display(), e),
        }
    }
}

impl HighScoreStore for JsonHighScoreStore {
    fn read_highscore(&mut self) -> i32 {
        self.load();
        self.scores.top_score().unwrap_or(0)
    }

    fn write_highscore(&mut self, score: i32) {
        if let Some(rank) = self.scores.add_score(score, self.stage) {
            log::info!("Score {} ranked #{}", score, rank);
            self.save();
        }
    }
}

/// Store that forgets everything when dropped
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScoreStore {
    pub best: i32,
}

impl HighScoreStore for MemoryHighScoreStore {
    fn read_highscore(&mut self) -> i32 {
        self.best
    }

    fn write_highscore(&mut self, score: i32) {
        self.best = self.best.max(score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaderboard_sorted_and_truncated() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(0, 1), None);
        for s in 1..=12 {
            scores.add_score(s * 10, 1);
        }
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.top_score(), Some(120));
        assert!(!scores.qualifies(20));
        assert_eq!(scores.add_score(115, 2), Some(2));
    }

    #[test]
    fn test_memory_store_keeps_best() {
        let mut store = MemoryHighScoreStore::default();
        store.write_highscore(50);
        store.write_highscore(20);
        assert_eq!(store.read_highscore(), 50);
    }

    #[test]
    fn test_json_store_round_trips_through_file() {
        let path = std::env::temp_dir().join(format!("fatsche-hs-{}.json", std::process::id()));
        let _ = fs::remove_file(&path);

        let mut store = JsonHighScoreStore::new(&path);
        assert_eq!(store.read_highscore(), 0);
        store.stage = 3;
        store.write_highscore(420);

        let mut reopened = JsonHighScoreStore::new(&path);
        assert_eq!(reopened.read_highscore(), 420);
        assert_eq!(reopened.scores().entries[0].stage, 3);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_json_store_ignores_garbage() {
        let path = std::env::temp_dir().join(format!("fatsche-bad-{}.json", std::process::id()));
        fs::write(&path, "not json").unwrap();
        let mut store = JsonHighScoreStore::new(&path);
        assert_eq!(store.read_highscore(), 0);
        let _ = fs::remove_file(&path);
    }
}
