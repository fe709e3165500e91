//! Run settings
//!
//! Loaded from an optional JSON file. Missing fields keep their defaults and
//! an unreadable file falls back to the defaults altogether.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::FPS;

/// Run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed; a random one is drawn when absent
    pub seed: Option<u64>,
    /// Stop a headless run after this many ticks
    pub max_ticks: u64,
    /// Let the autopilot play
    pub idle_mode: bool,
    /// Where the leaderboard lives
    pub highscore_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            // ten minutes of play
            max_ticks: FPS as u64 * 600,
            idle_mode: true,
            highscore_path: PathBuf::from("fatsche_highscores.json"),
        }
    }
}

impl Settings {
    /// Load settings from `path`, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read settings {}: {}, using defaults", path.display(), e);
                return Self::default();
            }
        };
        match serde_json::from_str(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Seed for this run
    pub fn seed_or_random(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}
