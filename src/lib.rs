//! Fatsche - a doorway defense arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (timers, entities, damage, stage progression)
//! - `platform`: Input/render boundary traits implemented by the host
//! - `highscores`: High score persistence
//! - `settings`: Run configuration

pub mod highscores;
pub mod platform;
pub mod settings;
pub mod sim;

pub use highscores::{HighScoreStore, JsonHighScoreStore, MemoryHighScoreStore};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Logical frame rate; every countdown is derived from it
    pub const FPS: u16 = 30;

    /// Play area dimensions
    pub const WIDTH: i16 = 128;
    pub const HEIGHT: i16 = 64;

    /// Baseline y of each lane (door, upper, lower)
    pub const LANE_Y: [i16; 3] = [52, 56, 62];

    /// Pool capacities
    pub const MAX_ENEMIES: usize = 5;
    pub const MAX_POWERUPS: usize = 2;
    pub const MAX_FLYING_NUMBERS: usize = 8;

    /// New enemy every 3 seconds
    pub const ENEMIES_SPAWN_RATE: u16 = FPS * 3;

    /// Player defaults
    pub const PLAYER_MAX_LIFE: i16 = 256;
    pub const PLAYER_START_X: i16 = 20;
    pub const PLAYER_MAX_X: i16 = 116;
    pub const PLAYER_WIDTH: i16 = 12;
    pub const PLAYER_REST_TIMEOUT: u16 = FPS * 5;
    pub const PLAYER_POISON_TICKS: u16 = FPS * 20;

    /// Airborne bullet sprite
    pub const BULLET_SIZE: i16 = 5;
    pub const BULLET_START_Y: i16 = 5;
    pub const BULLET_FRAME_TIME: u8 = (FPS / 10) as u8;

    /// Power-up sprite
    pub const POWERUP_SIZE: i16 = 8;
}

/// Horizontal distance check used by area effects
#[inline]
pub fn within_band(x: i16, center: i16, radius: i16) -> bool {
    x >= center - radius && x <= center + radius
}
