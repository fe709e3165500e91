//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by pool slot)
//! - No platform dependencies beyond the boundary traits

pub mod collision;
pub mod door;
pub mod enemy;
pub mod numbers;
pub mod player;
pub mod pool;
pub mod powerup;
pub mod render;
pub mod stage;
pub mod state;
pub mod tick;
pub mod timer;
pub mod weapon;

pub use collision::{Lane, Rect};
pub use door::Door;
pub use enemy::{Enemy, EnemyKind, EnemyState, Species};
pub use player::{Player, PlayerState};
pub use pool::{Pool, Slot};
pub use powerup::{PowerUp, PowerUpKind};
pub use stage::{Banner, StageController, StageDescriptor, STAGES};
pub use state::{GamePhase, GameState, SimRng};
pub use tick::{TickInput, tick};
pub use timer::{Scheduler, TimerId};
pub use weapon::{Armory, Bullet, BulletState, Weapon};
