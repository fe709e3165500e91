//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in one `GameState`, owned by the
//! run loop and passed by mutable reference into each subsystem.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::door::Door;
use super::enemy::{self, EnemyState, Enemies};
use super::numbers::FlyingNumbers;
use super::player::{self, Player};
use super::powerup::{self, PowerUps};
use super::stage::StageController;
use super::timer::{Scheduler, TimerId};
use super::weapon::Armory;
use crate::consts::*;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Player life ran out
    GameOver,
    /// Last stage's boss defeated
    Won,
    /// Player left the run
    Cleanup,
}

/// Seeded random source, the only randomness the simulation sees
#[derive(Debug, Clone)]
pub struct SimRng(Pcg32);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self(Pcg32::seed_from_u64(seed))
    }

    /// Uniform draw in `[0, n)`, zero when `n` is zero
    pub fn below(&mut self, n: u16) -> u16 {
        if n == 0 {
            return 0;
        }
        self.0.random_range(0..n)
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: SimRng,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub timers: Scheduler,
    pub player: Player,
    pub armory: Armory,
    pub enemies: Enemies,
    pub door: Door,
    pub powerups: PowerUps,
    pub stage: StageController,
    pub numbers: FlyingNumbers,
    /// Half seconds elapsed, drives blinking
    pub half_seconds: u8,
    /// Door lamp flicker frame
    pub lamp_frame: u8,
}

impl GameState {
    /// Start a new run with the given seed
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng: SimRng::new(seed),
            phase: GamePhase::Running,
            time_ticks: 0,
            timers: Scheduler::new(),
            player: Player::default(),
            armory: Armory::new(),
            enemies: Enemies::new(),
            door: Door::default(),
            powerups: PowerUps::new(),
            stage: StageController::new(),
            numbers: FlyingNumbers::new(),
            half_seconds: 0,
            lamp_frame: 0,
        };

        state.timers.setup(TimerId::PlayerRests, player::player_rests);
        state.timers.start(TimerId::PlayerRests, PLAYER_REST_TIMEOUT);

        state.timers.setup(TimerId::EnemySpawn, enemy::spawn_new_enemies);
        state.timers.start(TimerId::EnemySpawn, ENEMIES_SPAWN_RATE);

        for slot in 0..MAX_POWERUPS {
            let id = TimerId::powerup_spawn(slot);
            state.timers.setup(id, powerup::spawn_callback(slot));
            let delay = state.rng.below(8) * FPS + ENEMIES_SPAWN_RATE;
            state.timers.start(id, delay);
        }

        state.timers.setup(TimerId::HalfSecond, half_second_counter);
        state.timers.start(TimerId::HalfSecond, FPS / 2);

        log::info!("New run with seed {}", seed);
        state
    }

    /// Uniform draw in `[0, n)`
    pub fn random_below(&mut self, n: u16) -> u16 {
        self.rng.below(n)
    }

    /// At most one enemy attacks, and only the door holder may
    pub fn door_exclusive(&self) -> bool {
        let mut attackers = self
            .enemies
            .iter_active()
            .filter(|(_, e)| e.state == EnemyState::Attacking)
            .map(|(i, _)| i);
        let holder_ok = match self.door.holder() {
            Some(h) => self.enemies.get(h).is_some_and(|e| e.state.is_alive()),
            None => true,
        };
        let attacker_ok = match (attackers.next(), attackers.next()) {
            (None, _) => true,
            (Some(a), None) => self.door.holder() == Some(a),
            (Some(_), Some(_)) => false,
        };
        holder_ok && attacker_ok
    }

    /// Invariants every tick must leave intact
    pub fn check_invariants(&self) -> bool {
        self.armory.ammo_conserved() && self.door_exclusive()
    }
}

/// Timer callback: count half seconds and flicker the door lamp
fn half_second_counter(state: &mut GameState) {
    state.half_seconds = state.half_seconds.wrapping_add(1);
    if state.half_seconds & 1 == 1 {
        state.lamp_frame = state.rng.below(2) as u8;
    }
    state.timers.start(TimerId::HalfSecond, FPS / 2);
}
