//! The player on the balcony above the door

use super::state::GameState;
use super::timer::{Scheduler, TimerId};
use crate::consts::*;

/// Movement/animation state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerState {
    #[default]
    MovingLeft,
    MovingRight,
    Resting,
}

impl PlayerState {
    /// Ticks per animation frame
    fn frame_ticks(self) -> u8 {
        match self {
            PlayerState::MovingLeft | PlayerState::MovingRight => (FPS / 5) as u8,
            PlayerState::Resting => FPS as u8,
        }
    }

    /// First sprite frame of this state
    pub fn sprite_offset(self) -> u8 {
        match self {
            PlayerState::MovingLeft => 0,
            PlayerState::MovingRight => 4,
            PlayerState::Resting => 8,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    pub life: i16,
    pub x: i16,
    pub frame: u8,
    frame_timer: u8,
    pub state: PlayerState,
    pub previous_state: PlayerState,
    pub poisoned: bool,
    pub poison_ticks: u16,
    pub score: i32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            life: PLAYER_MAX_LIFE,
            x: PLAYER_START_X,
            frame: 0,
            frame_timer: 0,
            state: PlayerState::MovingLeft,
            previous_state: PlayerState::MovingLeft,
            poisoned: false,
            poison_ticks: 0,
            score: 0,
        }
    }
}

impl Player {
    /// Switch state; animation restarts only on an actual change
    pub fn set_state(&mut self, new_state: PlayerState, timers: &mut Scheduler) {
        if new_state != PlayerState::Resting {
            timers.start(TimerId::PlayerRests, PLAYER_REST_TIMEOUT);
        }
        if new_state == self.state {
            return;
        }
        self.frame = 0;
        self.frame_timer = new_state.frame_ticks();
        self.previous_state = self.state;
        self.state = new_state;
    }

    /// Per-tick update with this tick's movement and whether a throw happened
    pub fn update(&mut self, dx: i8, throws: bool, timers: &mut Scheduler) {
        if dx < 0 {
            self.set_state(PlayerState::MovingLeft, timers);
            self.x = (self.x - 1).max(0);
        }
        if dx > 0 {
            self.set_state(PlayerState::MovingRight, timers);
            self.x = (self.x + 1).min(PLAYER_MAX_X);
        }

        if throws && self.state == PlayerState::Resting {
            self.set_state(self.previous_state, timers);
        } else if throws {
            timers.start(TimerId::PlayerRests, PLAYER_REST_TIMEOUT);
        }

        if self.frame_timer == 0 {
            self.frame_timer = self.state.frame_ticks();
            self.frame = (self.frame + 1) % 4;
        } else {
            self.frame_timer -= 1;
        }

        if self.poisoned {
            self.poison_ticks = self.poison_ticks.saturating_sub(1);
            if self.poison_ticks == 0 {
                self.poisoned = false;
            }
        }
    }

    pub fn set_poison(&mut self) {
        self.poisoned = true;
        self.poison_ticks = PLAYER_POISON_TICKS;
    }

    /// Movement direction the player last faced
    pub fn facing(&self) -> PlayerState {
        match self.state {
            PlayerState::Resting => self.previous_state,
            moving => moving,
        }
    }

    /// x a thrown bullet starts from
    pub fn throw_x(&self) -> i16 {
        match self.facing() {
            PlayerState::MovingRight => self.x + PLAYER_WIDTH - BULLET_SIZE,
            _ => self.x,
        }
    }

    pub fn add_score(&mut self, delta: i32) {
        self.score = (self.score + delta).max(0);
    }

    pub fn heal(&mut self, amount: i16) {
        self.life = (self.life + amount).min(PLAYER_MAX_LIFE);
    }
}

/// Timer callback: nothing happened for a while, lean back
pub fn player_rests(state: &mut GameState) {
    let GameState { player, timers, .. } = state;
    player.set_state(PlayerState::Resting, timers);
}
