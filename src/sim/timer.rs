//! Cooperative software timers
//!
//! A fixed set of countdown slots advanced once per tick. Each slot may be
//! bound to a callback that receives the whole game state; callbacks are
//! free to re-arm their own slot or any other one (the enemy spawner and the
//! half-second counter both re-arm themselves).

use super::state::GameState;

/// Callback run when a timer expires
pub type TimerFn = fn(&mut GameState);

/// Timer slots, in firing order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerId {
    PlayerRests,
    EnemySpawn,
    PowerupSpawn0,
    PowerupSpawn1,
    HalfSecond,
}

pub const TIMER_COUNT: usize = 5;

impl TimerId {
    pub const ALL: [TimerId; TIMER_COUNT] = [
        TimerId::PlayerRests,
        TimerId::EnemySpawn,
        TimerId::PowerupSpawn0,
        TimerId::PowerupSpawn1,
        TimerId::HalfSecond,
    ];

    /// Respawn timer owned by power-up slot `slot`
    pub fn powerup_spawn(slot: usize) -> Self {
        match slot {
            0 => TimerId::PowerupSpawn0,
            _ => TimerId::PowerupSpawn1,
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Timer {
    active: bool,
    remaining: u16,
    callback: Option<TimerFn>,
}

/// The scheduler's slot table
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    slots: [Timer; TIMER_COUNT],
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a callback without arming the slot
    pub fn setup(&mut self, id: TimerId, callback: TimerFn) {
        self.slots[id.index()].callback = Some(callback);
    }

    /// Arm the slot to expire after `ticks` scheduler steps
    pub fn start(&mut self, id: TimerId, ticks: u16) {
        let slot = &mut self.slots[id.index()];
        slot.remaining = ticks;
        slot.active = true;
    }

    /// Disarm without firing
    pub fn stop(&mut self, id: TimerId) {
        self.slots[id.index()].active = false;
    }

    /// Disarm every slot and drop all callbacks
    pub fn clear(&mut self) {
        self.slots = Default::default();
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.slots[id.index()].active
    }

    pub fn remaining(&self, id: TimerId) -> u16 {
        self.slots[id.index()].remaining
    }

    /// Advance one slot by a tick, returning its callback if it expired now
    fn step(&mut self, id: TimerId) -> Option<TimerFn> {
        let slot = &mut self.slots[id.index()];
        if !slot.active {
            return None;
        }
        slot.remaining = slot.remaining.saturating_sub(1);
        if slot.remaining > 0 {
            return None;
        }
        slot.active = false;
        log::trace!("timer {:?} expired", id);
        slot.callback
    }
}

/// One scheduler step: fire every timer that reaches zero, in slot order
pub fn run_timers(state: &mut GameState) {
    for id in TimerId::ALL {
        if let Some(callback) = state.timers.step(id) {
            callback(state);
        }
    }
}
