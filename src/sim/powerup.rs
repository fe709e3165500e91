//! Collectible power-ups
//!
//! Each slot owns a respawn timer. A power-up sits on the street for a while
//! and is collected by hitting it with any bullet.

use super::collision::{Lane, Rect};
use super::numbers;
use super::pool::{Pool, Slot};
use super::state::GameState;
use super::timer::{TimerFn, TimerId};
use crate::consts::*;

/// Life restored by a life power-up
pub const LIFE_BONUS: i16 = 32;
/// Score added by a score power-up
pub const SCORE_BONUS: i32 = 100;
/// Ticks per animation frame
pub const ANIM_TICKS: u8 = (FPS / 4) as u8;
pub const FRAMES: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PowerUpKind {
    #[default]
    Life,
    Poison,
    Score,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [PowerUpKind::Life, PowerUpKind::Poison, PowerUpKind::Score];
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PowerUp {
    pub active: bool,
    pub kind: PowerUpKind,
    pub x: i16,
    pub y: i16,
    pub lane: Lane,
    pub frame: u8,
    anim_timer: u8,
    /// Ticks left on the street
    pub lifetime: u16,
}

impl Slot for PowerUp {
    fn is_active(&self) -> bool {
        self.active
    }
}

impl PowerUp {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, POWERUP_SIZE, POWERUP_SIZE)
    }
}

/// Slot-indexed; slot `i` is driven by `TimerId::powerup_spawn(i)`
pub type PowerUps = Pool<PowerUp, MAX_POWERUPS>;

/// Respawn callback bound to a slot's timer
pub fn spawn_callback(slot: usize) -> TimerFn {
    match slot {
        0 => spawn_slot0,
        _ => spawn_slot1,
    }
}

fn spawn_slot0(state: &mut GameState) {
    spawn(state, 0);
}

fn spawn_slot1(state: &mut GameState) {
    spawn(state, 1);
}

/// Put a random power-up into `slot`
pub fn spawn(state: &mut GameState, slot: usize) {
    let kind = PowerUpKind::ALL[state.rng.below(PowerUpKind::ALL.len() as u16) as usize];
    let lane = Lane::street(state.rng.below(2));
    let lifetime = (state.rng.below(4) + 4) * FPS;
    let x = state.rng.below((WIDTH - POWERUP_SIZE) as u16) as i16;
    state.powerups[slot] = PowerUp {
        active: true,
        kind,
        x,
        y: lane.y() - POWERUP_SIZE,
        lane,
        frame: 0,
        anim_timer: ANIM_TICKS,
        lifetime,
    };
    log::debug!("{:?} power-up in slot {} at x={} for {} ticks", kind, slot, x, lifetime);
}

/// Deactivate `slot` and arm its respawn timer
fn expire(state: &mut GameState, slot: usize) {
    state.powerups.free(slot);
    let delay = (state.rng.below(8) + 4) * FPS;
    state.timers.start(TimerId::powerup_spawn(slot), delay);
}

fn collect(state: &mut GameState, p: PowerUp) {
    let value = match p.kind {
        PowerUpKind::Life => {
            state.player.heal(LIFE_BONUS);
            LIFE_BONUS as i32
        }
        PowerUpKind::Poison => {
            state.player.set_poison();
            // seconds of poison, shown as a penalty
            -((PLAYER_POISON_TICKS / FPS) as i32)
        }
        PowerUpKind::Score => {
            state.player.add_score(SCORE_BONUS);
            SCORE_BONUS
        }
    };
    numbers::spawn(&mut state.numbers, p.x, p.y, value);
    log::debug!("{:?} power-up collected", p.kind);
}

pub fn update(state: &mut GameState) {
    for slot in 0..MAX_POWERUPS {
        let p = &mut state.powerups[slot];
        if !p.active {
            continue;
        }

        if p.anim_timer == 0 {
            p.anim_timer = ANIM_TICKS;
            p.frame = (p.frame + 1) % FRAMES;
        } else {
            p.anim_timer -= 1;
        }

        p.lifetime = p.lifetime.saturating_sub(1);
        let p = *p;

        if state.armory.damage_at(p.lane, p.rect()) > 0 {
            collect(state, p);
            expire(state, slot);
        } else if p.lifetime == 0 {
            expire(state, slot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::weapon::{Bullet, BulletState, Weapon};

    fn quiet_state() -> GameState {
        let mut state = GameState::new(5);
        state.timers.clear();
        state
    }

    fn place(state: &mut GameState, kind: PowerUpKind, lifetime: u16) {
        state.powerups[0] = PowerUp {
            active: true,
            kind,
            x: 60,
            y: Lane::Upper.y() - POWERUP_SIZE,
            lane: Lane::Upper,
            lifetime,
            ..Default::default()
        };
    }

    fn shoot_at(state: &mut GameState) {
        let p = state.powerups[0];
        let bullet = Bullet {
            x: p.x + 1,
            y: p.y + 1,
            state: BulletState::Active,
            weapon: Weapon::Water,
            lane: p.lane,
            effect_ticks: Weapon::Water.effect_ticks(),
            ..Default::default()
        };
        state.armory.bullets.allocate(bullet).unwrap();
    }

    #[test]
    fn test_unhit_powerup_expires_on_time_and_rearms() {
        let mut state = quiet_state();
        let lifetime = 5 * FPS;
        place(&mut state, PowerUpKind::Score, lifetime);

        for _ in 0..lifetime - 1 {
            update(&mut state);
        }
        assert!(state.powerups[0].active);
        assert!(!state.timers.is_active(TimerId::PowerupSpawn0));

        update(&mut state);
        assert!(!state.powerups[0].active);
        assert!(state.timers.is_active(TimerId::PowerupSpawn0));
        let delay = state.timers.remaining(TimerId::PowerupSpawn0);
        assert!((4 * FPS..12 * FPS).contains(&delay));
    }

    #[test]
    fn test_life_powerup_heals_capped() {
        let mut state = quiet_state();
        state.player.life = PLAYER_MAX_LIFE - 10;
        place(&mut state, PowerUpKind::Life, 100);
        shoot_at(&mut state);
        update(&mut state);
        assert_eq!(state.player.life, PLAYER_MAX_LIFE);
        assert!(!state.powerups[0].active);
        assert_eq!(state.numbers.active_count(), 1);
    }

    #[test]
    fn test_poison_and_score_powerups() {
        let mut state = quiet_state();
        place(&mut state, PowerUpKind::Poison, 100);
        shoot_at(&mut state);
        update(&mut state);
        assert!(state.player.poisoned);
        assert_eq!(state.player.score, 0);
        let (_, n) = state.numbers.iter_active().next().unwrap();
        assert_eq!(n.value, -((PLAYER_POISON_TICKS / FPS) as i32));

        place(&mut state, PowerUpKind::Score, 100);
        state.armory = Default::default();
        shoot_at(&mut state);
        update(&mut state);
        assert_eq!(state.player.score, SCORE_BONUS);
    }

    #[test]
    fn test_timer_spawns_into_its_slot() {
        let mut state = quiet_state();
        state.timers.setup(TimerId::PowerupSpawn1, spawn_callback(1));
        state.timers.start(TimerId::PowerupSpawn1, 0);
        crate::sim::timer::run_timers(&mut state);
        let p = state.powerups[1];
        assert!(p.active);
        assert!(!state.powerups[0].active);
        assert!((4 * FPS..8 * FPS).contains(&p.lifetime));
        assert_eq!(p.y, p.lane.y() - POWERUP_SIZE);
    }
}
