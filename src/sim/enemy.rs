//! Enemies walking the street
//!
//! Every enemy is a small state machine. Transient states (being hit,
//! resting after an attack, walking away to make room) push the state they
//! interrupt onto a short resume stack and pop it when they are done, so the
//! enemy continues exactly where it left off.

use super::collision::{Lane, Rect};
use super::numbers;
use super::pool::{Pool, Slot};
use super::state::{GameState, SimRng};
use super::timer::TimerId;
use crate::consts::*;

/// Blink duration after a hit
pub const HIT_BLINK_TICKS: u8 = FPS as u8;
/// Blink duration before a dead enemy is removed
pub const DYING_TICKS: u8 = FPS as u8;
/// Poison stacks applied while the player is poisoned
pub const POISON_STACKS: u8 = 4;
pub const POISON_INTERVAL: u16 = FPS * 2;
pub const POISON_DAMAGE: u16 = 2;
/// Movement cadence multiplier while standing in oil
pub const SLOWDOWN_FACTOR: u8 = 8;
/// Vicious idle action length
pub const SPECIAL_TICKS: u8 = (FPS * 2) as u8;
/// Thief hacking session and penalty cadence
pub const HACK_TICKS: u8 = (FPS * 3) as u8;
pub const HACK_INTERVAL: u8 = (FPS / 2) as u8;
pub const HACK_PENALTY: i32 = 5;
/// Resume stack depth
pub const STACK_DEPTH: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnemyKind {
    #[default]
    Vicious,
    Boss,
    Peaceful,
    Thief,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Species {
    #[default]
    Raider,
    DrunkenPunk,
    Hacker,
    Boss1,
    Boss2,
    Grandma,
    LittleGirl,
}

/// Fixed numbers of a species
#[derive(Debug, Clone, Copy)]
pub struct SpeciesProfile {
    pub kind: EnemyKind,
    pub life: i16,
    /// Damage per completed attack on the door
    pub damage: i16,
    /// Ticks between movement steps
    pub move_ticks: u8,
    /// Ticks resting/swearing
    pub rest_ticks: u8,
    /// Ticks per animation frame
    pub anim_ticks: u8,
    /// Score awarded on death, negative for innocent bystanders
    pub score: i32,
    pub width: i16,
    pub height: i16,
}

impl Species {
    /// Species for a draw in `0..100`
    pub fn roll(r: u16) -> Self {
        match r {
            0..9 => Species::Grandma,
            9..18 => Species::LittleGirl,
            18..30 => Species::DrunkenPunk,
            30..60 => Species::Hacker,
            _ => Species::Raider,
        }
    }

    pub fn kind(self) -> EnemyKind {
        self.profile().kind
    }

    pub fn profile(self) -> SpeciesProfile {
        let fps = FPS as u8;
        let (kind, life, damage, move_ticks, rest_ticks, score, width, height) = match self {
            Species::Raider => (EnemyKind::Vicious, 16, 1, fps / 20, fps * 2, 10, 12, 20),
            Species::DrunkenPunk => (EnemyKind::Vicious, 16, 1, fps / 20, fps, 10, 12, 20),
            Species::Hacker => (EnemyKind::Thief, 16, 0, fps / 20, fps, 10, 12, 18),
            Species::Boss1 => (EnemyKind::Boss, 64, 10, fps / 10, fps * 2, 200, 16, 24),
            Species::Boss2 => (EnemyKind::Boss, 64, 20, fps / 10, fps * 2, 200, 16, 24),
            Species::Grandma => (EnemyKind::Peaceful, 32, 0, fps / 5, 6, -100, 10, 16),
            Species::LittleGirl => (EnemyKind::Peaceful, 32, 0, fps / 3, 0, -500, 8, 12),
        };
        SpeciesProfile {
            kind,
            life,
            damage,
            move_ticks,
            rest_ticks,
            anim_ticks: fps / 5,
            score,
            width,
            height,
        }
    }

    /// Animation frames per cycle in `state`
    pub fn frame_reload(self, state: EnemyState) -> u8 {
        match (self, state) {
            (Species::LittleGirl, EnemyState::RestingSwearing) => 12,
            _ => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnemyState {
    ApproachDoor,
    #[default]
    WalkingLeft,
    WalkingRight,
    Attacking,
    RestingSwearing,
    Special,
    Dying,
    Dead,
}

impl EnemyState {
    pub fn is_alive(self) -> bool {
        !matches!(self, EnemyState::Dying | EnemyState::Dead)
    }

    /// First sprite frame of this state for a kind of enemy
    pub fn sprite_offset(self, kind: EnemyKind) -> u8 {
        match (kind, self) {
            (EnemyKind::Peaceful, EnemyState::RestingSwearing) => 4,
            (EnemyKind::Peaceful, _) => 0,
            (_, EnemyState::Attacking) => 4,
            (_, EnemyState::RestingSwearing) => 8,
            _ => 0,
        }
    }
}

/// Bounded LIFO of interrupted states
#[derive(Debug, Clone, Copy, Default)]
pub struct ResumeStack {
    states: [EnemyState; STACK_DEPTH],
    len: u8,
}

impl ResumeStack {
    /// Push; a full stack is a leak, release builds drop the oldest entry
    pub fn push(&mut self, state: EnemyState) {
        debug_assert!((self.len as usize) < STACK_DEPTH, "resume stack overflow");
        if self.len as usize == STACK_DEPTH {
            log::debug!("resume stack full, dropping {:?}", self.states[0]);
            self.states.rotate_left(1);
            self.len -= 1;
        }
        self.states[self.len as usize] = state;
        self.len += 1;
    }

    /// Pop; an empty stack yields `None` and stays empty
    pub fn pop(&mut self) -> Option<EnemyState> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        Some(self.states[self.len as usize])
    }

    pub fn flush(&mut self) {
        self.len = 0;
    }

    pub fn depth(&self) -> usize {
        self.len as usize
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Enemy {
    pub active: bool,
    pub life: i16,
    pub x: i16,
    pub y: i16,
    pub species: Species,
    pub kind: EnemyKind,
    pub lane: Lane,
    /// Lane the enemy is switching to
    pub dest_lane: Lane,
    /// Where a retreat ends
    pub dest_x: i16,
    pub state: EnemyState,
    pub stack: ResumeStack,
    pub frame: u8,
    pub frame_reload: u8,
    anim_timer: u8,
    pub move_timer: u8,
    pub rest_timer: u8,
    /// Blink ticks left
    pub hit: u8,
    pub poison_stacks: u8,
    poison_timer: u16,
    /// Oil slowdown ticks left
    pub slowdown: u16,
    /// x where a vicious enemy idles or a thief starts hacking
    pub special_x: Option<i16>,
    hack_timer: u8,
}

impl Slot for Enemy {
    fn is_active(&self) -> bool {
        self.active
    }
}

pub type Enemies = Pool<Enemy, MAX_ENEMIES>;

/// x at which an attacker leaves its lane for the door
#[inline]
pub fn door_trigger_x(lane: Lane) -> i16 {
    6 + lane.y() - Lane::Door.y()
}

impl Enemy {
    /// Fresh enemy entering at the right screen edge
    pub fn new(species: Species, lane: Lane) -> Self {
        let p = species.profile();
        let mut e = Self {
            active: true,
            life: p.life,
            x: WIDTH,
            y: lane.y() - p.height,
            species,
            kind: p.kind,
            lane,
            dest_lane: lane,
            move_timer: p.move_ticks,
            rest_timer: p.rest_ticks,
            anim_timer: p.anim_ticks,
            ..Default::default()
        };
        e.set_state(EnemyState::WalkingLeft);
        e
    }

    pub fn profile(&self) -> SpeciesProfile {
        self.species.profile()
    }

    pub fn rect(&self) -> Rect {
        let p = self.profile();
        Rect::new(self.x, self.y, p.width, p.height)
    }

    /// Sprite frame index including the per-state offset
    pub fn sprite_frame(&self) -> u8 {
        self.frame + self.state.sprite_offset(self.kind)
    }

    /// Enter `state` without remembering the current one
    pub fn set_state(&mut self, state: EnemyState) {
        self.state = state;
        self.frame_reload = self.species.frame_reload(state);
        self.frame = 0;
    }

    /// Enter `state`, remembering the current one
    pub fn interrupt(&mut self, state: EnemyState) {
        self.stack.push(self.state);
        self.set_state(state);
    }

    /// Return to the interrupted state, or keep walking if none is left
    pub fn resume(&mut self) {
        match self.stack.pop() {
            Some(prev) => self.set_state(prev),
            None => {
                log::debug!("{:?} resumed with empty stack", self.species);
                self.set_state(EnemyState::WalkingLeft);
            }
        }
    }

    /// Step diagonally toward `lane`; true once standing on it
    pub fn switch_lane(&mut self, lane: Lane) -> bool {
        let target = lane.y() - self.profile().height;
        if self.y == target {
            self.lane = lane;
            return true;
        }
        if self.move_timer > 0 {
            return false;
        }
        if self.state == EnemyState::WalkingRight {
            self.x += 1;
        } else {
            self.x -= 1;
        }
        self.y += (target - self.y).signum();
        false
    }

    /// Pick a random street lane and a point to the right to walk back to
    pub fn prepare_retreat(&mut self, rng: &mut SimRng) {
        let width = self.profile().width;
        self.dest_lane = Lane::street(rng.below(2));
        let min = (self.lane.y() - self.dest_lane.y()).abs() + width + 1;
        let span = (WIDTH - 2 * min - self.x).max(1);
        self.dest_x = (self.x + min + rng.below(span as u16) as i16).min(WIDTH - width);
    }

    /// Leave the door to a boss: forget everything and walk away
    pub fn displace(&mut self, rng: &mut SimRng) {
        self.stack.flush();
        self.prepare_retreat(rng);
        self.set_state(EnemyState::WalkingLeft);
        self.interrupt(EnemyState::WalkingRight);
    }
}

/// Put a new enemy on the street if the stage allows it
///
/// A pending boss wave forces the boss regardless of the random draw.
pub fn spawn(state: &mut GameState) -> Option<usize> {
    let roll = state.rng.below(100);
    let species = if state.stage.next_spawn_is_boss() {
        state.stage.descriptor().boss
    } else {
        Species::roll(roll)
    };
    let kind = species.kind();
    if !state.stage.permits(kind) {
        log::trace!("{:?} not permitted, stage population full", kind);
        return None;
    }

    let lane = Lane::street(state.rng.below(2));
    let mut enemy = Enemy::new(species, lane);
    let width = enemy.profile().width;
    let wants_special = match kind {
        EnemyKind::Thief => true,
        EnemyKind::Vicious => lane == Lane::Upper && state.rng.below(2) == 0,
        _ => false,
    };
    if wants_special {
        let x = WIDTH - 2 * width - state.rng.below(64) as i16;
        enemy.special_x = Some(x.max(door_trigger_x(Lane::Lower) + width));
    }

    let index = state.enemies.allocate(enemy)?;
    state.stage.on_spawn(kind);
    log::debug!("spawned {:?} in slot {} on {:?} lane", species, index, lane);
    Some(index)
}

/// Timer callback: spawn and re-arm
pub fn spawn_new_enemies(state: &mut GameState) {
    spawn(state);
    state.timers.start(TimerId::EnemySpawn, ENEMIES_SPAWN_RATE);
}

/// Advance every live enemy by one tick
pub fn update(state: &mut GameState) {
    for i in 0..MAX_ENEMIES {
        if state.enemies[i].active {
            update_enemy(state, i);
        }
    }
}

fn apply_damage(e: &mut Enemy, index: usize, damage: u16, state: &mut GameState) {
    e.life -= damage as i16;
    if e.kind != EnemyKind::Peaceful {
        e.hit = HIT_BLINK_TICKS;
    }

    if e.life <= 0 {
        state.door.release_if(index);
        e.stack.flush();
        e.set_state(EnemyState::Dying);
        e.hit = DYING_TICKS;
        log::debug!("{:?} in slot {} is down", e.species, index);
        return;
    }

    match (e.kind, e.state) {
        (_, EnemyState::RestingSwearing) => {}
        (EnemyKind::Thief, EnemyState::Special) => e.rest_timer = 0,
        (_, EnemyState::Special) => {}
        (EnemyKind::Peaceful, _) => e.interrupt(EnemyState::RestingSwearing),
        _ => {}
    }
}

fn update_enemy(state: &mut GameState, i: usize) {
    let mut e = state.enemies[i];
    let p = e.profile();

    if e.state.is_alive() {
        let bullet_damage = state.armory.damage_at(e.lane, e.rect());
        let mut damage = bullet_damage;
        if e.poison_stacks > 0 {
            if e.poison_timer > 0 {
                e.poison_timer -= 1;
            } else {
                damage += POISON_DAMAGE;
                e.poison_timer = POISON_INTERVAL;
                e.poison_stacks -= 1;
            }
        }
        // a poisoned player poisons whatever they hit
        if bullet_damage > 0 && state.player.poisoned {
            e.poison_stacks = POISON_STACKS;
        }
        if damage > 0 {
            apply_damage(&mut e, i, damage, state);
        }
    }
    if e.state.is_alive() {
        state.armory.effect_near(e.lane, &mut e);
    }

    match e.state {
        EnemyState::WalkingLeft => {
            if e.move_timer > 0 {
                // wait for the next step
            } else if e.kind == EnemyKind::Peaceful || e.kind == EnemyKind::Thief {
                if e.x <= -p.width {
                    state.enemies.free(i);
                    state.stage.on_leave(e.kind);
                    return;
                }
                match e.special_x {
                    Some(sx) if e.kind == EnemyKind::Thief && e.x <= sx => {
                        e.special_x = None;
                        e.interrupt(EnemyState::Special);
                        e.rest_timer = HACK_TICKS;
                        e.hack_timer = HACK_INTERVAL;
                    }
                    _ => e.x -= 1,
                }
            } else {
                match e.special_x {
                    Some(sx) if e.x <= sx => {
                        e.special_x = None;
                        e.interrupt(EnemyState::Special);
                        e.rest_timer = SPECIAL_TICKS;
                    }
                    _ if e.x <= door_trigger_x(e.lane) => e.interrupt(EnemyState::ApproachDoor),
                    _ => e.x -= 1,
                }
            }
        }
        EnemyState::ApproachDoor => approach_door(state, &mut e, i),
        EnemyState::WalkingRight => {
            if e.move_timer == 0 && e.switch_lane(e.dest_lane) {
                if e.x >= e.dest_x {
                    e.resume();
                } else {
                    e.x += 1;
                }
            }
        }
        EnemyState::Attacking => {
            if e.frame + 1 == e.frame_reload && e.anim_timer == 0 {
                state.player.life -= p.damage;
                e.interrupt(EnemyState::RestingSwearing);
            }
        }
        EnemyState::RestingSwearing => {
            let cycle_done = e.kind != EnemyKind::Peaceful || e.frame + 1 >= e.frame_reload;
            if cycle_done {
                if e.rest_timer == 0 {
                    e.rest_timer = p.rest_ticks;
                    e.resume();
                } else {
                    e.rest_timer -= 1;
                }
            }
        }
        EnemyState::Special => {
            if e.rest_timer == 0 {
                e.rest_timer = p.rest_ticks;
                e.resume();
            } else {
                e.rest_timer -= 1;
                if e.kind == EnemyKind::Thief {
                    if e.hack_timer == 0 {
                        e.hack_timer = HACK_INTERVAL;
                        state.player.add_score(-HACK_PENALTY);
                        numbers::spawn(&mut state.numbers, e.x, e.y, -HACK_PENALTY);
                    } else {
                        e.hack_timer -= 1;
                    }
                }
            }
        }
        EnemyState::Dying => {
            if e.hit == 0 {
                e.set_state(EnemyState::Dead);
            }
        }
        EnemyState::Dead => {
            state.player.add_score(p.score);
            numbers::spawn(&mut state.numbers, e.x, e.y, p.score);
            state.stage.on_kill(e.kind);
            state.enemies.free(i);
            return;
        }
    }

    if e.anim_timer == 0 {
        e.anim_timer = p.anim_ticks;
        e.frame += 1;
        if e.frame >= e.frame_reload {
            e.frame = 0;
        }
    } else {
        e.anim_timer -= 1;
    }

    if e.move_timer == 0 {
        if e.state.is_alive() {
            e.move_timer = if e.slowdown > 0 {
                p.move_ticks * SLOWDOWN_FACTOR
            } else {
                p.move_ticks
            };
        }
    } else {
        e.move_timer -= 1;
    }
    e.slowdown = e.slowdown.saturating_sub(1);
    e.hit = e.hit.saturating_sub(1);

    state.enemies[i] = e;
}

/// Door arbitration for an enemy that reached the door trigger
fn approach_door(state: &mut GameState, e: &mut Enemy, i: usize) {
    if state.door.held_by_other(i) {
        if e.kind != EnemyKind::Boss {
            // door is busy, take a walk
            e.prepare_retreat(&mut state.rng);
            e.set_state(EnemyState::WalkingRight);
            return;
        }
        if let Some(a) = state.door.holder() {
            log::debug!("boss in slot {} pushes slot {} off the door", i, a);
            let GameState { enemies, rng, .. } = state;
            enemies[a].displace(rng);
        }
    }

    state.door.claim(i);
    e.dest_lane = Lane::Door;
    if e.switch_lane(Lane::Door) {
        // the walk is over for good, drop it
        e.stack.pop();
        e.set_state(EnemyState::Attacking);
    }
}
