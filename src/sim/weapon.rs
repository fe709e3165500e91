//! Throwable weapons and the bullet pool
//!
//! Ammo is conserved: for every weapon, the ammo still in hand plus the
//! bullets of that weapon that are not inactive always equals its max ammo.
//! A bullet only hands its ammo back once its ground effect has run out.

use super::collision::{Lane, Rect};
use super::enemy::Enemy;
use super::pool::{Pool, Slot};
use crate::consts::*;
use crate::within_band;

/// Bullet pool capacity, one slot per unit of ammo
pub const NR_BULLETS: usize = 16 + 4 + 2 + 1;
/// Residual ground time after a direct hit
pub const SPLASH_TICKS: u16 = FPS / 4;
/// Horizontal reach of explosions and oil slicks
pub const BLAST_RADIUS: i16 = 30;
/// Ticks an oil slick slows an enemy down
pub const OIL_SLOWDOWN_TICKS: u16 = FPS * 5;
/// Ticks the selected weapon icon stays on screen
pub const ICON_TICKS: u8 = FPS as u8;

/// How a bullet turns into damage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamagePolicy {
    /// Airborne bullet overlapping the target, consumed on hit
    DirectHit,
    /// One-shot pulse on the tick the bullet lands
    Explosion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Weapon {
    #[default]
    Water,
    Poo,
    Oil,
    Molotov,
}

pub const NR_WEAPONS: usize = 4;

impl Weapon {
    pub const ALL: [Weapon; NR_WEAPONS] =
        [Weapon::Water, Weapon::Poo, Weapon::Oil, Weapon::Molotov];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn max_ammo(self) -> u8 {
        match self {
            Weapon::Water => 16,
            Weapon::Poo => 4,
            Weapon::Oil => 2,
            Weapon::Molotov => 1,
        }
    }

    /// Minimum ticks between two throws
    pub fn cooldown(self) -> u16 {
        match self {
            Weapon::Water | Weapon::Poo => FPS / 3,
            Weapon::Oil => FPS * 5,
            Weapon::Molotov => FPS * 10,
        }
    }

    pub fn damage(self) -> u16 {
        match self {
            Weapon::Water | Weapon::Oil => 1,
            Weapon::Poo => 4,
            Weapon::Molotov => 16,
        }
    }

    /// Ticks the weapon stays on the ground after landing
    pub fn effect_ticks(self) -> u16 {
        match self {
            Weapon::Water | Weapon::Poo => FPS / 2,
            Weapon::Oil => FPS * 3,
            Weapon::Molotov => FPS * 2,
        }
    }

    pub fn policy(self) -> DamagePolicy {
        match self {
            Weapon::Molotov => DamagePolicy::Explosion,
            _ => DamagePolicy::DirectHit,
        }
    }

    /// Cycle through the weapons, wrapping at both ends
    pub fn cycle(self, dir: i8) -> Self {
        let n = NR_WEAPONS as i8;
        let i = (self.index() as i8 + dir.signum()).rem_euclid(n);
        Self::ALL[i as usize]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BulletState {
    #[default]
    Inactive,
    /// In the air
    Active,
    /// Landed, ground effect running
    Effect,
    /// Burst on a target, short residual
    Splash,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Bullet {
    pub x: i16,
    pub y: i16,
    pub state: BulletState,
    pub weapon: Weapon,
    pub lane: Lane,
    pub frame: u8,
    pub frame_timer: u8,
    /// Remaining ground ticks
    pub effect_ticks: u16,
}

impl Slot for Bullet {
    fn is_active(&self) -> bool {
        self.state != BulletState::Inactive
    }
}

impl Bullet {
    /// Height at which the bullet lands on its lane
    #[inline]
    pub fn landing_y(&self) -> i16 {
        self.lane.y() - BULLET_SIZE
    }

    /// Damage dealt to `rect` this tick under the weapon's policy
    fn damage(&mut self, rect: &Rect) -> u16 {
        match self.weapon.policy() {
            DamagePolicy::DirectHit => {
                if self.state != BulletState::Active {
                    return 0;
                }
                let hit = rect.contains(self.x, self.y)
                    || rect.contains(self.x + BULLET_SIZE - 1, self.y + BULLET_SIZE - 1);
                if !hit {
                    return 0;
                }
                self.state = BulletState::Splash;
                self.effect_ticks = SPLASH_TICKS;
                self.frame = 0;
                self.weapon.damage()
            }
            DamagePolicy::Explosion => {
                if self.state != BulletState::Effect
                    || self.effect_ticks != self.weapon.effect_ticks()
                {
                    return 0;
                }
                if within_band(rect.x, self.x, BLAST_RADIUS) {
                    self.weapon.damage()
                } else {
                    0
                }
            }
        }
    }
}

/// Weapons in hand plus every bullet in flight or on the ground
#[derive(Debug, Clone)]
pub struct Armory {
    ammo: [u8; NR_WEAPONS],
    cooldown: [u16; NR_WEAPONS],
    pub bullets: Pool<Bullet, NR_BULLETS>,
    pub selected: Weapon,
    /// Ticks left showing the selected weapon icon
    pub icon_ticks: u8,
    /// Icon shows on the left edge when the player stands right
    pub icon_left: bool,
}

impl Default for Armory {
    fn default() -> Self {
        Self::new()
    }
}

impl Armory {
    pub fn new() -> Self {
        Self {
            ammo: Weapon::ALL.map(Weapon::max_ammo),
            cooldown: [0; NR_WEAPONS],
            bullets: Pool::new(),
            selected: Weapon::Water,
            icon_ticks: 0,
            icon_left: false,
        }
    }

    pub fn ammo(&self, weapon: Weapon) -> u8 {
        self.ammo[weapon.index()]
    }

    pub fn cooldown(&self, weapon: Weapon) -> u16 {
        self.cooldown[weapon.index()]
    }

    /// Throw `weapon` at `lane` from horizontal position `x`
    ///
    /// Returns false when out of ammo or still cooling down. A full bullet
    /// pool still reports a throw but nothing leaves the player's hand.
    pub fn fire(&mut self, lane: Lane, weapon: Weapon, x: i16) -> bool {
        let w = weapon.index();
        if self.ammo[w] == 0 || self.cooldown[w] > 0 {
            return false;
        }
        self.cooldown[w] = weapon.cooldown();

        let bullet = Bullet {
            x,
            y: BULLET_START_Y,
            state: BulletState::Active,
            weapon,
            lane,
            frame: 0,
            frame_timer: BULLET_FRAME_TIME,
            effect_ticks: weapon.effect_ticks(),
        };
        if self.bullets.allocate(bullet).is_some() {
            self.ammo[w] -= 1;
        } else {
            log::debug!("bullet pool exhausted, {:?} throw lost", weapon);
        }
        true
    }

    /// Cooldowns, flight, ground effects and bullet animation
    pub fn update(&mut self) {
        for cd in &mut self.cooldown {
            *cd = cd.saturating_sub(1);
        }
        self.icon_ticks = self.icon_ticks.saturating_sub(1);

        for i in 0..NR_BULLETS {
            let b = &mut self.bullets[i];
            match b.state {
                BulletState::Inactive => continue,
                BulletState::Active => {
                    b.y += 1;
                    if b.y >= b.landing_y() {
                        b.y = b.landing_y();
                        b.state = BulletState::Effect;
                        b.frame = 0;
                    }
                }
                BulletState::Effect | BulletState::Splash => {
                    if b.effect_ticks == 0 {
                        let weapon = b.weapon;
                        self.bullets.free(i);
                        self.ammo[weapon.index()] += 1;
                        continue;
                    }
                    b.effect_ticks -= 1;
                }
            }

            if b.frame_timer == 0 {
                b.frame_timer = BULLET_FRAME_TIME;
                b.frame = (b.frame + 1) % 4;
            } else {
                b.frame_timer -= 1;
            }
        }
    }

    /// Total damage the bullets deal to a target on `lane` covering `rect`
    pub fn damage_at(&mut self, lane: Lane, rect: Rect) -> u16 {
        let mut damage = 0;
        for (_, b) in self.bullets.iter_active_mut() {
            if b.lane.hits(lane) {
                damage += b.damage(&rect);
            }
        }
        damage
    }

    /// Slow `enemy` down if it stands near an oil slick on its lane
    pub fn effect_near(&self, lane: Lane, enemy: &mut Enemy) {
        if enemy.slowdown > 0 {
            return;
        }
        let slick = self.bullets.iter_active().any(|(_, b)| {
            b.weapon == Weapon::Oil
                && b.state == BulletState::Effect
                && b.lane.hits(lane)
                && within_band(enemy.x, b.x, BLAST_RADIUS)
        });
        if slick {
            enemy.slowdown = OIL_SLOWDOWN_TICKS;
        }
    }

    /// Change the selected weapon and flash its icon
    pub fn select(&mut self, dir: i8, player_x: i16) {
        self.selected = self.selected.cycle(dir);
        self.icon_ticks = ICON_TICKS;
        self.icon_left = player_x >= WIDTH / 2 - PLAYER_WIDTH / 2;
    }

    /// Ammo in hand plus bullets out, per weapon, equals max ammo
    pub fn ammo_conserved(&self) -> bool {
        Weapon::ALL.iter().all(|&w| {
            let out = self
                .bullets
                .iter_active()
                .filter(|(_, b)| b.weapon == w)
                .count();
            self.ammo[w.index()] as usize + out == w.max_ammo() as usize
        })
    }
}
