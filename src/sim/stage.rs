//! Stage and boss wave progression
//!
//! A fixed table of stages drives the difficulty. Killing enough enemies arms
//! a boss wave; killing that boss moves on to the next stage, and killing the
//! last stage's boss wins the game.

use super::enemy::{EnemyKind, Species};
use crate::consts::FPS;

/// How long a banner stays on screen
pub const BANNER_TICKS: u16 = FPS * 2;

/// One row of the stage table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageDescriptor {
    /// Kills needed before the boss shows up
    pub kills: u8,
    pub max_vicious: u8,
    pub max_peaceful: u8,
    pub max_thief: u8,
    pub boss: Species,
}

pub const STAGES: [StageDescriptor; 4] = [
    StageDescriptor {
        kills: 6,
        max_vicious: 2,
        max_peaceful: 1,
        max_thief: 1,
        boss: Species::Boss1,
    },
    StageDescriptor {
        kills: 10,
        max_vicious: 3,
        max_peaceful: 1,
        max_thief: 1,
        boss: Species::Boss1,
    },
    StageDescriptor {
        kills: 14,
        max_vicious: 3,
        max_peaceful: 2,
        max_thief: 1,
        boss: Species::Boss2,
    },
    StageDescriptor {
        kills: 18,
        max_vicious: 4,
        max_peaceful: 2,
        max_thief: 2,
        boss: Species::Boss2,
    },
];

/// On-screen announcement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Banner {
    /// Stage number, 1-based
    Stage(u8),
    Boss,
}

#[derive(Debug, Clone)]
pub struct StageController {
    /// Row of [`STAGES`] in play
    pub index: usize,
    pub kills_remaining: u8,
    /// Live enemies per kind
    population: [u8; 4],
    /// Next spawn must be the boss; stays set until the boss dies
    pub boss_pending: bool,
    /// The pending boss is on the street
    pub boss_spawned: bool,
    boss_defeated: bool,
    pub banner: Option<Banner>,
    pub banner_ticks: u16,
    /// Final boss is down
    pub cleared: bool,
}

impl Default for StageController {
    fn default() -> Self {
        Self::new()
    }
}

impl StageController {
    pub fn new() -> Self {
        Self {
            index: 0,
            kills_remaining: STAGES[0].kills,
            population: [0; 4],
            boss_pending: false,
            boss_spawned: false,
            boss_defeated: false,
            banner: Some(Banner::Stage(1)),
            banner_ticks: BANNER_TICKS,
            cleared: false,
        }
    }

    pub fn descriptor(&self) -> &'static StageDescriptor {
        &STAGES[self.index]
    }

    pub fn population(&self, kind: EnemyKind) -> u8 {
        self.population[kind as usize]
    }

    /// Whether another enemy of `kind` may enter the street
    pub fn permits(&self, kind: EnemyKind) -> bool {
        let d = self.descriptor();
        let cap = match kind {
            EnemyKind::Vicious => d.max_vicious,
            EnemyKind::Peaceful => d.max_peaceful,
            EnemyKind::Thief => d.max_thief,
            EnemyKind::Boss => return self.boss_pending && !self.boss_spawned,
        };
        self.population(kind) < cap
    }

    /// Whether the next spawn is forced to be the boss
    pub fn next_spawn_is_boss(&self) -> bool {
        self.boss_pending && !self.boss_spawned
    }

    pub fn on_spawn(&mut self, kind: EnemyKind) {
        self.population[kind as usize] += 1;
        if kind == EnemyKind::Boss {
            self.boss_spawned = true;
        }
    }

    /// An enemy left the street without dying
    pub fn on_leave(&mut self, kind: EnemyKind) {
        let n = &mut self.population[kind as usize];
        *n = n.saturating_sub(1);
    }

    /// An enemy finished dying
    pub fn on_kill(&mut self, kind: EnemyKind) {
        self.on_leave(kind);
        if kind == EnemyKind::Boss {
            self.boss_defeated = true;
        } else if !self.boss_pending {
            self.kills_remaining = self.kills_remaining.saturating_sub(1);
        }
    }

    pub fn update(&mut self) {
        if self.banner_ticks > 0 {
            self.banner_ticks -= 1;
            if self.banner_ticks == 0 {
                self.banner = None;
            }
        }

        if self.boss_defeated {
            self.boss_defeated = false;
            self.boss_pending = false;
            self.boss_spawned = false;
            if self.index + 1 < STAGES.len() {
                self.index += 1;
                self.kills_remaining = STAGES[self.index].kills;
                self.show(Banner::Stage(self.index as u8 + 1));
                log::info!("Stage {} begins", self.index + 1);
            } else {
                self.cleared = true;
                log::info!("Final boss defeated");
            }
        }

        if !self.cleared && self.kills_remaining == 0 && !self.boss_pending {
            self.boss_pending = true;
            self.show(Banner::Boss);
            log::info!("Boss wave armed in stage {}", self.index + 1);
        }
    }

    fn show(&mut self, banner: Banner) {
        self.banner = Some(banner);
        self.banner_ticks = BANNER_TICKS;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kill_quota(stage: &mut StageController) {
        for _ in 0..stage.kills_remaining {
            stage.on_spawn(EnemyKind::Vicious);
            stage.on_kill(EnemyKind::Vicious);
        }
    }

    #[test]
    fn test_caps_follow_table() {
        let mut stage = StageController::new();
        assert!(stage.permits(EnemyKind::Vicious));
        stage.on_spawn(EnemyKind::Vicious);
        stage.on_spawn(EnemyKind::Vicious);
        assert!(!stage.permits(EnemyKind::Vicious));
        stage.on_leave(EnemyKind::Vicious);
        assert!(stage.permits(EnemyKind::Vicious));
        assert!(!stage.permits(EnemyKind::Boss));
    }

    #[test]
    fn test_quota_arms_boss_wave() {
        let mut stage = StageController::new();
        kill_quota(&mut stage);
        stage.update();
        assert!(stage.boss_pending);
        assert!(stage.next_spawn_is_boss());
        assert_eq!(stage.banner, Some(Banner::Boss));

        // kills during the boss wave do not count
        stage.on_spawn(EnemyKind::Boss);
        stage.on_spawn(EnemyKind::Vicious);
        stage.on_kill(EnemyKind::Vicious);
        assert_eq!(stage.kills_remaining, 0);
        assert!(!stage.next_spawn_is_boss());
        stage.update();
        assert!(stage.boss_pending);
    }

    #[test]
    fn test_boss_kill_advances_stage() {
        let mut stage = StageController::new();
        kill_quota(&mut stage);
        stage.update();
        stage.on_spawn(EnemyKind::Boss);
        stage.on_kill(EnemyKind::Boss);
        stage.update();
        assert_eq!(stage.index, 1);
        assert!(!stage.boss_pending);
        assert_eq!(stage.kills_remaining, STAGES[1].kills);
        assert_eq!(stage.banner, Some(Banner::Stage(2)));
        assert_eq!(stage.population(EnemyKind::Boss), 0);
    }

    #[test]
    fn test_last_boss_clears_game() {
        let mut stage = StageController::new();
        for _ in 0..STAGES.len() {
            kill_quota(&mut stage);
            stage.update();
            stage.on_spawn(EnemyKind::Boss);
            stage.on_kill(EnemyKind::Boss);
            stage.update();
        }
        assert!(stage.cleared);
        assert!(!stage.boss_pending);
        assert_eq!(stage.index, STAGES.len() - 1);
    }

    #[test]
    fn test_banner_expires() {
        let mut stage = StageController::new();
        for _ in 0..BANNER_TICKS {
            stage.update();
        }
        assert_eq!(stage.banner, None);
    }
}
