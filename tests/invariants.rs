//! Whole-game invariants under random input

use fatsche::platform::Buttons;
use fatsche::sim::{EnemyState, GamePhase, GameState, Lane, TickInput, Weapon, tick};
use proptest::prelude::*;

fn buttons(mask: u8) -> Buttons {
    Buttons {
        up: mask & 1 != 0,
        down: mask & 2 != 0,
        left: mask & 4 != 0,
        right: mask & 8 != 0,
        a: mask & 16 != 0,
        b: mask & 32 != 0,
    }
}

/// Expand held-button masks into per-tick input with edge-detected presses
fn inputs(masks: &[u8], idle_mode: bool) -> Vec<TickInput> {
    let mut prev = 0u8;
    masks
        .iter()
        .map(|&mask| {
            let input = TickInput {
                held: buttons(mask),
                pressed: buttons(mask & !prev),
                idle_mode,
            };
            prev = mask;
            input
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_invariants_hold_every_tick(
        seed in any::<u64>(),
        masks in prop::collection::vec(0u8..64, 1..900),
        idle_mode in any::<bool>(),
    ) {
        let mut state = GameState::new(seed);
        for input in inputs(&masks, idle_mode) {
            let before: Vec<Option<i16>> = state
                .enemies
                .slots()
                .iter()
                .map(|e| e.active.then_some(e.life))
                .collect();

            tick(&mut state, &input);

            prop_assert!(state.armory.ammo_conserved());
            prop_assert!(state.door_exclusive());
            for (i, e) in state.enemies.iter_active() {
                // settled states owe nothing, transient ones owe one resume
                let depth = e.stack.depth();
                match e.state {
                    EnemyState::WalkingLeft
                    | EnemyState::Attacking
                    | EnemyState::Dying
                    | EnemyState::Dead => {
                        prop_assert_eq!(depth, 0, "{:?} in slot {} left a resume", e.state, i);
                    }
                    _ => prop_assert!(depth <= 1, "{:?} in slot {} stacked {}", e.state, i, depth),
                }
                if let Some(life) = before[i] {
                    prop_assert!(e.life <= life, "enemy {} healed", i);
                }
            }
            prop_assert!(state.player.life <= fatsche::consts::PLAYER_MAX_LIFE);
            prop_assert!(state.player.score >= 0);

            if state.phase != GamePhase::Running {
                break;
            }
        }
    }

    #[test]
    fn prop_same_seed_same_game(
        seed in any::<u64>(),
        masks in prop::collection::vec(0u8..64, 1..300),
    ) {
        let mut a = GameState::new(seed);
        let mut b = GameState::new(seed);
        for input in inputs(&masks, false) {
            tick(&mut a, &input);
            tick(&mut b, &input);
        }
        prop_assert_eq!(a.phase, b.phase);
        prop_assert_eq!(a.player.score, b.player.score);
        prop_assert_eq!(a.player.life, b.player.life);
        prop_assert_eq!(a.player.x, b.player.x);
        prop_assert_eq!(a.enemies.active_count(), b.enemies.active_count());
        prop_assert_eq!(a.armory.bullets.active_count(), b.armory.bullets.active_count());
    }
}

#[test]
fn test_double_fire_with_last_round() {
    let mut state = GameState::new(1);
    let x = state.player.throw_x();
    assert_eq!(Weapon::Molotov.max_ammo(), 1);
    assert!(state.armory.fire(Lane::Upper, Weapon::Molotov, x));
    assert!(!state.armory.fire(Lane::Lower, Weapon::Molotov, x));
    assert_eq!(state.armory.ammo(Weapon::Molotov), 0);
    let molotovs = state
        .armory
        .bullets
        .iter_active()
        .filter(|(_, b)| b.weapon == Weapon::Molotov)
        .count();
    assert_eq!(molotovs, 1);
    assert!(state.check_invariants());
}

#[test]
fn test_full_autopilot_run_ends_cleanly() {
    let mut state = GameState::new(31337);
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    let mut ticks = 0u64;
    while state.phase == GamePhase::Running && ticks < 30 * 600 {
        tick(&mut state, &input);
        ticks += 1;
    }
    assert!(state.check_invariants());
    assert!(state.stage.index < fatsche::sim::STAGES.len());
}
