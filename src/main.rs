//! Fatsche entry point
//!
//! Runs a headless game with the autopilot at the controls and records the
//! score. Usage: `fatsche [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
use fatsche::platform::{Canvas, DrawFlags, Sprite};

/// Canvas that only counts what would have been drawn
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
struct NullCanvas {
    blits: u64,
}

#[cfg(not(target_arch = "wasm32"))]
impl Canvas for NullCanvas {
    fn draw_image(&mut self, _x: i16, _y: i16, _sprite: Sprite, _flags: DrawFlags) {
        self.blits += 1;
    }

    fn draw_image_frame(
        &mut self,
        _x: i16,
        _y: i16,
        _sprite: Sprite,
        _frame: u8,
        _flags: DrawFlags,
    ) {
        self.blits += 1;
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use fatsche::consts::FPS;
    use fatsche::sim::{GamePhase, GameState, TickInput, render, tick};
    use fatsche::{HighScoreStore, JsonHighScoreStore, Settings};

    env_logger::init();
    log::info!("Fatsche (headless) starting...");

    let settings = match std::env::args_os().nth(1) {
        Some(path) => Settings::load_from(std::path::Path::new(&path)),
        None => Settings::default(),
    };
    let seed = settings.seed_or_random();

    let mut store = JsonHighScoreStore::new(&settings.highscore_path);
    let highscore = store.read_highscore();
    log::info!("High score to beat: {}", highscore);

    let mut state = GameState::new(seed);
    let mut canvas = NullCanvas::default();
    let input = TickInput {
        idle_mode: settings.idle_mode,
        ..Default::default()
    };

    while state.phase == GamePhase::Running && state.time_ticks < settings.max_ticks {
        tick(&mut state, &input);
        render::draw(&state, &mut canvas);
    }
    if state.phase == GamePhase::Running {
        // out of time counts as leaving the run
        state.phase = GamePhase::Cleanup;
    }

    log::debug!("{} blits emitted", canvas.blits);
    let score = state.player.score;
    if score > highscore {
        store.stage = state.stage.index as u8 + 1;
        store.write_highscore(score);
        log::info!("New high score!");
    }

    println!(
        "seed {} {:?} after {:.1}s: score {}, stage {}, life {}",
        seed,
        state.phase,
        state.time_ticks as f64 / FPS as f64,
        score,
        state.stage.index + 1,
        state.player.life.max(0)
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // the simulation is embedded by a host on this target
}
