//! Scene emission
//!
//! Walks the game state and issues one draw call per visible element. No
//! pixel work happens here; the host's [`Canvas`] does the blitting.

use super::enemy::{Enemy, EnemyState, Species};
use super::player::PlayerState;
use super::stage::Banner;
use super::state::GameState;
use super::weapon::BulletState;
use crate::consts::*;
use crate::platform::{Canvas, DIGIT_MINUS, DrawFlags, Sprite};

/// Width of one digit glyph
pub const DIGIT_WIDTH: i16 = 4;
/// Top of the balcony the player walks on
pub const PLAYER_Y: i16 = 0;
pub const LAMP_X: i16 = 2;
pub const LAMP_Y: i16 = 30;
/// Frames in the life bar sheet
pub const LIFE_BAR_FRAMES: u8 = 16;

impl Species {
    pub fn sprite(self) -> Sprite {
        match self {
            Species::Raider => Sprite::Raider,
            Species::DrunkenPunk => Sprite::DrunkenPunk,
            Species::Hacker => Sprite::Hacker,
            Species::Boss1 => Sprite::Boss1,
            Species::Boss2 => Sprite::Boss2,
            Species::Grandma => Sprite::Grandma,
            Species::LittleGirl => Sprite::LittleGirl,
        }
    }
}

/// Emit the whole scene for the current tick
pub fn draw(state: &GameState, canvas: &mut impl Canvas) {
    canvas.draw_image(0, 0, Sprite::Background, DrawFlags::NONE);
    canvas.draw_image_frame(LAMP_X, LAMP_Y, Sprite::Lamp, state.lamp_frame, DrawFlags::NONE);

    for (_, p) in state.powerups.iter_active() {
        let frame = p.kind as u8 * super::powerup::FRAMES + p.frame;
        canvas.draw_image_frame(p.x, p.y, Sprite::PowerUp, frame, DrawFlags::NONE);
    }

    for (_, e) in state.enemies.iter_active() {
        draw_enemy(e, canvas);
    }

    draw_player(state, canvas);

    for (_, b) in state.armory.bullets.iter_active() {
        // airborne frames first, then the ground effect
        let base = match b.state {
            BulletState::Active => 0,
            _ => 4,
        };
        let frame = b.weapon.index() as u8 * 8 + base + b.frame;
        canvas.draw_image_frame(b.x, b.y, Sprite::Bullet, frame, DrawFlags::NONE);
    }

    for (_, n) in state.numbers.iter_active() {
        draw_number(canvas, n.x, n.y, n.value);
    }

    draw_hud(state, canvas);
}

fn draw_enemy(e: &Enemy, canvas: &mut impl Canvas) {
    // dying enemies flicker out
    if e.state == EnemyState::Dying && e.hit & 2 != 0 {
        return;
    }
    let flags = DrawFlags {
        white: e.state.is_alive() && e.hit & 2 != 0,
        mirror: e.state == EnemyState::WalkingRight,
        invert: false,
    };
    canvas.draw_image_frame(e.x, e.y, e.species.sprite(), e.sprite_frame(), flags);
}

fn draw_player(state: &GameState, canvas: &mut impl Canvas) {
    let p = &state.player;
    let frame = p.state.sprite_offset() + p.frame;
    let flags = DrawFlags {
        // poison tints the player on every other half second
        invert: p.poisoned && state.half_seconds & 1 == 1,
        mirror: p.state == PlayerState::Resting && p.previous_state == PlayerState::MovingRight,
        white: false,
    };
    canvas.draw_image_frame(p.x, PLAYER_Y, Sprite::Player, frame, flags);
}

fn draw_hud(state: &GameState, canvas: &mut impl Canvas) {
    let digits = digit_count(state.player.score);
    draw_number(canvas, WIDTH - digits * DIGIT_WIDTH, 0, state.player.score);

    let life = state.player.life.clamp(0, PLAYER_MAX_LIFE) as i32;
    let frame = (life * (LIFE_BAR_FRAMES as i32 - 1) / PLAYER_MAX_LIFE as i32) as u8;
    canvas.draw_image_frame(0, HEIGHT - 1, Sprite::LifeBar, frame, DrawFlags::NONE);

    let armory = &state.armory;
    if armory.icon_ticks > 0 {
        let x = if armory.icon_left { 0 } else { WIDTH - 8 };
        let frame = armory.selected.index() as u8;
        canvas.draw_image_frame(x, 8, Sprite::WeaponIcon, frame, DrawFlags::NONE);
    }

    match state.stage.banner {
        Some(Banner::Stage(n)) => {
            canvas.draw_image(32, 20, Sprite::StageBanner, DrawFlags::NONE);
            draw_number(canvas, 88, 24, n as i32);
        }
        Some(Banner::Boss) => {
            let flags = DrawFlags {
                invert: state.half_seconds & 1 == 1,
                ..DrawFlags::NONE
            };
            canvas.draw_image(32, 20, Sprite::BossBanner, flags);
        }
        None => {}
    }
}

fn digit_count(value: i32) -> i16 {
    let mut n = 1;
    let mut v = value.unsigned_abs() / 10;
    while v > 0 {
        n += 1;
        v /= 10;
    }
    if value < 0 { n + 1 } else { n }
}

/// Draw `value` left-aligned at (x, y), with a leading minus if negative
pub fn draw_number(canvas: &mut impl Canvas, x: i16, y: i16, value: i32) {
    let mut x = x;
    if value < 0 {
        canvas.draw_image_frame(x, y, Sprite::Digits, DIGIT_MINUS, DrawFlags::NONE);
        x += DIGIT_WIDTH;
    }
    let text = value.unsigned_abs().to_string();
    for c in text.bytes() {
        canvas.draw_image_frame(x, y, Sprite::Digits, c - b'0', DrawFlags::NONE);
        x += DIGIT_WIDTH;
    }
}
