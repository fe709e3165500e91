//! Platform abstraction layer
//!
//! The simulation never touches a device. Hosts hand it sampled buttons and
//! receive draw calls through [`Canvas`]:
//! - Input: six logical buttons, held and just-pressed
//! - Output: sprite blits with compositing flags

/// Six logical buttons of the handheld
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Buttons {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub a: bool,
    pub b: bool,
}

/// Compositing flags for a blit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawFlags {
    /// Draw every set pixel white (hit blink)
    pub white: bool,
    /// Flip horizontally
    pub mirror: bool,
    /// Swap black and white
    pub invert: bool,
}

impl DrawFlags {
    pub const NONE: DrawFlags = DrawFlags {
        white: false,
        mirror: false,
        invert: false,
    };
}

/// Logical sprite sheets the scene is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    Background,
    Lamp,
    Player,
    Bullet,
    WeaponIcon,
    PowerUp,
    Raider,
    DrunkenPunk,
    Hacker,
    Boss1,
    Boss2,
    Grandma,
    LittleGirl,
    /// Glyphs 0-9, then minus
    Digits,
    LifeBar,
    StageBanner,
    BossBanner,
}

/// Minus sign in the [`Sprite::Digits`] sheet
pub const DIGIT_MINUS: u8 = 10;

/// Drawing surface supplied by the host
///
/// Coordinates are screen pixels; frames index into a sprite sheet.
pub trait Canvas {
    fn draw_image(&mut self, x: i16, y: i16, sprite: Sprite, flags: DrawFlags);

    fn draw_image_frame(&mut self, x: i16, y: i16, sprite: Sprite, frame: u8, flags: DrawFlags);
}
