//! Lanes and hit rectangles
//!
//! Everything on the street sits on one of three lanes. Bullets only hit
//! things on a matching lane, with one asymmetric exception: a bullet thrown
//! at the upper lane also hits targets standing in the door lane, but not the
//! other way around.

use crate::consts::LANE_Y;

/// Vertical track occupied by enemies, bullets and power-ups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lane {
    /// Directly in front of the door, only attackers stand here
    Door,
    #[default]
    Upper,
    Lower,
}

impl Lane {
    /// Lanes something can walk or land on from the street side
    pub const STREET: [Lane; 2] = [Lane::Upper, Lane::Lower];

    /// Baseline y of the lane
    #[inline]
    pub fn y(self) -> i16 {
        LANE_Y[self as usize]
    }

    /// Street lane for a random draw in `0..2`
    pub fn street(roll: u16) -> Self {
        Self::STREET[roll as usize % Self::STREET.len()]
    }

    /// Whether a bullet on `self` can hit a target standing on `target`
    #[inline]
    pub fn hits(self, target: Lane) -> bool {
        self == target || (self == Lane::Upper && target == Lane::Door)
    }
}

/// Axis-aligned rectangle with inclusive edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i16,
    pub y: i16,
    pub w: i16,
    pub h: i16,
}

impl Rect {
    pub fn new(x: i16, y: i16, w: i16, h: i16) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn contains(&self, x: i16, y: i16) -> bool {
        x >= self.x && x <= self.x + self.w && y >= self.y && y <= self.y + self.h
    }
}
