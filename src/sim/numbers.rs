//! Floating score/damage numbers
//!
//! Purely cosmetic. A number rises from where the score changed and
//! disappears once it reaches the top of the play area.

use super::pool::{Pool, Slot};
use crate::consts::MAX_FLYING_NUMBERS;

/// Ticks per pixel of rise
pub const RISE_TICKS: u8 = 2;

#[derive(Debug, Clone, Copy, Default)]
pub struct FlyingNumber {
    pub active: bool,
    pub x: i16,
    pub y: i16,
    pub value: i32,
    rise_timer: u8,
}

impl Slot for FlyingNumber {
    fn is_active(&self) -> bool {
        self.active
    }
}

pub type FlyingNumbers = Pool<FlyingNumber, MAX_FLYING_NUMBERS>;

/// Show `value` rising from (x, y); dropped silently when the queue is full
pub fn spawn(numbers: &mut FlyingNumbers, x: i16, y: i16, value: i32) {
    if value == 0 {
        return;
    }
    let number = FlyingNumber {
        active: true,
        x,
        y: y.max(1),
        value,
        rise_timer: RISE_TICKS,
    };
    numbers.allocate(number);
}

pub fn update(numbers: &mut FlyingNumbers) {
    for i in 0..numbers.capacity() {
        let n = &mut numbers[i];
        if !n.active {
            continue;
        }
        if n.rise_timer > 0 {
            n.rise_timer -= 1;
            continue;
        }
        n.rise_timer = RISE_TICKS;
        n.y -= 1;
        if n.y <= 0 {
            numbers.free(i);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_rises_and_expires() {
        let mut numbers = FlyingNumbers::new();
        spawn(&mut numbers, 40, 3, 10);
        assert_eq!(numbers.active_count(), 1);

        for _ in 0..=RISE_TICKS {
            update(&mut numbers);
        }
        assert_eq!(numbers[0].y, 2);

        for _ in 0..(RISE_TICKS as usize + 1) * 2 {
            update(&mut numbers);
        }
        assert_eq!(numbers.active_count(), 0);
    }

    #[test]
    fn test_zero_and_overflow_are_dropped() {
        let mut numbers = FlyingNumbers::new();
        spawn(&mut numbers, 0, 30, 0);
        assert_eq!(numbers.active_count(), 0);
        for i in 0..MAX_FLYING_NUMBERS + 3 {
            spawn(&mut numbers, i as i16, 30, -5);
        }
        assert_eq!(numbers.active_count(), MAX_FLYING_NUMBERS);
    }
}
