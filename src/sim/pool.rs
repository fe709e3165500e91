//! Fixed-capacity entity pools
//!
//! Slots are reused by index. Allocation takes the first inactive slot and
//! exhaustion is a silent `None`, never an error.

use std::ops::{Index, IndexMut};

/// An entity that can live in a [`Pool`]
pub trait Slot: Default {
    /// Whether this slot currently holds a live entity
    fn is_active(&self) -> bool;
}

/// Fixed-size arena of `N` slots
#[derive(Debug, Clone)]
pub struct Pool<T, const N: usize> {
    slots: [T; N],
}

impl<T: Slot, const N: usize> Default for Pool<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Slot, const N: usize> Pool<T, N> {
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| T::default()),
        }
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Place `value` in the first inactive slot
    pub fn allocate(&mut self, value: T) -> Option<usize> {
        debug_assert!(value.is_active(), "allocating an inactive entity");
        let index = self.slots.iter().position(|s| !s.is_active())?;
        self.slots[index] = value;
        Some(index)
    }

    /// Return a slot to the inactive state
    pub fn free(&mut self, index: usize) {
        self.slots[index] = T::default();
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index).filter(|s| s.is_active())
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_active()).count()
    }

    /// Live entities with their slot index, in slot order
    pub fn iter_active(&self) -> impl Iterator<Item = (usize, &T)> {
        self.slots.iter().enumerate().filter(|(_, s)| s.is_active())
    }

    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = (usize, &mut T)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter(|(_, s)| s.is_active())
    }

    /// All slots including inactive ones
    pub fn slots(&self) -> &[T; N] {
        &self.slots
    }
}

impl<T, const N: usize> Index<usize> for Pool<T, N> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.slots[index]
    }
}

impl<T, const N: usize> IndexMut<usize> for Pool<T, N> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.slots[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Dot {
        live: bool,
        tag: u8,
    }

    impl Slot for Dot {
        fn is_active(&self) -> bool {
            self.live
        }
    }

    fn dot(tag: u8) -> Dot {
        Dot { live: true, tag }
    }

    #[test]
    fn test_allocate_first_free_slot() {
        let mut pool: Pool<Dot, 3> = Pool::new();
        assert_eq!(pool.allocate(dot(1)), Some(0));
        assert_eq!(pool.allocate(dot(2)), Some(1));
        pool.free(0);
        assert_eq!(pool.allocate(dot(3)), Some(0));
        assert_eq!(pool[0].tag, 3);
        assert_eq!(pool.active_count(), 2);
    }

    #[test]
    fn test_exhaustion_is_silent() {
        let mut pool: Pool<Dot, 2> = Pool::new();
        pool.allocate(dot(1));
        pool.allocate(dot(2));
        assert_eq!(pool.allocate(dot(3)), None);
        assert_eq!(pool.active_count(), 2);
        assert!(pool.iter_active().all(|(_, d)| d.tag != 3));
    }

    #[test]
    fn test_get_skips_inactive() {
        let mut pool: Pool<Dot, 2> = Pool::new();
        pool.allocate(dot(7));
        assert!(pool.get(0).is_some());
        assert!(pool.get(1).is_none());
        assert!(pool.get(5).is_none());
    }
}
