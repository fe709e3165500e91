//! Door arbitration
//!
//! Only one enemy may attack the door at a time. The holder is stored as an
//! enemy pool index and must be cleared in the same step its holder dies or
//! is pushed away by a boss, so it never refers to a freed slot.

/// The defended doorway
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Door {
    attacker: Option<usize>,
}

impl Door {
    /// Enemy slot currently holding the door
    pub fn holder(&self) -> Option<usize> {
        self.attacker
    }

    /// Whether the door is held by someone other than `index`
    pub fn held_by_other(&self, index: usize) -> bool {
        matches!(self.attacker, Some(a) if a != index)
    }

    pub fn claim(&mut self, index: usize) {
        self.attacker = Some(index);
    }

    /// Release the door if `index` holds it
    pub fn release_if(&mut self, index: usize) {
        if self.attacker == Some(index) {
            self.attacker = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_and_release() {
        let mut door = Door::default();
        assert_eq!(door.holder(), None);
        door.claim(2);
        assert!(door.held_by_other(1));
        assert!(!door.held_by_other(2));

        door.release_if(1);
        assert_eq!(door.holder(), Some(2));
        door.release_if(2);
        assert_eq!(door.holder(), None);
    }
}
