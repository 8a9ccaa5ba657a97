use core::fmt;

use serde::{Deserialize, Serialize};

/// Reference into an innings' batter or bowler list. Distinguishes "nobody
/// bound" from a valid index 0, which a bare `-1` sentinel cannot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot(Option<usize>);

impl Slot {
    pub const UNSET: Slot = Slot(None);

    pub const fn bound(index: usize) -> Self {
        Slot(Some(index))
    }

    pub const fn index(self) -> Option<usize> {
        self.0
    }

    pub const fn is_unset(self) -> bool {
        self.0.is_none()
    }
}

impl Default for Slot {
    fn default() -> Self {
        Slot::UNSET
    }
}

/// Which end of the pitch a batter occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatterEnd {
    Striker,
    NonStriker,
}

impl BatterEnd {
    pub const fn as_str(self) -> &'static str {
        match self {
            BatterEnd::Striker => "striker",
            BatterEnd::NonStriker => "non-striker",
        }
    }
}

impl fmt::Display for BatterEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::{BatterEnd, Slot};

    #[test]
    fn unset_slot_has_no_index() {
        assert_eq!(Slot::UNSET.index(), None);
        assert!(Slot::UNSET.is_unset());
        assert_eq!(Slot::default(), Slot::UNSET);
    }

    #[test]
    fn bound_slot_distinguishes_index_zero_from_unset() {
        let slot = Slot::bound(0);
        assert_eq!(slot.index(), Some(0));
        assert!(!slot.is_unset());
        assert_ne!(slot, Slot::UNSET);
    }

    #[test]
    fn batter_end_labels() {
        assert_eq!(BatterEnd::Striker.to_string(), "striker");
        assert_eq!(BatterEnd::NonStriker.to_string(), "non-striker");
    }
}
