//! Card reference handles.
//!
//! Every card instance in a game (heroes, hero powers, minions, spells,
//! weapons, enchantments) is addressed by a `CardRef`. A reference is an
//! index into the card store and is never reused within one game, so it stays
//! stable for the whole lifetime of the card.
//!
//! ## Usage
//!
//! ```
//! use hearth_state::core::CardRef;
//!
//! let mut card = CardRef::new(3);
//! assert!(card.is_valid());
//!
//! card.invalidate();
//! assert!(!card.is_valid());
//! assert_eq!(card, CardRef::INVALID);
//! ```

use serde::{Deserialize, Serialize};

/// Handle to one card instance.
///
/// `CardRef::INVALID` (also the `Default`) is the null reference used for
/// "no target", "no weapon" and similar empty slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardRef(u32);

impl CardRef {
    /// The null reference.
    pub const INVALID: CardRef = CardRef(u32::MAX);

    /// Create a reference from a raw store index.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Check if this reference points at a card.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != u32::MAX
    }

    /// Reset to the null reference.
    pub fn invalidate(&mut self) {
        *self = Self::INVALID;
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Index into the card store.
    #[must_use]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl Default for CardRef {
    fn default() -> Self {
        Self::INVALID
    }
}

impl std::fmt::Display for CardRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_valid() {
            write!(f, "Card#{}", self.0)
        } else {
            write!(f, "Card#invalid")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_invalid() {
        assert_eq!(CardRef::default(), CardRef::INVALID);
        assert!(!CardRef::default().is_valid());
    }

    #[test]
    fn test_invalidate() {
        let mut card = CardRef::new(0);
        assert!(card.is_valid());
        card.invalidate();
        assert!(!card.is_valid());
    }

    #[test]
    fn test_ordering_follows_allocation() {
        assert!(CardRef::new(1) < CardRef::new(2));
        assert!(CardRef::new(100) < CardRef::INVALID);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", CardRef::new(42)), "Card#42");
        assert_eq!(format!("{}", CardRef::INVALID), "Card#invalid");
    }

    #[test]
    fn test_serialization() {
        let card = CardRef::new(123);
        let json = serde_json::to_string(&card).unwrap();
        let deserialized: CardRef = serde_json::from_str(&json).unwrap();
        assert_eq!(card, deserialized);
    }
}
