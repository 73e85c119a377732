//! Entity store.
//!
//! Owns every `Card` of a game, addressed by `CardRef`. References are
//! allocated sequentially and never reused. Backed by `im::Vector` so
//! cloning a state for a search branch shares the records until one side
//! writes.

use im::Vector;

use super::card::Card;
use crate::core::CardRef;

/// Storage for all card records of one game.
#[derive(Clone, Debug, Default)]
pub struct CardManager {
    cards: Vector<Card>,
}

impl CardManager {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a card and allocate its reference.
    pub fn create(&mut self, card: Card) -> CardRef {
        assert!(self.cards.len() < u32::MAX as usize, "card store exhausted");
        let card_ref = CardRef::new(self.cards.len() as u32);
        self.cards.push_back(card);
        card_ref
    }

    /// Get a card record.
    ///
    /// Panics on an invalid or unknown reference.
    #[must_use]
    pub fn get(&self, card_ref: CardRef) -> &Card {
        match self.cards.get(card_ref.index()) {
            Some(card) => card,
            None => panic!("unknown card reference {}", card_ref),
        }
    }

    /// Get a mutable card record.
    ///
    /// Panics on an invalid or unknown reference.
    pub fn get_mut(&mut self, card_ref: CardRef) -> &mut Card {
        match self.cards.get_mut(card_ref.index()) {
            Some(card) => card,
            None => panic!("unknown card reference {}", card_ref),
        }
    }

    /// Check if a reference points at a stored card.
    #[must_use]
    pub fn contains(&self, card_ref: CardRef) -> bool {
        card_ref.is_valid() && card_ref.index() < self.cards.len()
    }

    /// Number of stored cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all (reference, card) pairs in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (CardRef, &Card)> {
        self.cards
            .iter()
            .enumerate()
            .map(|(i, card)| (CardRef::new(i as u32), card))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardId;

    #[test]
    fn test_create_allocates_sequential_refs() {
        let mut cards = CardManager::new();
        let a = cards.create(Card::minion(CardId::new(1), 1, 1));
        let b = cards.create(Card::minion(CardId::new(2), 2, 2));

        assert_eq!(a, CardRef::new(0));
        assert_eq!(b, CardRef::new(1));
        assert_eq!(cards.len(), 2);
        assert_eq!(cards.get(b).card_id, CardId::new(2));
    }

    #[test]
    fn test_contains() {
        let mut cards = CardManager::new();
        let a = cards.create(Card::minion(CardId::new(1), 1, 1));

        assert!(cards.contains(a));
        assert!(!cards.contains(CardRef::new(5)));
        assert!(!cards.contains(CardRef::INVALID));
    }

    #[test]
    fn test_clone_is_isolated() {
        let mut cards = CardManager::new();
        let a = cards.create(Card::minion(CardId::new(1), 1, 1));

        let mut branch = cards.clone();
        branch.get_mut(a).damage = 1;

        assert_eq!(cards.get(a).damage, 0);
        assert_eq!(branch.get(a).damage, 1);
    }

    #[test]
    #[should_panic(expected = "unknown card reference")]
    fn test_invalid_ref_panics() {
        let cards = CardManager::new();
        let _ = cards.get(CardRef::INVALID);
    }
}
