//! Per-player zone indices.
//!
//! Each player owns one container per (card type, zone) combination the
//! engine needs to query quickly:
//!
//! | zone      | container                                     |
//! |-----------|-----------------------------------------------|
//! | Play      | hero / hero power / weapon slots, `minions`   |
//! |           | (ordered board), `secrets`, `enchantments`    |
//! | Hand      | `hand` (insertion ordered)                    |
//! | Deck      | `deck` (insertion ordered)                    |
//! | Graveyard | `graveyard` (insertion ordered)               |
//!
//! Ordered containers keep every member's `zone_pos` equal to its index.
//! All containers are `im` structures so a cloned board shares storage.

use im::{OrdSet, Vector};
use serde::{Deserialize, Serialize};

use crate::cards::CardManager;
use crate::core::{CardRef, PlayerId, PlayerMap};

/// Ordered list of card references.
///
/// Members' `zone_pos` is kept equal to their index on every insertion,
/// removal and replacement.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardList {
    refs: Vector<CardRef>,
}

impl CardList {
    #[must_use]
    pub fn len(&self) -> usize {
        self.refs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    #[must_use]
    pub fn get(&self, pos: usize) -> Option<CardRef> {
        self.refs.get(pos).copied()
    }

    #[must_use]
    pub fn contains(&self, card_ref: CardRef) -> bool {
        self.position(card_ref).is_some()
    }

    #[must_use]
    pub fn position(&self, card_ref: CardRef) -> Option<usize> {
        self.refs.index_of(&card_ref)
    }

    /// Iterate in order.
    pub fn iter(&self) -> impl Iterator<Item = CardRef> + '_ {
        self.refs.iter().copied()
    }

    /// Snapshot as a plain vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<CardRef> {
        self.iter().collect()
    }

    pub(crate) fn push(&mut self, cards: &mut CardManager, card_ref: CardRef) {
        cards.get_mut(card_ref).set_zone_pos(self.refs.len());
        self.refs.push_back(card_ref);
    }

    pub(crate) fn insert(&mut self, cards: &mut CardManager, pos: usize, card_ref: CardRef) {
        self.refs.insert(pos, card_ref);
        self.renumber_from(cards, pos);
    }

    /// Remove a member, returning its former position.
    pub(crate) fn remove(&mut self, cards: &mut CardManager, card_ref: CardRef) -> Option<usize> {
        let pos = self.position(card_ref)?;
        self.refs.remove(pos);
        self.renumber_from(cards, pos);
        Some(pos)
    }

    /// Put `new_ref` where `old_ref` is. Returns false if `old_ref` is absent.
    pub(crate) fn replace(
        &mut self,
        cards: &mut CardManager,
        old_ref: CardRef,
        new_ref: CardRef,
    ) -> bool {
        let Some(pos) = self.position(old_ref) else {
            return false;
        };
        self.refs.set(pos, new_ref);
        cards.get_mut(new_ref).set_zone_pos(pos);
        true
    }

    fn renumber_from(&self, cards: &mut CardManager, start: usize) {
        for (pos, card_ref) in self.refs.iter().enumerate().skip(start) {
            cards.get_mut(*card_ref).set_zone_pos(pos);
        }
    }
}

/// A player's minions on the board, left to right.
///
/// `change_id` advances on every mutation; aura handlers compare it with
/// the last value they saw to decide whether to re-evaluate.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Minions {
    list: CardList,
    change_id: i64,
}

impl Minions {
    #[must_use]
    pub fn change_id(&self) -> i64 {
        self.change_id
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    #[must_use]
    pub fn get(&self, pos: usize) -> Option<CardRef> {
        self.list.get(pos)
    }

    #[must_use]
    pub fn contains(&self, card_ref: CardRef) -> bool {
        self.list.contains(card_ref)
    }

    pub fn iter(&self) -> impl Iterator<Item = CardRef> + '_ {
        self.list.iter()
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<CardRef> {
        self.list.to_vec()
    }

    pub(crate) fn insert(&mut self, cards: &mut CardManager, pos: usize, card_ref: CardRef) {
        self.list.insert(cards, pos, card_ref);
        self.change_id += 1;
    }

    pub(crate) fn remove(&mut self, cards: &mut CardManager, card_ref: CardRef) -> Option<usize> {
        let pos = self.list.remove(cards, card_ref)?;
        self.change_id += 1;
        Some(pos)
    }

    pub(crate) fn replace(
        &mut self,
        cards: &mut CardManager,
        old_ref: CardRef,
        new_ref: CardRef,
    ) -> bool {
        let replaced = self.list.replace(cards, old_ref, new_ref);
        if replaced {
            self.change_id += 1;
        }
        replaced
    }
}

/// All indices of one player.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerZones {
    pub(crate) hero: CardRef,
    pub(crate) hero_power: CardRef,
    pub(crate) weapon: CardRef,
    pub(crate) minions: Minions,
    pub(crate) secrets: OrdSet<CardRef>,
    pub(crate) enchantments: OrdSet<CardRef>,
    pub(crate) hand: CardList,
    pub(crate) deck: CardList,
    pub(crate) graveyard: CardList,
}

impl PlayerZones {
    /// Hero in play, or `CardRef::INVALID`.
    #[must_use]
    pub fn hero(&self) -> CardRef {
        self.hero
    }

    /// Hero power in play, or `CardRef::INVALID`.
    #[must_use]
    pub fn hero_power(&self) -> CardRef {
        self.hero_power
    }

    /// Equipped weapon, or `CardRef::INVALID`.
    #[must_use]
    pub fn weapon(&self) -> CardRef {
        self.weapon
    }

    #[must_use]
    pub fn minions(&self) -> &Minions {
        &self.minions
    }

    /// Spells in play (secrets), ordered by reference.
    #[must_use]
    pub fn secrets(&self) -> &OrdSet<CardRef> {
        &self.secrets
    }

    /// Enchantment cards in play, ordered by reference.
    #[must_use]
    pub fn enchantments(&self) -> &OrdSet<CardRef> {
        &self.enchantments
    }

    #[must_use]
    pub fn hand(&self) -> &CardList {
        &self.hand
    }

    #[must_use]
    pub fn deck(&self) -> &CardList {
        &self.deck
    }

    #[must_use]
    pub fn graveyard(&self) -> &CardList {
        &self.graveyard
    }

    /// Number of containers of this player holding `card_ref`.
    #[must_use]
    pub fn memberships(&self, card_ref: CardRef) -> usize {
        let slots = [self.hero, self.hero_power, self.weapon]
            .into_iter()
            .filter(|&slot| slot == card_ref)
            .count();
        slots
            + usize::from(self.minions.contains(card_ref))
            + usize::from(self.secrets.contains(&card_ref))
            + usize::from(self.enchantments.contains(&card_ref))
            + usize::from(self.hand.contains(card_ref))
            + usize::from(self.deck.contains(card_ref))
            + usize::from(self.graveyard.contains(card_ref))
    }
}

/// Both players' zone indices.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    players: PlayerMap<PlayerZones>,
}

impl Board {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn player(&self, player: PlayerId) -> &PlayerZones {
        &self.players[player]
    }

    #[must_use]
    pub fn first(&self) -> &PlayerZones {
        self.player(PlayerId::FIRST)
    }

    #[must_use]
    pub fn second(&self) -> &PlayerZones {
        self.player(PlayerId::SECOND)
    }

    pub(crate) fn player_mut(&mut self, player: PlayerId) -> &mut PlayerZones {
        &mut self.players[player]
    }

    /// Number of containers, across both players, holding `card_ref`.
    #[must_use]
    pub fn memberships(&self, card_ref: CardRef) -> usize {
        self.players.iter().map(|(_, zones)| zones.memberships(card_ref)).sum()
    }
}
