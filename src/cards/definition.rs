//! Card classification tags.
//!
//! `CardId` names a card definition (what is printed on the card). The
//! closed tag sets `CardType`, `CardZone` and `CardRace` classify instances;
//! the zone engine dispatches on the first two with exhaustive matches.

use serde::{Deserialize, Serialize};

/// Unique identifier for a card definition.
///
/// This identifies the "kind" of card, not a specific instance in a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Kind of a card instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    Hero,
    HeroPower,
    Minion,
    Spell,
    Weapon,
    Enchantment,
    /// Corrupted or uninitialised record. Never legal in a transition.
    Invalid,
}

/// Zone a card instance currently lives in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardZone {
    Hand,
    Play,
    Graveyard,
    Deck,
    SetASide,
    Removed,
    /// Freshly created by card logic, not placed anywhere yet.
    NewlyCreated,
    Invalid,
}

impl CardZone {
    /// Check if cards in this zone are kept in a per-player index.
    ///
    /// Set-aside, removed, newly-created and invalid cards are not indexed.
    #[must_use]
    pub const fn is_tracked(self) -> bool {
        matches!(self, Self::Hand | Self::Play | Self::Graveyard | Self::Deck)
    }
}

/// Minion tribe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardRace {
    #[default]
    None,
    Beast,
    Demon,
    Dragon,
    Mech,
    Murloc,
    Pirate,
    Totem,
}
