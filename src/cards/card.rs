//! Card records - runtime card state.
//!
//! A `Card` is one instance in one game: its kind, where it is, who owns it,
//! its stats and the enchantments currently attached to it.
//!
//! Zone, owner and position are written only by the zone engine; everything
//! else is open to card logic.

use im::OrdMap;
use serde::{Deserialize, Serialize};

use super::definition::{CardId, CardRace, CardType, CardZone};
use crate::aura::AuraCallbacks;
use crate::core::PlayerId;

/// Identifier of an enchantment attached to one card.
///
/// Unique per card, not per game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EnchantmentId(pub u32);

/// Stat modification attached to a card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Enchantment {
    /// Attack bonus (may be negative).
    pub attack: i32,
    /// Maximum health bonus (may be negative).
    pub max_hp: i32,
}

impl Enchantment {
    /// Attack-only enchantment.
    #[must_use]
    pub const fn attack(attack: i32) -> Self {
        Self { attack, max_hp: 0 }
    }

    /// Attack and health enchantment.
    #[must_use]
    pub const fn stats(attack: i32, max_hp: i32) -> Self {
        Self { attack, max_hp }
    }
}

/// A card instance in a game.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Card {
    /// Reference to the card definition.
    pub card_id: CardId,

    card_type: CardType,
    zone: CardZone,
    player: PlayerId,
    zone_pos: usize,

    /// Minion tribe.
    pub race: CardRace,

    /// Base attack.
    pub attack: i32,

    /// Base maximum health.
    pub max_hp: i32,

    /// Damage taken.
    pub damage: i32,

    enchantments: OrdMap<EnchantmentId, Enchantment>,
    next_enchantment_id: u32,

    /// Aura this card projects while in play.
    #[serde(skip)]
    aura: Option<AuraCallbacks>,
}

impl Card {
    /// Create a newly created card of the given kind, owned by the first player.
    #[must_use]
    pub fn new(card_id: CardId, card_type: CardType) -> Self {
        Self {
            card_id,
            card_type,
            zone: CardZone::NewlyCreated,
            player: PlayerId::FIRST,
            zone_pos: 0,
            race: CardRace::None,
            attack: 0,
            max_hp: 0,
            damage: 0,
            enchantments: OrdMap::new(),
            next_enchantment_id: 0,
            aura: None,
        }
    }

    /// Create a minion with base stats.
    #[must_use]
    pub fn minion(card_id: CardId, attack: i32, max_hp: i32) -> Self {
        Self::new(card_id, CardType::Minion).with_stats(attack, max_hp)
    }

    /// Create a hero with base health.
    #[must_use]
    pub fn hero(card_id: CardId, max_hp: i32) -> Self {
        Self::new(card_id, CardType::Hero).with_stats(0, max_hp)
    }

    /// Set base stats (builder pattern).
    #[must_use]
    pub fn with_stats(mut self, attack: i32, max_hp: i32) -> Self {
        self.attack = attack;
        self.max_hp = max_hp;
        self
    }

    /// Set race (builder pattern).
    #[must_use]
    pub fn with_race(mut self, race: CardRace) -> Self {
        self.race = race;
        self
    }

    /// Attach an aura registration (builder pattern).
    #[must_use]
    pub fn with_aura(mut self, aura: AuraCallbacks) -> Self {
        self.aura = Some(aura);
        self
    }

    /// Set the owner before the card is first placed (builder pattern).
    #[must_use]
    pub fn owned_by(mut self, player: PlayerId) -> Self {
        self.player = player;
        self
    }

    #[must_use]
    pub fn card_type(&self) -> CardType {
        self.card_type
    }

    #[must_use]
    pub fn zone(&self) -> CardZone {
        self.zone
    }

    #[must_use]
    pub fn player(&self) -> PlayerId {
        self.player
    }

    /// Position inside the card's ordered per-player container.
    ///
    /// Only meaningful for indexed zones.
    #[must_use]
    pub fn zone_pos(&self) -> usize {
        self.zone_pos
    }

    #[must_use]
    pub fn aura(&self) -> Option<&AuraCallbacks> {
        self.aura.as_ref()
    }

    /// Attack including enchantments.
    #[must_use]
    pub fn current_attack(&self) -> i32 {
        self.attack + self.enchantments.values().map(|e| e.attack).sum::<i32>()
    }

    /// Maximum health including enchantments.
    #[must_use]
    pub fn current_max_hp(&self) -> i32 {
        self.max_hp + self.enchantments.values().map(|e| e.max_hp).sum::<i32>()
    }

    /// Remaining health.
    #[must_use]
    pub fn hp(&self) -> i32 {
        self.current_max_hp() - self.damage
    }

    /// Attach an enchantment and return its identifier.
    pub fn add_enchantment(&mut self, enchantment: Enchantment) -> EnchantmentId {
        let id = EnchantmentId(self.next_enchantment_id);
        self.next_enchantment_id += 1;
        self.enchantments.insert(id, enchantment);
        id
    }

    /// Detach an enchantment.
    ///
    /// Returns the removed enchantment, or `None` if it was not attached.
    pub fn remove_enchantment(&mut self, id: EnchantmentId) -> Option<Enchantment> {
        self.enchantments.remove(&id)
    }

    #[must_use]
    pub fn has_enchantment(&self, id: EnchantmentId) -> bool {
        self.enchantments.contains_key(&id)
    }

    /// Number of attached enchantments.
    #[must_use]
    pub fn enchantment_count(&self) -> usize {
        self.enchantments.len()
    }

    pub(crate) fn set_zone(&mut self, player: PlayerId, zone: CardZone) {
        self.player = player;
        self.zone = zone;
    }

    pub(crate) fn set_zone_pos(&mut self, pos: usize) {
        self.zone_pos = pos;
    }
}
