//! Zone index maintenance.
//!
//! Maps each (card type, zone) pair onto the per-player container that
//! indexes it and performs the raw insert / remove / replace on that
//! container. Validation lives in the `check_*` functions so the changer can
//! reject a transition before touching anything.

use super::error::{Result, ZoneError};
use super::index::Board;
use crate::cards::{CardManager, CardType, CardZone};
use crate::core::{CardRef, PlayerId};

/// Per-player container indexing one (card type, zone) combination.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Container {
    HeroSlot,
    HeroPowerSlot,
    WeaponSlot,
    Minions,
    Secrets,
    Enchantments,
    Hand,
    Deck,
    Graveyard,
}

impl Container {
    /// Container for a combination, `None` for untracked zones.
    ///
    /// `CardType::Invalid` never reaches here: the changer rejects it first.
    pub(crate) fn of(card_type: CardType, zone: CardZone) -> Option<Container> {
        match zone {
            CardZone::Play => match card_type {
                CardType::Hero => Some(Container::HeroSlot),
                CardType::HeroPower => Some(Container::HeroPowerSlot),
                CardType::Weapon => Some(Container::WeaponSlot),
                CardType::Minion => Some(Container::Minions),
                CardType::Spell => Some(Container::Secrets),
                CardType::Enchantment => Some(Container::Enchantments),
                CardType::Invalid => None,
            },
            CardZone::Hand => Some(Container::Hand),
            CardZone::Deck => Some(Container::Deck),
            CardZone::Graveyard => Some(Container::Graveyard),
            CardZone::SetASide
            | CardZone::Removed
            | CardZone::NewlyCreated
            | CardZone::Invalid => None,
        }
    }

    /// Check if insertion needs an explicit position.
    pub(crate) fn takes_position(self) -> bool {
        self == Container::Minions
    }
}

/// Check if insertion of this combination needs an explicit position.
#[must_use]
pub fn requires_position(card_type: CardType, zone: CardZone) -> bool {
    Container::of(card_type, zone).is_some_and(Container::takes_position)
}

pub(crate) fn holds(
    board: &Board,
    player: PlayerId,
    container: Container,
    card_ref: CardRef,
) -> bool {
    let zones = board.player(player);
    match container {
        Container::HeroSlot => zones.hero == card_ref,
        Container::HeroPowerSlot => zones.hero_power == card_ref,
        Container::WeaponSlot => zones.weapon == card_ref,
        Container::Minions => zones.minions.contains(card_ref),
        Container::Secrets => zones.secrets.contains(&card_ref),
        Container::Enchantments => zones.enchantments.contains(&card_ref),
        Container::Hand => zones.hand.contains(card_ref),
        Container::Deck => zones.deck.contains(card_ref),
        Container::Graveyard => zones.graveyard.contains(card_ref),
    }
}

/// Verify a card sits where its record says it does.
pub(crate) fn check_remove(
    board: &Board,
    player: PlayerId,
    zone: CardZone,
    container: Option<Container>,
    card_ref: CardRef,
) -> Result<()> {
    match container {
        Some(container) if !holds(board, player, container, card_ref) => Err(ZoneError::NotIndexed {
            card: card_ref,
            zone,
            player,
        }),
        _ => Ok(()),
    }
}

/// Verify `card_ref` can be inserted once it has left its current container.
pub(crate) fn check_add(
    board: &Board,
    player: PlayerId,
    card_type: CardType,
    container: Option<Container>,
    card_ref: CardRef,
    pos: Option<usize>,
) -> Result<()> {
    let zones = board.player(player);
    let slot = match container {
        Some(Container::HeroSlot) => zones.hero,
        Some(Container::HeroPowerSlot) => zones.hero_power,
        Some(Container::WeaponSlot) => zones.weapon,
        Some(Container::Minions) => {
            // a minion repositioned on its own board leaves a gap first
            let staying = usize::from(zones.minions.contains(card_ref));
            let max = zones.minions.len() - staying;
            return match pos {
                Some(pos) if pos > max => Err(ZoneError::PositionOutOfRange { player, pos, max }),
                _ => Ok(()),
            };
        }
        _ => return Ok(()),
    };
    if slot.is_valid() && slot != card_ref {
        return Err(ZoneError::SlotOccupied {
            player,
            card_type,
            occupant: slot,
        });
    }
    Ok(())
}

/// Detach a card. Callers run `check_remove` first.
pub(crate) fn remove(
    board: &mut Board,
    cards: &mut CardManager,
    player: PlayerId,
    container: Option<Container>,
    card_ref: CardRef,
) {
    let Some(container) = container else {
        return;
    };
    let zones = board.player_mut(player);
    match container {
        Container::HeroSlot => zones.hero.invalidate(),
        Container::HeroPowerSlot => zones.hero_power.invalidate(),
        Container::WeaponSlot => zones.weapon.invalidate(),
        Container::Minions => {
            zones.minions.remove(cards, card_ref);
        }
        Container::Secrets => {
            zones.secrets.remove(&card_ref);
        }
        Container::Enchantments => {
            zones.enchantments.remove(&card_ref);
        }
        Container::Hand => {
            zones.hand.remove(cards, card_ref);
        }
        Container::Deck => {
            zones.deck.remove(cards, card_ref);
        }
        Container::Graveyard => {
            zones.graveyard.remove(cards, card_ref);
        }
    }
}

/// Attach a card. Callers run `check_add` first.
pub(crate) fn add(
    board: &mut Board,
    cards: &mut CardManager,
    player: PlayerId,
    container: Option<Container>,
    card_ref: CardRef,
    pos: Option<usize>,
) {
    let zones = board.player_mut(player);
    match container {
        None => cards.get_mut(card_ref).set_zone_pos(0),
        Some(Container::HeroSlot) => set_slot(&mut zones.hero, cards, card_ref),
        Some(Container::HeroPowerSlot) => set_slot(&mut zones.hero_power, cards, card_ref),
        Some(Container::WeaponSlot) => set_slot(&mut zones.weapon, cards, card_ref),
        Some(Container::Minions) => zones.minions.insert(cards, pos.unwrap_or_default(), card_ref),
        Some(Container::Secrets) => {
            zones.secrets.insert(card_ref);
            cards.get_mut(card_ref).set_zone_pos(0);
        }
        Some(Container::Enchantments) => {
            zones.enchantments.insert(card_ref);
            cards.get_mut(card_ref).set_zone_pos(0);
        }
        Some(Container::Hand) => zones.hand.push(cards, card_ref),
        Some(Container::Deck) => zones.deck.push(cards, card_ref),
        Some(Container::Graveyard) => zones.graveyard.push(cards, card_ref),
    }
}

/// Swap `old_ref` for `new_ref` in place. Callers run `check_remove` on
/// `old_ref` first.
pub(crate) fn replace(
    board: &mut Board,
    cards: &mut CardManager,
    player: PlayerId,
    container: Option<Container>,
    old_ref: CardRef,
    new_ref: CardRef,
) {
    let zones = board.player_mut(player);
    let pos = cards.get(old_ref).zone_pos();
    match container {
        None => cards.get_mut(new_ref).set_zone_pos(pos),
        Some(Container::HeroSlot) => set_slot(&mut zones.hero, cards, new_ref),
        Some(Container::HeroPowerSlot) => set_slot(&mut zones.hero_power, cards, new_ref),
        Some(Container::WeaponSlot) => set_slot(&mut zones.weapon, cards, new_ref),
        Some(Container::Minions) => {
            zones.minions.replace(cards, old_ref, new_ref);
        }
        Some(Container::Secrets) => {
            zones.secrets.remove(&old_ref);
            zones.secrets.insert(new_ref);
            cards.get_mut(new_ref).set_zone_pos(0);
        }
        Some(Container::Enchantments) => {
            zones.enchantments.remove(&old_ref);
            zones.enchantments.insert(new_ref);
            cards.get_mut(new_ref).set_zone_pos(0);
        }
        Some(Container::Hand) => {
            zones.hand.replace(cards, old_ref, new_ref);
        }
        Some(Container::Deck) => {
            zones.deck.replace(cards, old_ref, new_ref);
        }
        Some(Container::Graveyard) => {
            zones.graveyard.replace(cards, old_ref, new_ref);
        }
    }
}

fn set_slot(slot: &mut CardRef, cards: &mut CardManager, card_ref: CardRef) {
    *slot = card_ref;
    cards.get_mut(card_ref).set_zone_pos(0);
}
