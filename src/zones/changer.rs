//! Zone transition engine.
//!
//! `ZoneChanger` moves one card between zones (and owners, and board
//! positions) while keeping the per-player indices, the card record and the
//! notification hooks in agreement.
//!
//! A transition runs in a fixed order:
//!
//! 1. resolve and validate the current zone and type (caller assertions
//!    included) and the destination position rule
//! 2. detach from the source index
//! 3. fire "removed" (only if the zone changes)
//! 4. write the new zone, owner and position into the record
//! 5. attach to the destination index
//! 6. fire "added" (only if the zone changes)
//!
//! Every check happens in step 1, so a rejected transition leaves the state
//! untouched.
//!
//! ## Usage
//!
//! ```
//! use hearth_state::cards::{Card, CardId, CardType, CardZone};
//! use hearth_state::core::{PlayerId, State};
//!
//! let mut state = State::new();
//! let minion = state.create_card(Card::minion(CardId::new(1), 2, 2));
//!
//! state.zone_changer(minion).change_to(CardZone::Hand, PlayerId::FIRST);
//! state
//!     .zone_changer(minion)
//!     .expect_zone(CardZone::Hand)
//!     .expect_type(CardType::Minion)
//!     .change_to_at(CardZone::Play, PlayerId::FIRST, 0);
//!
//! assert_eq!(state.board().first().minions().to_vec(), vec![minion]);
//! ```

use log::trace;

use super::error::{Result, ZoneError};
use super::maintainer::{self, Container};
use crate::cards::{CardType, CardZone};
use crate::core::{CardRef, PlayerId, State};

/// Moves one card. Created by `State::zone_changer`.
///
/// `expect_zone` / `expect_type` record what the caller believes the card's
/// current zone and type are; a mismatch is a fault. Without them the
/// changer dispatches on the record's actual tags.
#[must_use = "a zone changer does nothing until change_to or replace_by is called"]
pub struct ZoneChanger<'a> {
    state: &'a mut State,
    card_ref: CardRef,
    expected_zone: Option<CardZone>,
    expected_type: Option<CardType>,
}

impl<'a> ZoneChanger<'a> {
    pub(crate) fn new(state: &'a mut State, card_ref: CardRef) -> Self {
        Self {
            state,
            card_ref,
            expected_zone: None,
            expected_type: None,
        }
    }

    /// Assert the card's current zone.
    pub fn expect_zone(mut self, zone: CardZone) -> Self {
        self.expected_zone = Some(zone);
        self
    }

    /// Assert the card's type.
    pub fn expect_type(mut self, card_type: CardType) -> Self {
        self.expected_type = Some(card_type);
        self
    }

    /// Move into an unordered destination.
    ///
    /// Panics on any contract violation, see `try_change_to`.
    pub fn change_to(self, zone: CardZone, player: PlayerId) {
        if let Err(err) = self.try_change_to(zone, player) {
            panic!("zone change rejected: {}", err);
        }
    }

    /// Move into an ordered destination (a minion onto the board).
    ///
    /// Panics on any contract violation, see `try_change_to_at`.
    pub fn change_to_at(self, zone: CardZone, player: PlayerId, pos: usize) {
        if let Err(err) = self.try_change_to_at(zone, player, pos) {
            panic!("zone change rejected: {}", err);
        }
    }

    /// Move into an unordered destination, reporting faults as values.
    pub fn try_change_to(self, zone: CardZone, player: PlayerId) -> Result<()> {
        self.transition(zone, player, None)
    }

    /// Move into an ordered destination, reporting faults as values.
    pub fn try_change_to_at(self, zone: CardZone, player: PlayerId, pos: usize) -> Result<()> {
        self.transition(zone, player, Some(pos))
    }

    /// Put `new_ref` exactly where this card is and set this card aside.
    ///
    /// `new_ref` must be newly created or set aside and share this card's
    /// type. Fires "removed" for this card and "added" for `new_ref`.
    pub fn replace_by(self, new_ref: CardRef) {
        if let Err(err) = self.try_replace_by(new_ref) {
            panic!("card replacement rejected: {}", err);
        }
    }

    /// `replace_by`, reporting faults as values.
    pub fn try_replace_by(self, new_ref: CardRef) -> Result<()> {
        let (zone, card_type) = self.resolve()?;
        let old_ref = self.card_ref;
        let state = self.state;

        let new_card = state.cards.get(new_ref);
        if !matches!(new_card.zone(), CardZone::NewlyCreated | CardZone::SetASide) {
            return Err(ZoneError::ReplaceSourceZone {
                card: new_ref,
                zone: new_card.zone(),
            });
        }
        if new_card.card_type() != card_type {
            return Err(ZoneError::ReplaceTypeMismatch {
                card: new_ref,
                expected: card_type,
                actual: new_card.card_type(),
            });
        }

        let player = state.cards.get(old_ref).player();
        let container = Container::of(card_type, zone);
        maintainer::check_remove(&state.board, player, zone, container, old_ref)?;

        trace!("replace {} by {} in {:?} of {}", old_ref, new_ref, zone, player);
        maintainer::replace(
            &mut state.board,
            &mut state.cards,
            player,
            container,
            old_ref,
            new_ref,
        );
        state.cards.get_mut(new_ref).set_zone(player, zone);
        state.cards.get_mut(old_ref).set_zone(player, CardZone::SetASide);

        state.notify_removed(old_ref, card_type, zone, player);
        state.notify_added(new_ref, card_type, zone, player);
        Ok(())
    }

    /// Current zone and type, after checking caller assertions.
    fn resolve(&self) -> Result<(CardZone, CardType)> {
        let card = self.state.cards.get(self.card_ref);
        let (zone, card_type) = (card.zone(), card.card_type());

        if let Some(expected) = self.expected_zone {
            if expected != zone {
                return Err(ZoneError::ZoneMismatch {
                    card: self.card_ref,
                    expected,
                    actual: zone,
                });
            }
        }
        if let Some(expected) = self.expected_type {
            if expected != card_type {
                return Err(ZoneError::TypeMismatch {
                    card: self.card_ref,
                    expected,
                    actual: card_type,
                });
            }
        }
        if card_type == CardType::Invalid {
            return Err(ZoneError::InvalidCardType { card: self.card_ref });
        }
        Ok((zone, card_type))
    }

    fn transition(self, to_zone: CardZone, to_player: PlayerId, pos: Option<usize>) -> Result<()> {
        let (from_zone, card_type) = self.resolve()?;
        let card_ref = self.card_ref;
        let state = self.state;
        let from_player = state.cards.get(card_ref).player();

        let source = Container::of(card_type, from_zone);
        let destination = Container::of(card_type, to_zone);
        let takes_position = destination.is_some_and(Container::takes_position);
        match (takes_position, pos) {
            (true, None) => {
                return Err(ZoneError::PositionRequired {
                    card_type,
                    zone: to_zone,
                })
            }
            (false, Some(_)) => {
                return Err(ZoneError::PositionNotAllowed {
                    card_type,
                    zone: to_zone,
                })
            }
            _ => {}
        }

        maintainer::check_remove(&state.board, from_player, from_zone, source, card_ref)?;
        // leaving a container of the other player does not free a slot here
        let check_ref = if from_player == to_player { card_ref } else { CardRef::INVALID };
        maintainer::check_add(&state.board, to_player, card_type, destination, check_ref, pos)?;

        let zone_changed = from_zone != to_zone;
        trace!(
            "{} {:?}: {:?} of {} -> {:?} of {} at {:?}",
            card_ref,
            card_type,
            from_zone,
            from_player,
            to_zone,
            to_player,
            pos
        );

        maintainer::remove(&mut state.board, &mut state.cards, from_player, source, card_ref);
        if zone_changed {
            state.notify_removed(card_ref, card_type, from_zone, from_player);
        }

        state.cards.get_mut(card_ref).set_zone(to_player, to_zone);

        maintainer::add(&mut state.board, &mut state.cards, to_player, destination, card_ref, pos);
        if zone_changed {
            state.notify_added(card_ref, card_type, to_zone, to_player);
        }
        Ok(())
    }
}
