//! Zone transition faults.
//!
//! Every variant is a contract violation by the caller or a corrupted state.
//! The default `ZoneChanger` API panics with the `Display` text; the
//! `try_*` API returns the value so tools can inspect the fault kind.

use thiserror::Error;

use crate::cards::{CardType, CardZone};
use crate::core::{CardRef, PlayerId};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ZoneError {
    #[error("{card} is in zone {actual:?}, caller asserted {expected:?}")]
    ZoneMismatch {
        card: CardRef,
        expected: CardZone,
        actual: CardZone,
    },

    #[error("{card} has type {actual:?}, caller asserted {expected:?}")]
    TypeMismatch {
        card: CardRef,
        expected: CardType,
        actual: CardType,
    },

    #[error("{card} has an invalid card type")]
    InvalidCardType { card: CardRef },

    #[error("moving {card_type:?} into {zone:?} requires a position")]
    PositionRequired { card_type: CardType, zone: CardZone },

    #[error("moving {card_type:?} into {zone:?} does not take a position")]
    PositionNotAllowed { card_type: CardType, zone: CardZone },

    #[error("position {pos} out of range 0..={max} for {player} board")]
    PositionOutOfRange { player: PlayerId, pos: usize, max: usize },

    #[error("{player} {card_type:?} slot already holds {occupant}")]
    SlotOccupied {
        player: PlayerId,
        card_type: CardType,
        occupant: CardRef,
    },

    #[error("{card} claims zone {zone:?} for {player} but is missing from its index")]
    NotIndexed {
        card: CardRef,
        zone: CardZone,
        player: PlayerId,
    },

    #[error("replacement {card} must be newly created or set aside, found {zone:?}")]
    ReplaceSourceZone { card: CardRef, zone: CardZone },

    #[error("replacement {card} has type {actual:?}, expected {expected:?}")]
    ReplaceTypeMismatch {
        card: CardRef,
        expected: CardType,
        actual: CardType,
    },
}

pub type Result<T> = std::result::Result<T, ZoneError>;
