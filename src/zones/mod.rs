//! Zone indices and the zone transition engine.
//!
//! ## Key Types
//!
//! - `Board` / `PlayerZones`: per-player indices of cards by (type, zone)
//! - `CardList` / `Minions`: ordered containers keeping `zone_pos` in sync
//! - `ZoneChanger`: moves a card between zones, firing notifications
//! - `ZoneError`: contract violations detected by the changer

mod changer;
mod error;
mod index;
mod maintainer;

pub use changer::ZoneChanger;
pub use error::ZoneError;
pub use index::{Board, CardList, Minions, PlayerZones};
pub use maintainer::requires_position;
