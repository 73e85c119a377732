//! Core types: card references, players, state, RNG, configuration.

pub mod card_ref;
pub mod config;
pub mod player;
pub mod rng;
pub mod state;

pub use card_ref::CardRef;
pub use config::{Config, SharedConfig};
pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, RandomGenerator, ScriptedRandom};
pub use state::{State, ZoneEvent};
