//! # hearth-state
//!
//! Zone, aura and targeting core of a two-player collectible card game,
//! built for Monte Carlo tree search.
//!
//! ## Design Principles
//!
//! 1. **One Transition Engine**: Every card move goes through `ZoneChanger`,
//!    which keeps the card record, the per-player indices and the
//!    notifications in agreement.
//!
//! 2. **Faults Are Loud**: Contract violations (wrong zone, occupied slot,
//!    missing position) panic. A `try_*` API exposes them as `ZoneError`.
//!
//! 3. **Injected Decisions**: Randomness and player choices come from
//!    `RandomGenerator` and `ActionParameterGetter`, so identical decisions
//!    replay to identical states.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) cloning via `im-rs` for search.
//!
//! - **No Back-References**: Records hold plain `CardRef`s, so a cloned
//!   state needs no fix-up.
//!
//! - **Lazy Auras**: Aura handlers re-evaluate only when a minion board
//!   changed since their previous evaluation.
//!
//! ## Modules
//!
//! - `core`: Card references, players, state, RNG, configuration
//! - `cards`: Card records, enums and the card store
//! - `zones`: Zone indices and the transition engine
//! - `targeting`: Target specifications and resolution
//! - `aura`: Aura handlers and their manager
//! - `flow`: Per-action flow context and decision queries

pub mod aura;
pub mod cards;
pub mod core;
pub mod flow;
pub mod targeting;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    CardRef, PlayerId, PlayerMap,
    RandomGenerator, GameRng, ScriptedRandom,
    Config, SharedConfig,
    State, ZoneEvent,
};

pub use crate::cards::{
    Card, CardId, CardManager, CardRace, CardType, CardZone, Enchantment, EnchantmentId,
};

pub use crate::zones::{Board, CardList, Minions, PlayerZones, ZoneChanger, ZoneError};

pub use crate::targeting::{MinionFilter, Targets};

pub use crate::aura::{AuraCallbacks, AuraManager, Handler};

pub use crate::flow::{
    ActionChoices, ActionParameterGetter, ActionType, ChoiceParameterGetter,
    FlowContext, FlowResult, MainOp, NumberedChoice,
};
