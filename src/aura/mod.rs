//! Aura and enchantment handling.
//!
//! An aura is a continuous effect projected by a card in play ("adjacent
//! minions have +1 attack", "your other murlocs have +2 attack"). Each active
//! aura has a `Handler` that remembers which cards it enchanted and, when
//! the board changes, diffs that set against the cards currently eligible:
//!
//! 1. the validity capability decides whether the aura applies right now;
//!    an invalid aura drops all its enchantments but stays registered
//! 2. the target capability enumerates eligible cards (via `Targets`)
//! 3. stale targets lose their enchantment, then new targets gain one
//!
//! Cards that stay eligible keep their enchantment untouched. A handler is
//! only dropped once its source leaves play.
//!
//! ## Key Types
//!
//! - `AuraCallbacks`: the four capability slots card scripts provide
//! - `Handler`: per-aura applied-enchantment map and change tracking
//! - `AuraManager`: handlers of one state, keyed by source card

mod contexts;
mod handler;
mod manager;

pub use contexts::{AuraApplyOn, AuraGetTargets, AuraIsValid, AuraRemoveFrom};
pub use handler::{AuraCallbacks, FuncApplyOn, FuncGetTargets, FuncIsValid, FuncRemoveFrom, Handler};
pub use manager::AuraManager;
