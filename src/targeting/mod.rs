//! Target resolution.
//!
//! A `Targets` value describes which characters an effect can reach (which
//! sides, heroes and/or minions, one excluded reference, a minion filter)
//! and resolves that description against the live board indices.

mod targets;

pub use targets::{MinionFilter, Targets};
