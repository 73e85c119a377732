//! Registry of the active aura handlers of one state.

use im::{OrdMap, OrdSet};
use log::debug;

use super::handler::Handler;
use crate::core::CardRef;

/// Active aura handlers keyed by their source card.
///
/// Handlers are visited in source reference order, which keeps updates
/// deterministic across clones. A handler whose source left play is marked
/// for teardown and removed by the next `State::update_auras`.
#[derive(Clone, Debug, Default)]
pub struct AuraManager {
    handlers: OrdMap<CardRef, Handler>,
    retiring: OrdSet<CardRef>,
}

impl AuraManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for `source`.
    ///
    /// Returns false and keeps the existing handler if `source` already has
    /// one. Either way a pending teardown of `source` is cancelled.
    pub fn register(&mut self, source: CardRef, handler: Handler) -> bool {
        if self.retiring.remove(&source).is_some() {
            debug!("aura of {} back in play, teardown cancelled", source);
        }
        if self.handlers.contains_key(&source) {
            return false;
        }
        debug!("aura of {} registered", source);
        self.handlers.insert(source, handler);
        true
    }

    #[must_use]
    pub fn get(&self, source: CardRef) -> Option<&Handler> {
        self.handlers.get(&source)
    }

    #[must_use]
    pub fn contains(&self, source: CardRef) -> bool {
        self.handlers.contains_key(&source)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Source cards of all active auras.
    pub fn sources(&self) -> impl Iterator<Item = CardRef> + '_ {
        self.handlers.keys().copied()
    }

    /// Check if the handler of `source` will be torn down by the next update.
    #[must_use]
    pub fn pending_teardown(&self, source: CardRef) -> bool {
        self.retiring.contains(&source)
    }

    /// Mark the handler of `source` for teardown.
    ///
    /// The mark also holds while the handler is detached for evaluation, so
    /// a callback moving its own source out of play is honoured.
    pub(crate) fn retire(&mut self, source: CardRef) {
        debug!("aura of {} left play, teardown pending", source);
        self.retiring.insert(source);
    }

    /// Consume the teardown mark of `source`.
    pub(crate) fn take_teardown(&mut self, source: CardRef) -> bool {
        self.retiring.remove(&source).is_some()
    }

    /// Take the handler of `source` out for evaluation.
    pub(crate) fn detach(&mut self, source: CardRef) -> Option<Handler> {
        self.handlers.remove(&source)
    }

    /// Put an evaluated handler back.
    ///
    /// A handler registered for `source` meanwhile (its callbacks moved the
    /// source out of play and back in) is replaced.
    pub(crate) fn attach(&mut self, source: CardRef, handler: Handler) {
        self.handlers.insert(source, handler);
    }
}
