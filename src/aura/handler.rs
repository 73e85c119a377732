//! Per-aura handler.
//!
//! A `Handler` keeps track of which cards currently carry the enchantment
//! its aura grants. It is re-evaluated lazily: `update` does nothing until
//! one of the two players' minion boards has changed since the previous
//! evaluation.
//!
//! ```text
//! Registered-Idle --(minion change id advances)--> Registered-Dirty
//! Registered-Dirty --update, valid--> Registered-Idle (diff applied)
//! Registered-Dirty --update, invalid--> Registered-Idle (all enchantments removed)
//! Registered-* --source leaves play--> Teardown (all enchantments removed, dropped)
//! ```
//!
//! An invalid aura stays registered: a conditional aura ("while you control
//! a murloc") comes back on the next board change that makes it valid.

use std::fmt;

use im::OrdMap;
use log::debug;
use rustc_hash::FxHashSet;

use super::contexts::{AuraApplyOn, AuraGetTargets, AuraIsValid, AuraRemoveFrom};
use crate::cards::EnchantmentId;
use crate::core::{CardRef, State};
use crate::flow::FlowContext;

pub type FuncIsValid = for<'a, 'f> fn(AuraIsValid<'a, 'f>) -> bool;
pub type FuncGetTargets = for<'a, 'f> fn(AuraGetTargets<'a, 'f>);
pub type FuncApplyOn = for<'a, 'f> fn(AuraApplyOn<'a, 'f>) -> EnchantmentId;
pub type FuncRemoveFrom = for<'a, 'f> fn(AuraRemoveFrom<'a, 'f>);

/// The four capability slots of an aura.
///
/// Card scripts fill these in and attach them to a card with
/// `Card::with_aura`; the state registers a handler when the card enters
/// play. A slot left empty is only a fault once `update` needs it.
///
/// During `State::update_auras` the handler being evaluated is detached
/// from the manager, so `state.auras()` seen from its own callbacks lists
/// every other aura but not this one. A source that left play is torn down
/// on the next `update_auras`, not inside the zone transition.
#[derive(Clone, Copy, Default)]
pub struct AuraCallbacks {
    pub is_valid: Option<FuncIsValid>,
    pub get_targets: Option<FuncGetTargets>,
    pub apply_on: Option<FuncApplyOn>,
    pub remove_from: Option<FuncRemoveFrom>,
}

impl AuraCallbacks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_is_valid(mut self, callback: FuncIsValid) -> Self {
        self.is_valid = Some(callback);
        self
    }

    #[must_use]
    pub fn with_get_targets(mut self, callback: FuncGetTargets) -> Self {
        self.get_targets = Some(callback);
        self
    }

    #[must_use]
    pub fn with_apply_on(mut self, callback: FuncApplyOn) -> Self {
        self.apply_on = Some(callback);
        self
    }

    #[must_use]
    pub fn with_remove_from(mut self, callback: FuncRemoveFrom) -> Self {
        self.remove_from = Some(callback);
        self
    }
}

impl fmt::Debug for AuraCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuraCallbacks")
            .field("is_valid", &self.is_valid.is_some())
            .field("get_targets", &self.get_targets.is_some())
            .field("apply_on", &self.apply_on.is_some())
            .field("remove_from", &self.remove_from.is_some())
            .finish()
    }
}

/// State of one active aura.
#[derive(Clone, Debug)]
pub struct Handler {
    callbacks: AuraCallbacks,
    applied_enchantments: OrdMap<CardRef, EnchantmentId>,
    last_change_id_first_player_minions: i64,
    last_change_id_second_player_minions: i64,
}

impl Default for Handler {
    fn default() -> Self {
        Self::new(AuraCallbacks::default())
    }
}

impl Handler {
    /// Create a handler that will evaluate on its first `update`.
    #[must_use]
    pub fn new(callbacks: AuraCallbacks) -> Self {
        Self {
            callbacks,
            applied_enchantments: OrdMap::new(),
            // change ids start at zero, so -1 forces the first evaluation
            last_change_id_first_player_minions: -1,
            last_change_id_second_player_minions: -1,
        }
    }

    pub fn set_is_valid(&mut self, callback: FuncIsValid) {
        self.callbacks.is_valid = Some(callback);
    }

    pub fn set_get_targets(&mut self, callback: FuncGetTargets) {
        self.callbacks.get_targets = Some(callback);
    }

    pub fn set_apply_on(&mut self, callback: FuncApplyOn) {
        self.callbacks.apply_on = Some(callback);
    }

    pub fn set_remove_from(&mut self, callback: FuncRemoveFrom) {
        self.callbacks.remove_from = Some(callback);
    }

    /// Check if no enchantment is currently applied by this aura.
    #[must_use]
    pub fn no_applied_enchantment(&self) -> bool {
        self.applied_enchantments.is_empty()
    }

    /// Enchantment this aura applied to `target`, if any.
    #[must_use]
    pub fn applied_enchantment(&self, target: CardRef) -> Option<EnchantmentId> {
        self.applied_enchantments.get(&target).copied()
    }

    /// Cards currently carrying this aura's enchantment, by reference.
    pub fn applied_targets(&self) -> impl Iterator<Item = CardRef> + '_ {
        self.applied_enchantments.keys().copied()
    }

    /// Minion change ids (first player, second player) seen by the last evaluation.
    #[must_use]
    pub fn last_change_ids(&self) -> (i64, i64) {
        (
            self.last_change_id_first_player_minions,
            self.last_change_id_second_player_minions,
        )
    }

    /// Check if the next `update` will re-evaluate.
    #[must_use]
    pub fn is_dirty(&self, state: &State) -> bool {
        current_change_ids(state) != self.last_change_ids()
    }

    /// Re-evaluate the aura if either minion board changed.
    ///
    /// When the validity check fails every applied enchantment is removed
    /// and the handler goes back to idle; it stays registered.
    ///
    /// Panics if a capability needed on the taken path is unset.
    pub fn update(&mut self, state: &mut State, flow: &mut FlowContext<'_>, source: CardRef) {
        let (first, second) = current_change_ids(state);
        if (first, second) == self.last_change_ids() {
            return;
        }

        let is_valid = required(self.callbacks.is_valid, "is_valid");
        let valid = is_valid(AuraIsValid {
            state: &*state,
            flow: &mut *flow,
            source,
        });

        if !valid {
            self.remove_all(state, flow, source);
            self.last_change_id_first_player_minions = first;
            self.last_change_id_second_player_minions = second;
            debug!("aura of {} not valid, idle", source);
            return;
        }

        let get_targets = required(self.callbacks.get_targets, "get_targets");
        let mut targets = Vec::new();
        get_targets(AuraGetTargets {
            state: &*state,
            flow: &mut *flow,
            source,
            targets: &mut targets,
        });
        let eligible: FxHashSet<CardRef> = targets.iter().copied().collect();

        let stale: Vec<(CardRef, EnchantmentId)> = self
            .applied_enchantments
            .iter()
            .filter(|(target, _)| !eligible.contains(*target))
            .map(|(&target, &id)| (target, id))
            .collect();
        if !stale.is_empty() {
            let remove_from = required(self.callbacks.remove_from, "remove_from");
            for (target, enchantment) in &stale {
                remove_from(AuraRemoveFrom {
                    state: &mut *state,
                    flow: &mut *flow,
                    source,
                    target: *target,
                    enchantment: *enchantment,
                });
                self.applied_enchantments.remove(target);
            }
        }

        let mut added = 0;
        for target in targets {
            if self.applied_enchantments.contains_key(&target) {
                continue;
            }
            let apply_on = required(self.callbacks.apply_on, "apply_on");
            let enchantment = apply_on(AuraApplyOn {
                state: &mut *state,
                flow: &mut *flow,
                source,
                target,
            });
            self.applied_enchantments.insert(target, enchantment);
            added += 1;
        }

        debug!(
            "aura of {} re-evaluated: {} removed, {} added, {} applied",
            source,
            stale.len(),
            added,
            self.applied_enchantments.len()
        );
        self.last_change_id_first_player_minions = first;
        self.last_change_id_second_player_minions = second;
    }

    /// Remove every applied enchantment before the handler is dropped.
    pub(crate) fn teardown(
        &mut self,
        state: &mut State,
        flow: &mut FlowContext<'_>,
        source: CardRef,
    ) {
        self.remove_all(state, flow, source);
        debug!("aura of {} torn down", source);
    }

    fn remove_all(&mut self, state: &mut State, flow: &mut FlowContext<'_>, source: CardRef) {
        if self.applied_enchantments.is_empty() {
            return;
        }
        let remove_from = required(self.callbacks.remove_from, "remove_from");
        let applied = std::mem::take(&mut self.applied_enchantments);
        for (target, enchantment) in applied {
            remove_from(AuraRemoveFrom {
                state: &mut *state,
                flow: &mut *flow,
                source,
                target,
                enchantment,
            });
        }
    }
}

fn current_change_ids(state: &State) -> (i64, i64) {
    (
        state.board().first().minions().change_id(),
        state.board().second().minions().change_id(),
    )
}

fn required<F>(slot: Option<F>, name: &str) -> F {
    match slot {
        Some(callback) => callback,
        None => panic!("aura handler is missing its {} callback", name),
    }
}
