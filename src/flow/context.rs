//! Per-action flow context.
//!
//! `FlowContext` carries everything that lives for the duration of one
//! player action but not in the game state itself: the injected random and
//! decision sources, parameters already resolved for this action, cards
//! waiting to be resolved as dead, and the game result once decided.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::parameters::ActionParameterGetter;
use crate::cards::CardId;
use crate::core::{CardRef, RandomGenerator, State};
use crate::targeting::Targets;

/// Outcome of the game as known so far.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlowResult {
    #[default]
    NotDetermined,
    FirstPlayerWin,
    SecondPlayerWin,
    Draw,
    Invalid,
}

impl FlowResult {
    /// Check if the game has ended (or was aborted).
    #[must_use]
    pub fn is_determined(self) -> bool {
        self != FlowResult::NotDetermined
    }
}

pub struct FlowContext<'a> {
    random: &'a mut dyn RandomGenerator,
    action_parameters: &'a mut dyn ActionParameterGetter,
    result: FlowResult,
    dead_entity_hints: BTreeMap<i32, SmallVec<[CardRef; 2]>>,
    destroyed_weapon: CardRef,
    minion_put_location: Option<usize>,
    specified_target: CardRef,
    user_choice: Option<usize>,
}

impl<'a> FlowContext<'a> {
    pub fn new(
        random: &'a mut dyn RandomGenerator,
        action_parameters: &'a mut dyn ActionParameterGetter,
    ) -> Self {
        Self {
            random,
            action_parameters,
            result: FlowResult::NotDetermined,
            dead_entity_hints: BTreeMap::new(),
            destroyed_weapon: CardRef::INVALID,
            minion_put_location: None,
            specified_target: CardRef::INVALID,
            user_choice: None,
        }
    }

    /// Injected random source.
    pub fn random(&mut self) -> &mut (dyn RandomGenerator + 'a) {
        &mut *self.random
    }

    #[must_use]
    pub fn result(&self) -> FlowResult {
        self.result
    }

    pub fn set_result(&mut self, result: FlowResult) {
        self.result = result;
    }

    /// Forget the parameters resolved for the previous action.
    pub fn reset_action_parameter(&mut self) {
        self.minion_put_location = None;
        self.specified_target = CardRef::INVALID;
    }

    /// Ask for the attack target.
    ///
    /// Panics if `defenders` is empty.
    pub fn get_defender(&mut self, defenders: &[CardRef]) -> CardRef {
        assert!(!defenders.is_empty(), "no defender to choose from");
        self.action_parameters.get_defender(defenders)
    }

    /// Board position for the minion being played, asked at most once per action.
    pub fn get_minion_put_location(&mut self, min: usize, max: usize) -> usize {
        if let Some(pos) = self.minion_put_location {
            return pos;
        }
        let pos = if min >= max {
            min
        } else {
            self.action_parameters.get_minion_put_location(min, max)
        };
        self.minion_put_location = Some(pos);
        pos
    }

    /// Resolve the target of `source` among `targets`.
    ///
    /// Returns true if a target is set (or none is needed and
    /// `allow_no_target` holds), false if the action cannot proceed.
    pub fn prepare_specified_target(
        &mut self,
        state: &State,
        source: CardRef,
        targets: &Targets,
        allow_no_target: bool,
    ) -> bool {
        if self.specified_target.is_valid() {
            return true;
        }

        let mut candidates = Vec::new();
        targets.fill(state, &mut candidates);
        if candidates.is_empty() {
            return allow_no_target;
        }

        let chosen = self.action_parameters.get_specified_target(state, source, &candidates);
        if !candidates.contains(&chosen) {
            return false;
        }
        self.specified_target = chosen;
        true
    }

    /// Redirect the action to another target.
    pub fn change_specified_target(&mut self, target: CardRef) {
        self.specified_target = target;
    }

    /// Target resolved for this action, or `CardRef::INVALID`.
    #[must_use]
    pub fn specified_target(&self) -> CardRef {
        self.specified_target
    }

    /// Ask which choose-one option to take.
    pub fn get_choose_one_user_action(&mut self, cards: &[CardId]) -> usize {
        self.action_parameters.choose_one(cards)
    }

    #[must_use]
    pub fn saved_user_choice(&self) -> Option<usize> {
        self.user_choice
    }

    pub fn save_user_choice(&mut self, choice: usize) {
        self.user_choice = Some(choice);
    }

    /// Queue `card_ref` for death resolution. Lower priority resolves first.
    pub fn add_dead_entity_hint(&mut self, priority: i32, card_ref: CardRef) {
        self.dead_entity_hints.entry(priority).or_default().push(card_ref);
    }

    /// Queued hints by priority, insertion order within a priority.
    pub fn dead_entity_hints(&self) -> impl Iterator<Item = (i32, CardRef)> + '_ {
        self.dead_entity_hints
            .iter()
            .flat_map(|(&priority, refs)| refs.iter().map(move |&r| (priority, r)))
    }

    pub fn for_each_dead_entity_hint(&self, mut f: impl FnMut(i32, CardRef)) {
        for (priority, card_ref) in self.dead_entity_hints() {
            f(priority, card_ref);
        }
    }

    /// Drain the queued hints in resolution order.
    pub fn take_dead_entity_hints(&mut self) -> Vec<(i32, CardRef)> {
        let hints = std::mem::take(&mut self.dead_entity_hints);
        hints
            .into_iter()
            .flat_map(|(priority, refs)| refs.into_iter().map(move |r| (priority, r)))
            .collect()
    }

    pub fn clear_dead_entity_hints(&mut self) {
        self.dead_entity_hints.clear();
    }

    /// Check if nothing awaits death resolution.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dead_entity_hints.is_empty() && !self.destroyed_weapon.is_valid()
    }

    /// Remember the weapon destroyed by this action.
    ///
    /// Panics if one is already pending.
    pub fn set_destroyed_weapon(&mut self, weapon: CardRef) {
        assert!(
            !self.destroyed_weapon.is_valid(),
            "destroyed weapon already set to {}",
            self.destroyed_weapon
        );
        self.destroyed_weapon = weapon;
    }

    #[must_use]
    pub fn destroyed_weapon(&self) -> CardRef {
        self.destroyed_weapon
    }

    pub fn clear_destroyed_weapon(&mut self) {
        self.destroyed_weapon = CardRef::INVALID;
    }
}

impl std::fmt::Debug for FlowContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlowContext")
            .field("result", &self.result)
            .field("dead_entity_hints", &self.dead_entity_hints)
            .field("destroyed_weapon", &self.destroyed_weapon)
            .field("minion_put_location", &self.minion_put_location)
            .field("specified_target", &self.specified_target)
            .field("user_choice", &self.user_choice)
            .finish_non_exhaustive()
    }
}
