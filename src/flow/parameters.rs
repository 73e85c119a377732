//! Action parameter queries.
//!
//! Whenever the rules need a decision from the acting player (which
//! defender to attack, where to put a minion, which card to target, which
//! choose-one option to take) the flow context asks an
//! `ActionParameterGetter`. The search agent answers every such query with
//! a single numbered choice, which `ChoiceParameterGetter` adapts.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::CardId;
use crate::core::{CardRef, State};

/// Source of the acting player's decisions.
pub trait ActionParameterGetter {
    /// Pick the attack target among `defenders` (never empty).
    fn get_defender(&mut self, defenders: &[CardRef]) -> CardRef;

    /// Pick a board position in `min..=max`.
    fn get_minion_put_location(&mut self, min: usize, max: usize) -> usize;

    /// Pick the target of `source` among `targets` (never empty).
    ///
    /// Returning a reference outside `targets` aborts the action.
    fn get_specified_target(
        &mut self,
        state: &State,
        source: CardRef,
        targets: &[CardRef],
    ) -> CardRef;

    /// Pick one of the choose-one options, by index.
    fn choose_one(&mut self, cards: &[CardId]) -> usize;
}

/// Kind of decision a numbered choice answers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionType {
    MainAction,
    ChooseHandCard,
    ChooseAttacker,
    ChooseDefender,
    ChooseMinionPutLocation,
    ChooseTarget,
    ChooseOne,
    ChooseRandom,
}

/// Options presented with a numbered choice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionChoices {
    /// Any number in `begin..=end`.
    Range { begin: usize, end: usize },
    /// One of the listed cards, answered by index.
    Cards(SmallVec<[CardId; 3]>),
}

impl ActionChoices {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Range { begin, end } => {
                if end < begin {
                    0
                } else {
                    end - begin + 1
                }
            }
            Self::Cards(cards) => cards.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Callback answering every query with an index into the choices.
pub trait NumberedChoice {
    /// Return an index in `0..choices.len()`.
    fn get_number(&mut self, action_type: ActionType, choices: &ActionChoices) -> usize;
}

impl<T: NumberedChoice + ?Sized> NumberedChoice for &mut T {
    fn get_number(&mut self, action_type: ActionType, choices: &ActionChoices) -> usize {
        (**self).get_number(action_type, choices)
    }
}

/// Top-level operation of a turn step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MainOp {
    PlayCard,
    Attack,
    HeroPower,
    EndTurn,
}

impl MainOp {
    pub const ALL: [MainOp; 4] = [
        MainOp::PlayCard,
        MainOp::Attack,
        MainOp::HeroPower,
        MainOp::EndTurn,
    ];
}

/// Adapts a `NumberedChoice` callback to `ActionParameterGetter`.
#[derive(Debug)]
pub struct ChoiceParameterGetter<C> {
    callback: C,
    main_op: Option<MainOp>,
}

impl<C: NumberedChoice> ChoiceParameterGetter<C> {
    pub fn new(callback: C) -> Self {
        Self { callback, main_op: None }
    }

    /// Operation selected by the last `choose_main_op`.
    #[must_use]
    pub fn main_op(&self) -> Option<MainOp> {
        self.main_op
    }

    pub fn set_main_op(&mut self, main_op: MainOp) {
        self.main_op = Some(main_op);
    }

    /// Ask the callback which of `playable` to perform and remember it.
    ///
    /// Panics if `playable` is empty.
    pub fn choose_main_op(&mut self, playable: &[MainOp]) -> MainOp {
        assert!(!playable.is_empty(), "no main operation is available");
        let choices = ActionChoices::Range {
            begin: 0,
            end: playable.len() - 1,
        };
        let idx = self.ask(ActionType::MainAction, &choices);
        let main_op = playable[idx];
        self.main_op = Some(main_op);
        main_op
    }

    pub fn callback_mut(&mut self) -> &mut C {
        &mut self.callback
    }

    pub fn into_inner(self) -> C {
        self.callback
    }

    fn ask(&mut self, action_type: ActionType, choices: &ActionChoices) -> usize {
        let idx = self.callback.get_number(action_type, choices);
        assert!(
            idx < choices.len(),
            "choice {} out of range for {:?} with {} options",
            idx,
            action_type,
            choices.len()
        );
        idx
    }

    fn pick_card(&mut self, action_type: ActionType, refs: &[CardRef]) -> CardRef {
        assert!(!refs.is_empty(), "no candidate for {:?}", action_type);
        let choices = ActionChoices::Range {
            begin: 0,
            end: refs.len() - 1,
        };
        refs[self.ask(action_type, &choices)]
    }
}

impl<C: NumberedChoice> ActionParameterGetter for ChoiceParameterGetter<C> {
    fn get_defender(&mut self, defenders: &[CardRef]) -> CardRef {
        self.pick_card(ActionType::ChooseDefender, defenders)
    }

    fn get_minion_put_location(&mut self, min: usize, max: usize) -> usize {
        let choices = ActionChoices::Range { begin: min, end: max };
        min + self.ask(ActionType::ChooseMinionPutLocation, &choices)
    }

    fn get_specified_target(
        &mut self,
        _state: &State,
        _source: CardRef,
        targets: &[CardRef],
    ) -> CardRef {
        self.pick_card(ActionType::ChooseTarget, targets)
    }

    fn choose_one(&mut self, cards: &[CardId]) -> usize {
        let choices = ActionChoices::Cards(cards.iter().copied().collect());
        self.ask(ActionType::ChooseOne, &choices)
    }
}
