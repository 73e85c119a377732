//! Flow context integration tests.
//!
//! Target preparation goes through the numbered-choice adapter used by the
//! search agent.

use hearth_state::cards::{Card, CardId, CardZone};
use hearth_state::core::{CardRef, GameRng, PlayerId, RandomGenerator, State};
use hearth_state::flow::{
    ActionChoices, ActionParameterGetter, ActionType, ChoiceParameterGetter, FlowContext,
    NumberedChoice,
};
use hearth_state::targeting::{MinionFilter, Targets};

/// Answers every query with the same index and records what was asked.
#[derive(Default)]
struct FixedChoice {
    answer: usize,
    asked: Vec<(ActionType, usize)>,
}

impl NumberedChoice for FixedChoice {
    fn get_number(&mut self, action_type: ActionType, choices: &ActionChoices) -> usize {
        self.asked.push((action_type, choices.len()));
        self.answer
    }
}

/// Two heroes and two minions per side.
fn setup() -> (State, Vec<CardRef>) {
    let mut state = State::new();
    let mut refs = Vec::new();
    for player in PlayerId::both() {
        let hero = state.create_card(Card::hero(CardId::new(100), 30));
        state.zone_changer(hero).change_to(CardZone::Play, player);
        refs.push(hero);
        for i in 0..2 {
            let minion = state.create_card(Card::minion(CardId::new(i), 1, 1));
            state.zone_changer(minion).change_to_at(CardZone::Play, player, i as usize);
            refs.push(minion);
        }
    }
    (state, refs)
}

#[test]
fn test_prepare_specified_target_asks_once() {
    let (state, refs) = setup();
    let source = refs[1];
    let spec = Targets::enemy_of(PlayerId::FIRST).characters();

    let mut random = GameRng::new(7);
    let mut params = ChoiceParameterGetter::new(FixedChoice {
        answer: 2,
        ..Default::default()
    });
    {
        let mut flow = FlowContext::new(&mut random, &mut params);
        assert!(flow.prepare_specified_target(&state, source, &spec, false));
        assert_eq!(flow.specified_target(), refs[5]);

        // cached for the rest of the action
        assert!(flow.prepare_specified_target(&state, source, &spec, false));
        assert_eq!(flow.specified_target(), refs[5]);

        flow.reset_action_parameter();
        assert!(!flow.specified_target().is_valid());
    }
    assert_eq!(params.callback_mut().asked, vec![(ActionType::ChooseTarget, 3)]);
}

#[test]
fn test_prepare_specified_target_without_candidates() {
    let (mut state, refs) = setup();
    state.card_mut(refs[4]).damage = 5;
    state.card_mut(refs[5]).damage = 5;
    let spec = Targets::enemy_of(PlayerId::FIRST)
        .minions()
        .filter(MinionFilter::NotMorallyWounded);

    let mut random = GameRng::new(7);
    let mut params = ChoiceParameterGetter::new(FixedChoice::default());
    let mut flow = FlowContext::new(&mut random, &mut params);

    assert!(!flow.prepare_specified_target(&state, refs[0], &spec, false));
    assert!(flow.prepare_specified_target(&state, refs[0], &spec, true));
    assert!(!flow.specified_target().is_valid());
}

/// A getter answering outside the candidate list aborts the action.
#[test]
fn test_prepare_specified_target_rejects_foreign_answer() {
    struct Stray;

    impl ActionParameterGetter for Stray {
        fn get_defender(&mut self, defenders: &[CardRef]) -> CardRef {
            defenders[0]
        }

        fn get_minion_put_location(&mut self, min: usize, _max: usize) -> usize {
            min
        }

        fn get_specified_target(
            &mut self,
            _state: &State,
            source: CardRef,
            _targets: &[CardRef],
        ) -> CardRef {
            source
        }

        fn choose_one(&mut self, _cards: &[CardId]) -> usize {
            0
        }
    }

    let (state, refs) = setup();
    let spec = Targets::enemy_of(PlayerId::FIRST).minions();
    let mut random = GameRng::new(7);
    let mut params = Stray;
    let mut flow = FlowContext::new(&mut random, &mut params);

    assert!(!flow.prepare_specified_target(&state, refs[0], &spec, false));
    assert!(!flow.specified_target().is_valid());
}

#[test]
fn test_change_specified_target() {
    let (state, refs) = setup();
    let spec = Targets::new().both_sides().minions();
    let mut random = GameRng::new(7);
    let mut params = ChoiceParameterGetter::new(FixedChoice::default());
    let mut flow = FlowContext::new(&mut random, &mut params);

    assert!(flow.prepare_specified_target(&state, refs[0], &spec, false));
    assert_eq!(flow.specified_target(), refs[1]);

    flow.change_specified_target(refs[3]);
    assert_eq!(flow.specified_target(), refs[3]);
}

#[test]
fn test_defender_and_put_location_queries() {
    let (_, refs) = setup();
    let mut random = GameRng::new(7);
    let mut params = ChoiceParameterGetter::new(FixedChoice {
        answer: 1,
        ..Default::default()
    });
    {
        let mut flow = FlowContext::new(&mut random, &mut params);
        assert_eq!(flow.get_defender(&refs[3..6]), refs[4]);
        assert_eq!(flow.get_minion_put_location(0, 2), 1);
        assert_eq!(flow.get_choose_one_user_action(&[CardId::new(1), CardId::new(2)]), 1);
    }
    assert_eq!(
        params.into_inner().asked,
        vec![
            (ActionType::ChooseDefender, 3),
            (ActionType::ChooseMinionPutLocation, 3),
            (ActionType::ChooseOne, 2),
        ]
    );
}

#[test]
fn test_random_source_is_injected() {
    let mut expected = GameRng::new(11);
    let expected: Vec<_> = (0..5).map(|_| expected.get(10)).collect();

    let mut random = GameRng::new(11);
    let mut params = ChoiceParameterGetter::new(FixedChoice::default());
    let mut flow = FlowContext::new(&mut random, &mut params);
    let drawn: Vec<_> = (0..5).map(|_| flow.random().get(10)).collect();

    assert_eq!(drawn, expected);
}
