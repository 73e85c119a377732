//! Target specifications and their resolution against a state.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{Card, CardRace};
use crate::core::{CardRef, PlayerId, State};

/// Extra condition a minion must meet to be a target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MinionFilter {
    #[default]
    All,
    /// Minions with positive health (not yet waiting to die).
    NotMorallyWounded,
    /// Minions the acting player may target.
    Targetable,
    /// Minions a spell may target.
    TargetableBySpell,
    Murloc,
}

impl MinionFilter {
    fn accepts(self, card: &Card) -> bool {
        match self {
            MinionFilter::All => true,
            MinionFilter::NotMorallyWounded => card.hp() > 0,
            // stealth is not modelled
            MinionFilter::Targetable => true,
            // stealth and spell immunity are not modelled
            MinionFilter::TargetableBySpell => true,
            MinionFilter::Murloc => card.race == CardRace::Murloc,
        }
    }
}

/// Immutable description of a set of characters.
///
/// Resolution walks the first player's side and then the second's; within
/// a side the hero comes first, followed by minions in board order.
///
/// ```
/// use hearth_state::core::PlayerId;
/// use hearth_state::targeting::{MinionFilter, Targets};
///
/// // enemy minions with positive health
/// let spec = Targets::enemy_of(PlayerId::FIRST)
///     .minions()
///     .filter(MinionFilter::NotMorallyWounded);
/// assert!(!spec.include_first && spec.include_second);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Targets {
    pub include_first: bool,
    pub include_second: bool,
    pub include_hero: bool,
    pub include_minion: bool,
    /// Never part of the result, whatever the other fields say.
    pub exclude: CardRef,
    pub minion_filter: MinionFilter,
}

impl Default for Targets {
    fn default() -> Self {
        Self::new()
    }
}

impl Targets {
    /// Empty specification: selects nothing until sides and kinds are added.
    #[must_use]
    pub fn new() -> Self {
        Self {
            include_first: false,
            include_second: false,
            include_hero: false,
            include_minion: false,
            exclude: CardRef::INVALID,
            minion_filter: MinionFilter::All,
        }
    }

    #[must_use]
    pub fn first_side(mut self) -> Self {
        self.include_first = true;
        self
    }

    #[must_use]
    pub fn second_side(mut self) -> Self {
        self.include_second = true;
        self
    }

    #[must_use]
    pub fn both_sides(self) -> Self {
        self.first_side().second_side()
    }

    /// Specification covering `player`'s side.
    #[must_use]
    pub fn friendly_to(player: PlayerId) -> Self {
        Self::new().side(player)
    }

    /// Specification covering the side opposite to `player`.
    #[must_use]
    pub fn enemy_of(player: PlayerId) -> Self {
        Self::new().side(player.opponent())
    }

    #[must_use]
    pub fn heroes(mut self) -> Self {
        self.include_hero = true;
        self
    }

    #[must_use]
    pub fn minions(mut self) -> Self {
        self.include_minion = true;
        self
    }

    /// Heroes and minions.
    #[must_use]
    pub fn characters(self) -> Self {
        self.heroes().minions()
    }

    #[must_use]
    pub fn exclude(mut self, card_ref: CardRef) -> Self {
        self.exclude = card_ref;
        self
    }

    #[must_use]
    pub fn filter(mut self, minion_filter: MinionFilter) -> Self {
        self.minion_filter = minion_filter;
        self
    }

    fn side(self, player: PlayerId) -> Self {
        if player.is_first() {
            self.first_side()
        } else {
            self.second_side()
        }
    }

    fn includes(&self, player: PlayerId) -> bool {
        if player.is_first() {
            self.include_first
        } else {
            self.include_second
        }
    }

    /// Lazily enumerate the matching references.
    pub fn iter<'s>(&self, state: &'s State) -> impl Iterator<Item = CardRef> + 's {
        let spec = *self;
        PlayerId::both()
            .filter(move |&player| spec.includes(player))
            .flat_map(move |player| {
                let zones = state.board().player(player);
                let hero = zones.hero();
                let hero = (spec.include_hero && hero.is_valid() && hero != spec.exclude)
                    .then_some(hero);
                let minions = zones
                    .minions()
                    .iter()
                    .filter(move |_| spec.include_minion)
                    .filter(move |&minion| minion != spec.exclude)
                    .filter(move |&minion| spec.minion_filter.accepts(state.card(minion)));
                hero.into_iter().chain(minions)
            })
    }

    /// Append the matching references to `targets`.
    pub fn fill(&self, state: &State, targets: &mut Vec<CardRef>) {
        targets.extend(self.iter(state));
    }

    /// Insert the matching references into `targets`.
    pub fn fill_set(&self, state: &State, targets: &mut FxHashSet<CardRef>) {
        targets.extend(self.iter(state));
    }

    #[must_use]
    pub fn count(&self, state: &State) -> usize {
        self.iter(state).count()
    }

    /// Call `f` on every matching reference.
    pub fn for_each(&self, state: &State, mut f: impl FnMut(&State, CardRef)) {
        for card_ref in self.iter(state) {
            f(state, card_ref);
        }
    }

    /// Call `f` on every reference matching before the first call.
    ///
    /// The set is resolved up front, so changes made by `f` do not affect
    /// which references are visited.
    pub fn for_each_mut(&self, state: &mut State, mut f: impl FnMut(&mut State, CardRef)) {
        let snapshot: SmallVec<[CardRef; 16]> = self.iter(state).collect();
        for card_ref in snapshot {
            f(state, card_ref);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardId, CardZone};

    fn setup() -> (State, [CardRef; 2], Vec<CardRef>) {
        let mut state = State::new();
        let mut heroes = [CardRef::INVALID; 2];
        for player in PlayerId::both() {
            let hero = state.create_card(Card::hero(CardId::new(100), 30));
            state.zone_changer(hero).change_to(CardZone::Play, player);
            heroes[player.index()] = hero;
        }
        let mut minions = Vec::new();
        let owners = [PlayerId::FIRST, PlayerId::FIRST, PlayerId::SECOND];
        for (i, player) in owners.into_iter().enumerate() {
            let minion = state.create_card(Card::minion(CardId::new(i as u32), 1, 1));
            let pos = state.board().player(player).minions().len();
            state.zone_changer(minion).change_to_at(CardZone::Play, player, pos);
            minions.push(minion);
        }
        (state, heroes, minions)
    }

    #[test]
    fn test_enumeration_order() {
        let (state, heroes, minions) = setup();
        let all: Vec<_> = Targets::new().both_sides().characters().iter(&state).collect();
        assert_eq!(all, vec![heroes[0], minions[0], minions[1], heroes[1], minions[2]]);
    }

    #[test]
    fn test_side_and_kind_selection() {
        let (state, heroes, minions) = setup();

        let enemy_heroes: Vec<_> = Targets::enemy_of(PlayerId::FIRST)
            .heroes()
            .iter(&state)
            .collect();
        assert_eq!(enemy_heroes, vec![heroes[1]]);

        let friendly_minions: Vec<_> = Targets::friendly_to(PlayerId::FIRST)
            .minions()
            .iter(&state)
            .collect();
        assert_eq!(friendly_minions, vec![minions[0], minions[1]]);

        assert_eq!(Targets::new().characters().count(&state), 0);
        assert_eq!(Targets::new().both_sides().count(&state), 0);
    }

    #[test]
    fn test_exclusion_applies_to_heroes_and_minions() {
        let (state, heroes, minions) = setup();

        let without_hero = Targets::new().both_sides().characters().exclude(heroes[0]);
        assert!(without_hero.iter(&state).all(|r| r != heroes[0]));
        assert_eq!(without_hero.count(&state), 4);

        let without_minion = Targets::new().both_sides().characters().exclude(minions[1]);
        assert!(without_minion.iter(&state).all(|r| r != minions[1]));
    }

    #[test]
    fn test_minion_filters() {
        let (mut state, _, minions) = setup();
        state.card_mut(minions[0]).damage = 1;
        state.card_mut(minions[2]).race = CardRace::Murloc;

        let alive: Vec<_> = Targets::new()
            .both_sides()
            .minions()
            .filter(MinionFilter::NotMorallyWounded)
            .iter(&state)
            .collect();
        assert_eq!(alive, vec![minions[1], minions[2]]);

        let murlocs: Vec<_> = Targets::new()
            .both_sides()
            .minions()
            .filter(MinionFilter::Murloc)
            .iter(&state)
            .collect();
        assert_eq!(murlocs, vec![minions[2]]);

        for filter in [MinionFilter::Targetable, MinionFilter::TargetableBySpell] {
            let spec = Targets::new().both_sides().minions().filter(filter);
            assert_eq!(spec.count(&state), 3);
        }
    }

    #[test]
    fn test_missing_hero_is_skipped() {
        let mut state = State::new();
        let minion = state.create_card(Card::minion(CardId::new(1), 1, 1));
        state.zone_changer(minion).change_to_at(CardZone::Play, PlayerId::SECOND, 0);

        let all: Vec<_> = Targets::new().both_sides().characters().iter(&state).collect();
        assert_eq!(all, vec![minion]);
    }

    #[test]
    fn test_collectors_agree() {
        let (state, _, _) = setup();
        let spec = Targets::new().both_sides().characters();

        let mut list = Vec::new();
        spec.fill(&state, &mut list);
        let mut set = FxHashSet::default();
        spec.fill_set(&state, &mut set);
        let mut visited = Vec::new();
        spec.for_each(&state, |_, r| visited.push(r));

        assert_eq!(list.len(), spec.count(&state));
        assert_eq!(set.len(), list.len());
        assert_eq!(visited, list);
    }

    #[test]
    fn test_for_each_mut_visits_snapshot() {
        let (mut state, _, minions) = setup();
        let spec = Targets::friendly_to(PlayerId::FIRST).minions();

        let mut visited = Vec::new();
        spec.for_each_mut(&mut state, |state, r| {
            visited.push(r);
            state.zone_changer(r).change_to(CardZone::Graveyard, PlayerId::FIRST);
        });

        assert_eq!(visited, vec![minions[0], minions[1]]);
        assert!(state.board().first().minions().is_empty());
    }
}
