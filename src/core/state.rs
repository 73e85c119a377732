//! Game state: card store, zone indices and active auras.
//!
//! ## State
//!
//! Complete state of one game position:
//! - Card store (every record ever created, addressed by `CardRef`)
//! - Board (per-player zone indices)
//! - Aura manager (active aura handlers)
//! - Optional zone event log
//!
//! Every collection is an `im` persistent structure, so `clone()` is O(1)
//! and a search branch can mutate its copy freely.

use im::Vector;
use log::trace;
use serde::{Deserialize, Serialize};

use super::card_ref::CardRef;
use super::player::PlayerId;
use crate::aura::{AuraManager, Handler};
use crate::cards::{Card, CardManager, CardType, CardZone};
use crate::flow::FlowContext;
use crate::zones::{Board, ZoneChanger};

/// Notification fired by a zone transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoneEvent {
    /// The card left `zone` of `player`.
    Removed {
        card: CardRef,
        card_type: CardType,
        zone: CardZone,
        player: PlayerId,
    },
    /// The card entered `zone` of `player`.
    Added {
        card: CardRef,
        card_type: CardType,
        zone: CardZone,
        player: PlayerId,
    },
}

impl ZoneEvent {
    #[must_use]
    pub fn card(&self) -> CardRef {
        match self {
            ZoneEvent::Removed { card, .. } | ZoneEvent::Added { card, .. } => *card,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct State {
    pub(crate) cards: CardManager,
    pub(crate) board: Board,
    pub(crate) auras: AuraManager,
    events: Option<Vector<ZoneEvent>>,
}

impl State {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record to the store.
    ///
    /// Panics unless the card is in `NewlyCreated`: records enter real zones
    /// only through `zone_changer`.
    pub fn create_card(&mut self, card: Card) -> CardRef {
        assert_eq!(
            card.zone(),
            CardZone::NewlyCreated,
            "cards must be created in the NewlyCreated zone"
        );
        self.cards.create(card)
    }

    /// Look up a record. Panics on an unknown reference.
    #[must_use]
    pub fn card(&self, card_ref: CardRef) -> &Card {
        self.cards.get(card_ref)
    }

    /// Mutable record access for stats, race and enchantments.
    ///
    /// Zone, owner and position are only changed through `zone_changer`.
    pub fn card_mut(&mut self, card_ref: CardRef) -> &mut Card {
        self.cards.get_mut(card_ref)
    }

    #[must_use]
    pub fn cards(&self) -> &CardManager {
        &self.cards
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Start a zone transition of `card_ref`.
    pub fn zone_changer(&mut self, card_ref: CardRef) -> ZoneChanger<'_> {
        ZoneChanger::new(self, card_ref)
    }

    #[must_use]
    pub fn auras(&self) -> &AuraManager {
        &self.auras
    }

    /// Re-evaluate every active aura and tear down those whose source left
    /// play.
    ///
    /// Handlers are taken out of the manager one at a time, so callbacks see
    /// every other aura. Auras registered while updating (a callback moving a
    /// card with an aura into play) are evaluated on the next call.
    pub fn update_auras(&mut self, flow: &mut FlowContext<'_>) {
        let sources: Vec<CardRef> = self.auras.sources().collect();
        for source in sources {
            let Some(mut handler) = self.auras.detach(source) else {
                continue;
            };
            if !self.auras.take_teardown(source) {
                handler.update(self, flow, source);
                if !self.auras.take_teardown(source) {
                    self.auras.attach(source, handler);
                    continue;
                }
            }
            handler.teardown(self, flow, source);
        }
    }

    /// Turn the zone event log on or off. Turning it off discards the log.
    pub fn record_zone_events(&mut self, enabled: bool) {
        self.events = enabled.then(Vector::new);
    }

    /// Events logged since recording started (or the last take).
    #[must_use]
    pub fn zone_events(&self) -> Vec<ZoneEvent> {
        self.events.iter().flatten().copied().collect()
    }

    /// Drain the event log, leaving recording enabled if it was.
    pub fn take_zone_events(&mut self) -> Vec<ZoneEvent> {
        match &mut self.events {
            Some(events) => std::mem::take(events).into_iter().collect(),
            None => Vec::new(),
        }
    }

    pub(crate) fn notify_removed(
        &mut self,
        card: CardRef,
        card_type: CardType,
        zone: CardZone,
        player: PlayerId,
    ) {
        trace!("{} removed from {:?} of {}", card, zone, player);
        if zone == CardZone::Play && self.cards.get(card).aura().is_some() {
            self.auras.retire(card);
        }
        self.record(ZoneEvent::Removed {
            card,
            card_type,
            zone,
            player,
        });
    }

    pub(crate) fn notify_added(
        &mut self,
        card: CardRef,
        card_type: CardType,
        zone: CardZone,
        player: PlayerId,
    ) {
        trace!("{} added to {:?} of {}", card, zone, player);
        if zone == CardZone::Play {
            if let Some(aura) = self.cards.get(card).aura() {
                let handler = Handler::new(*aura);
                self.auras.register(card, handler);
            }
        }
        self.record(ZoneEvent::Added {
            card,
            card_type,
            zone,
            player,
        });
    }

    fn record(&mut self, event: ZoneEvent) {
        if let Some(events) = &mut self.events {
            events.push_back(event);
        }
    }
}
