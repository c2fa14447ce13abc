//! Drawing, playing and discarding cards.

use crate::card::{CardInstanceId, PlayRejection};
use crate::character::{Character, Side};
use crate::error::CombatError;
use crate::event::CombatEvent;
use crate::slot::{CombatLane, CombatSlot, SlotError, SlotPosition};
use crate::state::{CombatPhase, CombatSession};

use super::{DrawOutcome, PlayOutcome, TurnError};

impl CombatSession {
    /// Draws the top card of `side`'s deck into its first free hand slot.
    pub fn draw_card(&mut self, side: Side) -> Result<DrawOutcome, CombatError> {
        self.ensure_running()?;
        self.draw_into_hand(side)
    }

    pub(crate) fn draw_into_hand(&mut self, side: Side) -> Result<DrawOutcome, CombatError> {
        let Some(index) = self.slots.first_free_hand_index(side) else {
            return Ok(DrawOutcome::HandFull);
        };
        let Some(id) = self.cards_mut(side).draw() else {
            return Ok(DrawOutcome::DeckEmpty);
        };

        let hand_slot = SlotPosition::hand(side, index);
        self.place_card(hand_slot, id, side)?;
        if let Some(card) = self.cards_mut(side).get_mut(id) {
            card.assign_hand_slot(hand_slot);
        }
        self.emit(CombatEvent::CardDrawn {
            side,
            card: id,
            hand_slot,
        });
        Ok(DrawOutcome::Drawn(id))
    }

    /// Plays a hand card of the acting side into one of its lanes.
    ///
    /// Cooldown, cost and lane occupancy are gameplay conditions reported as
    /// [`PlayOutcome::Rejected`]. Playing out of turn or after resolution
    /// began is an error.
    pub fn play_card(
        &mut self,
        side: Side,
        card: CardInstanceId,
        lane: CombatLane,
    ) -> Result<PlayOutcome, CombatError> {
        self.ensure_running()?;
        let turn = self.active_turn().ok_or(TurnError::NoActiveTurn)?;
        if turn.side() != side {
            return Err(TurnError::NotActingSide {
                expected: turn.side(),
                actual: side,
            }
            .into());
        }
        if self.context.resolution_started() || self.phase != CombatPhase::turn_of(side) {
            return Err(TurnError::ResolutionStarted.into());
        }
        if self.character(side).is_none() {
            return Err(TurnError::NoOpponent.into());
        }

        self.commit_card(side, card, SlotPosition::combat(side, lane))
    }

    /// Queues an enemy hand card into the closest free wait lane.
    ///
    /// Returns the lane the card went to, or `None` when the card cannot be
    /// played right now (no free lane, cooldown, cost). Allowed outside the
    /// enemy's own turn so intents can be telegraphed ahead of time.
    pub fn reserve_next_enemy_slot(
        &mut self,
        card: CardInstanceId,
    ) -> Result<Option<CombatLane>, CombatError> {
        self.ensure_running()?;
        if self.enemy.is_none() {
            return Err(TurnError::NoOpponent.into());
        }
        let Some(lane) = self.slots.first_free_wait_lane(Side::Enemy) else {
            return Ok(None);
        };

        match self.commit_card(Side::Enemy, card, SlotPosition::combat(Side::Enemy, lane))? {
            PlayOutcome::Played { .. } => Ok(Some(lane)),
            PlayOutcome::Rejected(_) => Ok(None),
        }
    }

    /// Raises the player's guard. At most once per turn.
    ///
    /// Returns `false` when the guard was already registered this turn.
    pub fn register_player_guard(&mut self) -> Result<bool, CombatError> {
        self.ensure_running()?;
        if self.active_turn().is_none() {
            return Err(TurnError::NoActiveTurn.into());
        }
        if self.context.resolution_started() {
            return Err(TurnError::ResolutionStarted.into());
        }
        if !self.context.mark_player_guard_registered() {
            return Ok(false);
        }

        if self.player.set_guarded(true) {
            self.emit(CombatEvent::GuardStateChanged {
                side: Side::Player,
                character: self.player.id(),
                guarded: true,
            });
        }
        Ok(true)
    }

    /// Moves a card of `side` to its discard pile, freeing any slot it held.
    ///
    /// Returns `false` when the card was already discarded.
    pub fn discard_card(&mut self, side: Side, card: CardInstanceId) -> Result<bool, CombatError> {
        self.ensure_running()?;
        self.discard_instance(side, card)
    }

    pub(crate) fn discard_instance(
        &mut self,
        side: Side,
        card: CardInstanceId,
    ) -> Result<bool, CombatError> {
        let instance = self.cards(side).require(card)?;
        let held = [instance.hand_slot(), instance.combat_slot()];

        if !self.cards_mut(side).discard(card)? {
            return Ok(false);
        }
        for position in held.into_iter().flatten() {
            if self.slots.get_slot(position).card() == Some(card) {
                self.slots.clear_slot(position);
            }
        }
        self.emit(CombatEvent::CardDiscarded { side, card });
        Ok(true)
    }

    /// Moves a hand card into `position`, paying its cost.
    fn commit_card(
        &mut self,
        side: Side,
        card: CardInstanceId,
        position: SlotPosition,
    ) -> Result<PlayOutcome, CombatError> {
        let instance = self.cards(side).require(card)?;
        let hand_slot = match instance.hand_slot() {
            Some(slot) if self.cards(side).hand().contains(card) => slot,
            _ => return Ok(PlayOutcome::Rejected(PlayRejection::NotInHand)),
        };
        let available = self
            .character(side)
            .and_then(|character| character.resource())
            .map(|resource| resource.current_amount());
        if let Err(rejection) = instance.check_playable(available) {
            return Ok(PlayOutcome::Rejected(rejection));
        }
        if self.slots.is_occupied(position) {
            return Ok(PlayOutcome::Rejected(PlayRejection::SlotOccupied(position)));
        }
        let card_id = instance.card_id();
        let cost = instance.definition().cost;

        if let Some(cost) = cost
            && let Some(character) = self.character_mut(side)
            && let Some((previous, current)) = spend(character, cost)
        {
            self.emit(CombatEvent::ResourceChanged {
                side,
                previous,
                current,
            });
        }

        self.slots.clear_slot(hand_slot);
        self.place_card(position, card, side)?;
        let zones = self.cards_mut(side);
        zones.move_to_play(card);
        if let Some(instance) = zones.get_mut(card) {
            instance.play(position);
        }
        self.emit(CombatEvent::CardPlayed {
            side,
            card,
            card_id,
            slot: position,
        });
        Ok(PlayOutcome::Played { slot: position })
    }

    /// Writes `card` into `position`, refusing a second placement of the
    /// same card anywhere in the registry.
    pub(crate) fn place_card(
        &mut self,
        position: SlotPosition,
        card: CardInstanceId,
        owner: Side,
    ) -> Result<(), SlotError> {
        if let Some(existing) = self.slots.find_card(card)
            && existing != position
        {
            return Err(SlotError::CardAlreadyPlaced {
                card,
                position: existing,
            });
        }
        self.slots
            .set_slot(CombatSlot::with_card(position, card, owner))
    }
}

/// Pays `cost` and returns the pool before and after.
fn spend(character: &mut Character, cost: u32) -> Option<(u32, u32)> {
    let previous = character.resource()?.current_amount();
    if !character.spend_resource(cost) {
        return None;
    }
    let current = character.resource()?.current_amount();
    (previous != current).then_some((previous, current))
}
