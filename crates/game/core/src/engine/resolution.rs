//! The execution queue and per-slot card resolution.

use crate::card::CardInstanceId;
use crate::character::{DamageOutcome, HealOutcome, Side};
use crate::effect::{
    AppliedValue, CardExecutionContext, CardResolution, ResolveError, resolve_card,
};
use crate::error::CombatError;
use crate::event::CombatEvent;
use crate::slot::{CombatLane, SlotError, SlotPosition};
use crate::state::{CombatPhase, CombatSession, ExecutionRequest};

use super::{QueueReport, TurnError};

impl CombatSession {
    /// Queues the card in `position` for resolution.
    pub fn enqueue_execution(
        &mut self,
        position: SlotPosition,
        owner: Side,
    ) -> Result<(), CombatError> {
        self.ensure_running()?;
        match position {
            SlotPosition::Combat { side, .. } if side == owner => {
                self.queue.push(ExecutionRequest { position, owner });
                Ok(())
            }
            SlotPosition::Combat { .. } => {
                Err(SlotError::OwnerMismatch { position, owner }.into())
            }
            _ => Err(SlotError::NotACombatPosition(position).into()),
        }
    }

    /// Ends the play window of the active turn.
    ///
    /// Moves to `Resolution` and queues the battle lanes: the acting side
    /// first, then its opponent.
    pub fn begin_resolution(&mut self) -> Result<(), CombatError> {
        self.ensure_running()?;
        let side = self.active_turn().ok_or(TurnError::NoActiveTurn)?.side();
        if self.context.resolution_started() {
            return Err(TurnError::ResolutionStarted.into());
        }
        self.transition(CombatPhase::Resolution)?;
        self.context.mark_resolution_started();

        for owner in [side, side.opponent()] {
            self.queue.push(ExecutionRequest {
                position: SlotPosition::battle(owner),
                owner,
            });
        }
        Ok(())
    }

    /// Drains the execution queue in FIFO order.
    ///
    /// Each request resolves the card in its slot once. Empty slots are
    /// counted and skipped. When a death ends the session, the remaining
    /// requests are dropped. After a drain that leaves the session running,
    /// resolved cards leave their slots and waiting cards step toward battle.
    pub fn process_execution_queue(&mut self) -> Result<QueueReport, CombatError> {
        match self.phase {
            CombatPhase::None => return Err(TurnError::NotStarted.into()),
            CombatPhase::Paused => return Err(TurnError::Paused.into()),
            _ => {}
        }

        let mut report = QueueReport::default();
        let mut resolved = Vec::new();
        while let Some(request) = self.queue.pop() {
            if self.is_terminal() {
                report.skipped += 1 + self.queue.clear();
                break;
            }
            let Some(card) = self.slots.get_slot(request.position).card() else {
                report.empty_slots += 1;
                continue;
            };

            let resolution = self.resolve_slot(request.owner, card)?;
            self.record_resolution(&resolution)?;
            resolved.push((request, card));
            report.resolutions.push(resolution);
        }

        if !self.is_terminal() {
            for (request, card) in resolved {
                self.settle_card(request, card)?;
            }
            self.advance_lanes()?;
        }
        Ok(report)
    }

    fn resolve_slot(
        &mut self,
        owner: Side,
        card: CardInstanceId,
    ) -> Result<CardResolution, ResolveError> {
        let max_turn_effects = usize::from(self.config.max_turn_effects);
        let Self {
            player,
            enemy,
            player_cards,
            enemy_cards,
            ..
        } = self;

        let (zones, source, target) = match owner {
            Side::Player => (&*player_cards, player, enemy.as_mut()),
            Side::Enemy => (
                &*enemy_cards,
                enemy.as_mut().ok_or(ResolveError::CasterMissing(Side::Enemy))?,
                Some(player),
            ),
        };
        let instance = zones
            .get(card)
            .filter(|instance| instance.combat_slot().is_some())
            .ok_or(ResolveError::CardNotInPlay(card))?;

        let mut ctx = CardExecutionContext::new(instance, source, target)
            .with_max_turn_effects(max_turn_effects);
        resolve_card(&mut ctx)
    }

    /// Emits what a resolution changed and handles the deaths it caused.
    fn record_resolution(&mut self, resolution: &CardResolution) -> Result<(), CombatError> {
        for applied in &resolution.applied {
            self.emit(CombatEvent::EffectResolved {
                card: resolution.card,
                effect: *applied,
            });
            match applied.value {
                AppliedValue::Damage(outcome) => self.emit_damage(applied.recipient, &outcome),
                AppliedValue::Heal(outcome) => self.emit_heal(applied.recipient, &outcome),
                AppliedValue::Guard { flipped: true } => {
                    self.emit_guard(applied.recipient, true)
                }
                _ => {}
            }
        }
        if let Some(rejection) = resolution.rejection {
            self.emit(CombatEvent::EffectRejected {
                card: resolution.card,
                rejection,
            });
        }

        let deaths: Vec<Side> = resolution.deaths().collect();
        for side in deaths {
            self.handle_death(side)?;
        }
        Ok(())
    }

    /// Takes a resolved card out of its lane.
    ///
    /// Consumables are discarded; other cards return to the hand, or go to the
    /// discard pile when the hand is full.
    fn settle_card(
        &mut self,
        request: ExecutionRequest,
        card: CardInstanceId,
    ) -> Result<(), CombatError> {
        let owner = request.owner;
        if self.slots.get_slot(request.position).card() != Some(card) {
            return Ok(());
        }
        let consumable = self.cards(owner).require(card)?.definition().consumable;

        match self.slots.first_free_hand_index(owner) {
            Some(index) if !consumable => {
                let hand_slot = SlotPosition::hand(owner, index);
                self.slots.clear_slot(request.position);
                self.place_card(hand_slot, card, owner)?;
                let zones = self.cards_mut(owner);
                zones.return_to_hand(card);
                if let Some(instance) = zones.get_mut(card) {
                    instance.return_to_hand(hand_slot);
                }
                self.emit(CombatEvent::CardReturned {
                    side: owner,
                    card,
                    hand_slot,
                });
            }
            _ => {
                self.discard_instance(owner, card)?;
            }
        }
        Ok(())
    }

    /// Moves every waiting card one lane closer to battle when that lane is
    /// free, front lanes first.
    fn advance_lanes(&mut self) -> Result<(), CombatError> {
        for side in [Side::Player, Side::Enemy] {
            for lane in CombatLane::WAIT_LANES {
                let Some(next) = lane.toward_battle() else {
                    continue;
                };
                let from = SlotPosition::combat(side, lane);
                let to = SlotPosition::combat(side, next);
                let Some(card) = self.slots.get_slot(from).card() else {
                    continue;
                };
                if self.slots.is_occupied(to) {
                    continue;
                }

                self.slots.clear_slot(from);
                self.place_card(to, card, side)?;
                if let Some(instance) = self.cards_mut(side).get_mut(card) {
                    instance.move_combat_slot(to);
                }
                self.emit(CombatEvent::CardAdvanced {
                    side,
                    card,
                    from,
                    to,
                });
            }
        }
        Ok(())
    }

    // ===== event helpers =====

    pub(crate) fn emit_damage(&mut self, side: Side, outcome: &DamageOutcome) {
        let Some(character) = self.character(side).map(|c| c.id()) else {
            return;
        };
        if outcome.previous != outcome.current {
            self.emit(CombatEvent::HealthChanged {
                side,
                character,
                previous: outcome.previous,
                current: outcome.current,
            });
        }
        if outcome.guard_cleared {
            self.emit(CombatEvent::GuardStateChanged {
                side,
                character,
                guarded: false,
            });
        }
    }

    pub(crate) fn emit_heal(&mut self, side: Side, outcome: &HealOutcome) {
        let Some(character) = self.character(side).map(|c| c.id()) else {
            return;
        };
        if outcome.previous != outcome.current {
            self.emit(CombatEvent::HealthChanged {
                side,
                character,
                previous: outcome.previous,
                current: outcome.current,
            });
        }
    }

    pub(crate) fn emit_guard(&mut self, side: Side, guarded: bool) {
        if let Some(character) = self.character(side).map(|c| c.id()) {
            self.emit(CombatEvent::GuardStateChanged {
                side,
                character,
                guarded,
            });
        }
    }
}
