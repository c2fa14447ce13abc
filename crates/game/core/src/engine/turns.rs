//! Turn lifecycle, pause/resume and session end.

use crate::character::{Side, TurnEffectTick};
use crate::error::CombatError;
use crate::event::CombatEvent;
use crate::state::{CombatPhase, CombatSession, Turn};

use super::TurnError;

impl CombatSession {
    /// Starts turn `n + 1` for `side` and returns its number.
    ///
    /// Turn start runs, in order: per-turn effects of the acting character
    /// (once per turn), hand cooldowns, resource regeneration and the
    /// per-turn draw. A death caused by a per-turn effect is handled before
    /// anything else happens and skips the rest of the turn start.
    pub fn start_next_turn(&mut self, side: Side) -> Result<u32, CombatError> {
        self.ensure_running()?;
        if let Some(turn) = self.active_turn() {
            return Err(TurnError::TurnAlreadyActive {
                number: turn.number(),
            }
            .into());
        }
        if self.enemy.is_none() {
            return Err(TurnError::NoOpponent.into());
        }
        let phase = CombatPhase::turn_of(side);
        if !self.phase.can_transition_to(phase) {
            return Err(TurnError::InvalidTransition {
                from: self.phase,
                to: phase,
            }
            .into());
        }

        let number = self.current_turn_number() + 1;
        self.turns.push(Turn::new(number, side, phase));
        self.context.reset();
        self.transition(phase)?;
        self.emit(CombatEvent::TurnStarted { number, side });

        if self.context.mark_effects_ticked() {
            self.tick_turn_effects(side)?;
        }
        // A per-turn effect may have ended the fight or removed the actor.
        if self.is_terminal() || self.character(side).is_none() {
            return Ok(number);
        }

        self.cards_mut(side).tick_hand_cooldowns();
        let regen = self.config.resource_per_turn;
        if regen > 0
            && let Some(character) = self.character_mut(side)
            && let Some((previous, current)) = character.restore_resource(regen)
            && previous != current
        {
            self.emit(CombatEvent::ResourceChanged {
                side,
                previous,
                current,
            });
        }
        for _ in 0..self.config.cards_per_turn {
            self.draw_into_hand(side)?;
        }
        Ok(number)
    }

    /// Completes the active turn. The phase stays where it is until the next
    /// turn starts.
    pub fn complete_current_turn(&mut self) -> Result<u32, CombatError> {
        if self.phase == CombatPhase::Paused {
            return Err(TurnError::Paused.into());
        }
        let turn = self
            .turns
            .last_mut()
            .filter(|turn| !turn.is_completed())
            .ok_or(TurnError::NoActiveTurn)?;
        turn.complete();
        let (number, side) = (turn.number(), turn.side());
        self.emit(CombatEvent::TurnCompleted { number, side });
        Ok(number)
    }

    /// Suspends a running session. Turn and resolution operations fail until
    /// [`resume`](Self::resume).
    pub fn pause(&mut self) -> Result<(), CombatError> {
        self.ensure_running()?;
        let from = self.phase;
        self.transition(CombatPhase::Paused)?;
        self.paused_from = Some(from);
        Ok(())
    }

    /// Returns to the phase the session was paused from.
    pub fn resume(&mut self) -> Result<(), CombatError> {
        let Some(to) = self.paused_from.filter(|_| self.phase == CombatPhase::Paused) else {
            return Err(TurnError::NotPaused.into());
        };
        self.transition(to)?;
        self.paused_from = None;
        Ok(())
    }

    /// Tears the session down from any started, non-ended phase.
    pub fn end_session(&mut self) -> Result<(), CombatError> {
        match self.phase {
            CombatPhase::None => return Err(TurnError::NotStarted.into()),
            CombatPhase::Ended => return Err(TurnError::SessionOver(CombatPhase::Ended).into()),
            _ => {}
        }
        self.transition(CombatPhase::Ended)?;
        self.paused_from = None;
        self.queue.clear();
        Ok(())
    }

    fn tick_turn_effects(&mut self, side: Side) -> Result<(), CombatError> {
        let ticks = match self.character_mut(side) {
            Some(character) => character.tick_turn_effects(),
            None => return Ok(()),
        };

        let mut died = false;
        for tick in ticks {
            self.emit(CombatEvent::TurnEffectTicked { side, tick });
            match tick {
                TurnEffectTick::Damaged { outcome, .. } => self.emit_damage(side, &outcome),
                TurnEffectTick::Healed { outcome, .. } => self.emit_heal(side, &outcome),
                TurnEffectTick::Guarded { flipped: true, .. } => self.emit_guard(side, true),
                TurnEffectTick::Guarded { .. } => {}
            }
            died |= tick.caused_death();
        }
        if died {
            self.handle_death(side)?;
        }
        Ok(())
    }
}
