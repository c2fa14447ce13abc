//! Character death, defeat rewards and stage progression.

use crate::character::Side;
use crate::error::CombatError;
use crate::event::{CombatEvent, CombatOutcome};
use crate::slot::SlotPosition;
use crate::stage::advance_enemy;
use crate::state::{CombatPhase, CombatSession};

impl CombatSession {
    /// Reacts to the death of `side`'s character.
    ///
    /// A player death fails the stage. An enemy death is processed at most
    /// once per turn: its cards leave the field, the reward is granted and the
    /// stage either requests the next enemy or completes.
    pub(crate) fn handle_death(&mut self, side: Side) -> Result<(), CombatError> {
        if self.is_terminal() {
            return Ok(());
        }
        let Some(character) = self.character(side).map(|c| c.id()) else {
            return Ok(());
        };

        match side {
            Side::Player => {
                self.emit(CombatEvent::CharacterDied { side, character });
                if !self.stage.state().is_terminal() {
                    self.stage.mark_failed()?;
                }
                self.finish(CombatOutcome::Defeat)
            }
            Side::Enemy => {
                if !self.context.mark_enemy_defeated() {
                    return Ok(());
                }
                self.emit(CombatEvent::CharacterDied { side, character });
                self.clear_enemy_field()?;

                let enemy = self.current_enemy.take();
                self.enemy = None;
                if let Some(enemy) = enemy {
                    let amount = std::mem::take(&mut self.enemy_reward);
                    self.rewards = self.rewards.saturating_add(amount);
                    self.emit(CombatEvent::RewardGranted { enemy, amount });
                }

                match advance_enemy(&mut self.stage)? {
                    Some(next) => {
                        self.pending_enemy = Some(next);
                        self.emit(CombatEvent::SpawnRequested { enemy: next });
                        Ok(())
                    }
                    None => {
                        self.emit(CombatEvent::StageCompleted {
                            stage: self.stage.id(),
                        });
                        self.finish(CombatOutcome::Victory)
                    }
                }
            }
        }
    }

    /// Vanishes the enemy hand and discards whatever the enemy still had in
    /// its lanes.
    fn clear_enemy_field(&mut self) -> Result<(), CombatError> {
        if self.context.mark_hand_cards_vanished() {
            let cards = self.enemy_cards.vanish_hand();
            if !cards.is_empty() {
                self.emit(CombatEvent::HandVanished {
                    side: Side::Enemy,
                    cards,
                });
            }
        }

        let cleared = self.slots.clear_side(Side::Enemy);
        self.slots.clear_slot(SlotPosition::character(Side::Enemy));
        for slot in cleared {
            if let Some(card) = slot.card()
                && self.enemy_cards.discard(card)?
            {
                self.emit(CombatEvent::CardDiscarded {
                    side: Side::Enemy,
                    card,
                });
            }
        }
        Ok(())
    }

    /// Ends combat with `outcome`. Pending executions are dropped.
    fn finish(&mut self, outcome: CombatOutcome) -> Result<(), CombatError> {
        self.queue.clear();
        let phase = match outcome {
            CombatOutcome::Victory => CombatPhase::Victory,
            CombatOutcome::Defeat => CombatPhase::Defeat,
        };
        self.transition(phase)?;
        self.emit(CombatEvent::GameOver { outcome });
        Ok(())
    }
}
