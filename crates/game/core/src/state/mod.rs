//! Authoritative combat state.
//!
//! [`CombatSession`] owns every piece of mutable combat state: turn history,
//! slot registry, characters, card zones, stage progress, the execution queue,
//! the RNG cursor and the event outbox. Callers read committed state through
//! the accessors here and mutate it exclusively through the operations in
//! [`crate::engine`].
mod queue;
mod snapshot;
mod turn;

pub use queue::{ExecutionQueue, ExecutionRequest};
pub use snapshot::{CardInstanceSnapshot, CardZonesSnapshot, CombatSnapshot, SnapshotError};
pub use turn::{CombatPhase, Turn, TurnContext};

use crate::card::CardZones;
use crate::character::{Character, Side};
use crate::config::CombatConfig;
use crate::env::{EnemyId, RngState};
use crate::event::CombatEvent;
use crate::slot::SlotRegistry;
use crate::stage::Stage;

/// One fight: a player against the enemies of a stage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CombatSession {
    pub(crate) config: CombatConfig,
    pub(crate) phase: CombatPhase,
    /// Phase to return to on resume; set only while paused.
    pub(crate) paused_from: Option<CombatPhase>,
    pub(crate) turns: Vec<Turn>,
    pub(crate) context: TurnContext,
    pub(crate) slots: SlotRegistry,
    pub(crate) player: Character,
    pub(crate) enemy: Option<Character>,
    pub(crate) player_cards: CardZones,
    pub(crate) enemy_cards: CardZones,
    pub(crate) stage: Stage,
    /// Enemy requested by stage progression but not spawned yet.
    pub(crate) pending_enemy: Option<EnemyId>,
    pub(crate) current_enemy: Option<EnemyId>,
    /// Reward granted when the current enemy dies.
    pub(crate) enemy_reward: u32,
    pub(crate) queue: ExecutionQueue,
    pub(crate) rng: RngState,
    /// Sequential id allocators. Never reused.
    pub(crate) next_character_id: u32,
    pub(crate) next_card_id: u32,
    /// Total defeat rewards granted so far.
    pub(crate) rewards: u32,
    pub(crate) events: Vec<CombatEvent>,
}

impl CombatSession {
    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn phase(&self) -> CombatPhase {
        self.phase
    }

    pub fn paused_from(&self) -> Option<CombatPhase> {
        self.paused_from
    }

    pub fn is_terminal(&self) -> bool {
        self.phase.is_terminal()
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Always equals the number of turns started.
    pub fn current_turn_number(&self) -> u32 {
        self.turns.len() as u32
    }

    /// The last appended turn, completed or not.
    pub fn current_turn(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// The current turn if it has not been completed yet.
    pub fn active_turn(&self) -> Option<&Turn> {
        self.turns.last().filter(|turn| !turn.is_completed())
    }

    pub fn context(&self) -> &TurnContext {
        &self.context
    }

    pub fn slots(&self) -> &SlotRegistry {
        &self.slots
    }

    pub fn player(&self) -> &Character {
        &self.player
    }

    pub fn enemy(&self) -> Option<&Character> {
        self.enemy.as_ref()
    }

    pub fn character(&self, side: Side) -> Option<&Character> {
        match side {
            Side::Player => Some(&self.player),
            Side::Enemy => self.enemy.as_ref(),
        }
    }

    pub fn cards(&self, side: Side) -> &CardZones {
        match side {
            Side::Player => &self.player_cards,
            Side::Enemy => &self.enemy_cards,
        }
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn pending_enemy(&self) -> Option<EnemyId> {
        self.pending_enemy
    }

    pub fn current_enemy(&self) -> Option<EnemyId> {
        self.current_enemy
    }

    pub fn queue(&self) -> &ExecutionQueue {
        &self.queue
    }

    pub fn rng_state(&self) -> RngState {
        self.rng
    }

    pub fn rewards(&self) -> u32 {
        self.rewards
    }

    /// Events emitted since the last drain.
    pub fn pending_events(&self) -> &[CombatEvent] {
        &self.events
    }

    /// Takes every event emitted since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<CombatEvent> {
        std::mem::take(&mut self.events)
    }

    // ===== crate-internal helpers =====

    pub(crate) fn emit(&mut self, event: CombatEvent) {
        self.events.push(event);
    }

    pub(crate) fn cards_mut(&mut self, side: Side) -> &mut CardZones {
        match side {
            Side::Player => &mut self.player_cards,
            Side::Enemy => &mut self.enemy_cards,
        }
    }

    pub(crate) fn character_mut(&mut self, side: Side) -> Option<&mut Character> {
        match side {
            Side::Player => Some(&mut self.player),
            Side::Enemy => self.enemy.as_mut(),
        }
    }

    pub(crate) fn allocate_character_id(&mut self) -> u32 {
        let id = self.next_character_id;
        self.next_character_id += 1;
        id
    }

    pub(crate) fn allocate_card_id(&mut self) -> u32 {
        let id = self.next_card_id;
        self.next_card_id += 1;
        id
    }
}
