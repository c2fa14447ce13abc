//! Session construction, combat start and enemy spawning.

use crate::card::{CardId, CardInstance, CardInstanceId, CardZones};
use crate::character::{CharacterId, Side};
use crate::config::CombatConfig;
use crate::env::{CombatEnv, CombatantTemplate, OracleError, RngState};
use crate::error::CombatError;
use crate::event::CombatEvent;
use crate::slot::{CombatSlot, SlotPosition, SlotRegistry};
use crate::stage::{Stage, StageDefinition, start_stage};
use crate::state::{CombatPhase, CombatSession, ExecutionQueue, TurnContext};

use super::TurnError;

impl CombatSession {
    /// Builds a session for `stage` with the player spawned from `player`.
    ///
    /// The player's deck is instantiated through the card oracle and shuffled
    /// with the session RNG. No enemy is on the field until
    /// [`start_combat`](Self::start_combat).
    pub fn new(
        config: CombatConfig,
        seed: u64,
        player: &CombatantTemplate,
        stage: &StageDefinition,
        env: &CombatEnv<'_>,
    ) -> Result<Self, CombatError> {
        let stage = Stage::new(stage)?;
        let character = player.spawn(CharacterId::PLAYER, Side::Player)?;
        let slots = SlotRegistry::new(config.hand_capacity);

        let mut session = Self {
            config,
            phase: CombatPhase::None,
            paused_from: None,
            turns: Vec::new(),
            context: TurnContext::default(),
            slots,
            player: character,
            enemy: None,
            player_cards: CardZones::new(),
            enemy_cards: CardZones::new(),
            stage,
            pending_enemy: None,
            current_enemy: None,
            enemy_reward: 0,
            queue: ExecutionQueue::new(),
            rng: RngState::new(seed),
            next_character_id: CharacterId::PLAYER.0 + 1,
            next_card_id: 0,
            rewards: 0,
            events: Vec::new(),
        };

        session.player_cards = session.build_zones(Side::Player, &player.deck, env)?;
        session.slots.set_slot(CombatSlot::with_character(
            SlotPosition::character(Side::Player),
            CharacterId::PLAYER,
        ))?;
        Ok(session)
    }

    /// Leaves `None`: starts the stage, spawns its first enemy and deals both
    /// opening hands.
    pub fn start_combat(&mut self, env: &CombatEnv<'_>) -> Result<(), CombatError> {
        if self.phase != CombatPhase::None {
            return Err(TurnError::AlreadyStarted.into());
        }

        let first = start_stage(&mut self.stage)?;
        self.pending_enemy = Some(first);
        self.transition(CombatPhase::Preparation)?;

        for _ in 0..self.config.opening_hand {
            self.draw_into_hand(Side::Player)?;
        }
        self.spawn_enemy(env)?;
        Ok(())
    }

    /// Spawns the enemy requested by stage progression.
    ///
    /// Only legal between turns. Enemy lanes and hand slots start empty; the
    /// new enemy gets a fresh shuffled deck and its opening hand.
    pub fn spawn_enemy(&mut self, env: &CombatEnv<'_>) -> Result<CharacterId, CombatError> {
        self.ensure_running()?;
        if let Some(turn) = self.active_turn() {
            return Err(TurnError::TurnAlreadyActive {
                number: turn.number(),
            }
            .into());
        }
        let enemy_id = self.pending_enemy.ok_or(TurnError::NoPendingEnemy)?;
        let template = env
            .enemies()?
            .enemy(enemy_id)
            .ok_or(OracleError::EnemyNotFound(enemy_id))?;

        let character_id = CharacterId(self.next_character_id);
        let character = template.combatant().spawn(character_id, Side::Enemy)?;
        let zones = self.build_zones(Side::Enemy, &template.deck, env)?;
        self.allocate_character_id();

        self.slots.clear_side(Side::Enemy);
        self.enemy = Some(character);
        self.enemy_cards = zones;
        self.enemy_reward = template.reward;
        self.pending_enemy = None;
        self.current_enemy = Some(enemy_id);
        self.slots.set_slot(CombatSlot::with_character(
            SlotPosition::character(Side::Enemy),
            character_id,
        ))?;
        self.emit(CombatEvent::EnemySpawned {
            enemy: enemy_id,
            character: character_id,
        });

        for _ in 0..self.config.opening_hand {
            self.draw_into_hand(Side::Enemy)?;
        }
        Ok(character_id)
    }

    /// Instantiates `deck` for `side` and shuffles it.
    fn build_zones(
        &mut self,
        side: Side,
        deck: &[CardId],
        env: &CombatEnv<'_>,
    ) -> Result<CardZones, CombatError> {
        let cards = env.cards()?;
        let mut zones = CardZones::new();
        for &card_id in deck {
            let definition = cards
                .card(card_id)
                .ok_or(OracleError::CardNotFound(card_id))?;
            let id = CardInstanceId(self.allocate_card_id());
            zones.add_to_deck(CardInstance::new(id, definition, side));
        }
        zones.shuffle_deck(env.rng()?, &mut self.rng);
        Ok(zones)
    }

    // ===== shared guards =====

    /// Fails unless the session has started, is not over and is not paused.
    pub(crate) fn ensure_running(&self) -> Result<(), TurnError> {
        match self.phase {
            CombatPhase::None => Err(TurnError::NotStarted),
            CombatPhase::Paused => Err(TurnError::Paused),
            phase if phase.is_terminal() => Err(TurnError::SessionOver(phase)),
            _ => Ok(()),
        }
    }

    /// Moves to `to` along a legal edge and emits `PhaseChanged`.
    pub(crate) fn transition(&mut self, to: CombatPhase) -> Result<(), TurnError> {
        let from = self.phase;
        if !from.can_transition_to(to) {
            return Err(TurnError::InvalidTransition { from, to });
        }
        self.phase = to;
        self.emit(CombatEvent::PhaseChanged { from, to });
        Ok(())
    }
}
