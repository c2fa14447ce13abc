//! Serializable capture of a session and its validated restore.
//!
//! A snapshot carries card ids instead of definitions; restoring rehydrates
//! definitions through the [`CardOracle`]. Restore builds a complete new
//! session and checks every invariant before touching the live one, so a
//! corrupt snapshot leaves the session exactly as it was.

use std::collections::{BTreeMap, BTreeSet};

use crate::card::{CardId, CardInstance, CardInstanceId, CardZones, Deck, DiscardPile, Hand};
use crate::character::{Character, CharacterId, Side};
use crate::config::CombatConfig;
use crate::env::{CardOracle, CombatEnv, EnemyId, OracleError, RngState};
use crate::error::{CombatError, FaultKind, GameError};
use crate::slot::{CombatSlot, SlotOccupant, SlotPosition, SlotRegistry};
use crate::stage::Stage;

use super::{CombatPhase, CombatSession, ExecutionQueue, ExecutionRequest, Turn, TurnContext};

// ============================================================================
// Snapshot Structures
// ============================================================================

/// Mutable state of one card copy.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardInstanceSnapshot {
    pub id: CardInstanceId,
    pub card_id: CardId,
    pub current_cooldown: u32,
    pub hand_slot: Option<SlotPosition>,
    pub combat_slot: Option<SlotPosition>,
    pub owner: Side,
    pub power_bonus: i32,
}

impl CardInstanceSnapshot {
    fn capture(card: &CardInstance) -> Self {
        Self {
            id: card.id(),
            card_id: card.card_id(),
            current_cooldown: card.current_cooldown(),
            hand_slot: card.hand_slot(),
            combat_slot: card.combat_slot(),
            owner: card.owner(),
            power_bonus: card.power_bonus(),
        }
    }
}

/// Card containers of one side.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardZonesSnapshot {
    pub cards: Vec<CardInstanceSnapshot>,
    pub deck: Deck,
    pub hand: Hand,
    pub in_play: Vec<CardInstanceId>,
    pub discard: DiscardPile,
}

impl CardZonesSnapshot {
    fn capture(zones: &CardZones) -> Self {
        Self {
            cards: zones.instances().map(CardInstanceSnapshot::capture).collect(),
            deck: zones.deck().clone(),
            hand: zones.hand().clone(),
            in_play: zones.in_play().to_vec(),
            discard: zones.discard_pile().clone(),
        }
    }
}

/// Everything needed to resume a session, except the undrained event outbox.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatSnapshot {
    pub config: CombatConfig,
    pub phase: CombatPhase,
    pub paused_from: Option<CombatPhase>,
    pub turns: Vec<Turn>,
    pub context: TurnContext,
    pub slots: Vec<CombatSlot>,
    pub player: Character,
    pub enemy: Option<Character>,
    pub player_cards: CardZonesSnapshot,
    pub enemy_cards: CardZonesSnapshot,
    pub stage: Stage,
    pub pending_enemy: Option<EnemyId>,
    pub current_enemy: Option<EnemyId>,
    pub enemy_reward: u32,
    pub queue: Vec<ExecutionRequest>,
    pub rng: RngState,
    pub next_character_id: u32,
    pub next_card_id: u32,
    pub rewards: u32,
}

impl CombatSnapshot {
    /// Turn number recorded in the snapshot.
    pub fn turn_number(&self) -> u32 {
        self.turns.len() as u32
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Reasons a snapshot is rejected on restore.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    #[error("turn at index {index} has number {number}")]
    TurnSequence { index: usize, number: u32 },

    #[error("turn {number} is open but is not the last turn")]
    OpenTurnNotLast { number: u32 },

    #[error("paused_from must be set exactly when the phase is Paused")]
    PauseStateMismatch,

    #[error("character {character} is on the wrong side or has the wrong id")]
    CharacterMisplaced { character: CharacterId },

    #[error("card {0} appears more than once")]
    DuplicateCard(CardInstanceId),

    #[error("card {0} has no zone, or its zone disagrees with its owner")]
    CardZoneMismatch(CardInstanceId),

    #[error("slot {position} disagrees with the card it holds")]
    SlotMismatch { position: SlotPosition },

    #[error("queued request for {0} is not a combat slot of its owner")]
    InvalidQueueEntry(SlotPosition),

    #[error("id allocator is behind an existing id")]
    IdCounterBehind,
}

impl GameError for SnapshotError {
    fn kind(&self) -> FaultKind {
        FaultKind::InvalidArgument
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::TurnSequence { .. } => "SNAPSHOT_TURN_SEQUENCE",
            Self::OpenTurnNotLast { .. } => "SNAPSHOT_OPEN_TURN_NOT_LAST",
            Self::PauseStateMismatch => "SNAPSHOT_PAUSE_STATE_MISMATCH",
            Self::CharacterMisplaced { .. } => "SNAPSHOT_CHARACTER_MISPLACED",
            Self::DuplicateCard(_) => "SNAPSHOT_DUPLICATE_CARD",
            Self::CardZoneMismatch(_) => "SNAPSHOT_CARD_ZONE_MISMATCH",
            Self::SlotMismatch { .. } => "SNAPSHOT_SLOT_MISMATCH",
            Self::InvalidQueueEntry(_) => "SNAPSHOT_INVALID_QUEUE_ENTRY",
            Self::IdCounterBehind => "SNAPSHOT_ID_COUNTER_BEHIND",
        }
    }
}

// ============================================================================
// Capture / Restore
// ============================================================================

impl CombatSession {
    /// Captures the committed state.
    pub fn snapshot(&self) -> CombatSnapshot {
        CombatSnapshot {
            config: self.config.clone(),
            phase: self.phase,
            paused_from: self.paused_from,
            turns: self.turns.clone(),
            context: self.context,
            slots: self.slots.iter().copied().collect(),
            player: self.player.clone(),
            enemy: self.enemy.clone(),
            player_cards: CardZonesSnapshot::capture(&self.player_cards),
            enemy_cards: CardZonesSnapshot::capture(&self.enemy_cards),
            stage: self.stage.clone(),
            pending_enemy: self.pending_enemy,
            current_enemy: self.current_enemy,
            enemy_reward: self.enemy_reward,
            queue: self.queue.iter().copied().collect(),
            rng: self.rng,
            next_character_id: self.next_character_id,
            next_card_id: self.next_card_id,
            rewards: self.rewards,
        }
    }

    /// Replaces the whole session with `snapshot`.
    ///
    /// On error nothing is modified. Pending events are discarded on success.
    pub fn restore(
        &mut self,
        snapshot: CombatSnapshot,
        env: &CombatEnv<'_>,
    ) -> Result<(), CombatError> {
        let restored = Self::from_snapshot(snapshot, env.cards()?)?;
        *self = restored;
        Ok(())
    }

    /// Builds a fully validated session from a snapshot.
    pub fn from_snapshot(
        snapshot: CombatSnapshot,
        cards: &dyn CardOracle,
    ) -> Result<Self, CombatError> {
        validate_turns(&snapshot.turns)?;
        if snapshot.paused_from.is_some() != (snapshot.phase == CombatPhase::Paused) {
            return Err(SnapshotError::PauseStateMismatch.into());
        }

        validate_character(&snapshot.player, Side::Player)?;
        if snapshot.player.id() != CharacterId::PLAYER {
            return Err(SnapshotError::CharacterMisplaced {
                character: snapshot.player.id(),
            }
            .into());
        }
        if let Some(enemy) = &snapshot.enemy {
            validate_character(enemy, Side::Enemy)?;
            if enemy.id().0 >= snapshot.next_character_id {
                return Err(SnapshotError::IdCounterBehind.into());
            }
        }
        snapshot.stage.validate()?;

        let player_cards = rebuild_zones(snapshot.player_cards, Side::Player, cards)?;
        let enemy_cards = rebuild_zones(snapshot.enemy_cards, Side::Enemy, cards)?;
        let max_card_id = player_cards
            .instances()
            .chain(enemy_cards.instances())
            .map(|card| card.id().0)
            .max();
        if max_card_id.is_some_and(|max| max >= snapshot.next_card_id) {
            return Err(SnapshotError::IdCounterBehind.into());
        }

        let mut slots = SlotRegistry::new(snapshot.config.hand_capacity);
        let mut seen_cards = BTreeSet::new();
        for slot in snapshot.slots {
            if let Some(SlotOccupant::Card(id)) = slot.occupant {
                if !seen_cards.insert(id) {
                    return Err(SnapshotError::DuplicateCard(id).into());
                }
                let side = slot.position.side();
                let zones = if side == Side::Player {
                    &player_cards
                } else {
                    &enemy_cards
                };
                let card = zones.get(id).ok_or(SnapshotError::SlotMismatch {
                    position: slot.position,
                })?;
                let placed = match slot.position {
                    SlotPosition::Hand { .. } => card.hand_slot() == Some(slot.position),
                    SlotPosition::Combat { .. } => card.combat_slot() == Some(slot.position),
                    SlotPosition::Character { .. } => false,
                };
                if !placed {
                    return Err(SnapshotError::SlotMismatch {
                        position: slot.position,
                    }
                    .into());
                }
            }
            slots.set_slot(slot)?;
        }
        // every placed card must be in the registry too
        for card in player_cards.instances().chain(enemy_cards.instances()) {
            for position in [card.hand_slot(), card.combat_slot()].into_iter().flatten() {
                if slots.get_slot(position).card() != Some(card.id()) {
                    return Err(SnapshotError::SlotMismatch { position }.into());
                }
            }
        }

        for request in &snapshot.queue {
            let is_own_lane = matches!(
                request.position,
                SlotPosition::Combat { side, .. } if side == request.owner
            );
            if !is_own_lane {
                return Err(SnapshotError::InvalidQueueEntry(request.position).into());
            }
        }

        Ok(Self {
            config: snapshot.config,
            phase: snapshot.phase,
            paused_from: snapshot.paused_from,
            turns: snapshot.turns,
            context: snapshot.context,
            slots,
            player: snapshot.player,
            enemy: snapshot.enemy,
            player_cards,
            enemy_cards,
            stage: snapshot.stage,
            pending_enemy: snapshot.pending_enemy,
            current_enemy: snapshot.current_enemy,
            enemy_reward: snapshot.enemy_reward,
            queue: ExecutionQueue::from_requests(snapshot.queue),
            rng: snapshot.rng,
            next_character_id: snapshot.next_character_id,
            next_card_id: snapshot.next_card_id,
            rewards: snapshot.rewards,
            events: Vec::new(),
        })
    }
}

fn validate_turns(turns: &[Turn]) -> Result<(), SnapshotError> {
    for (index, turn) in turns.iter().enumerate() {
        if turn.number() as usize != index + 1 {
            return Err(SnapshotError::TurnSequence {
                index,
                number: turn.number(),
            });
        }
        if !turn.is_completed() && index + 1 != turns.len() {
            return Err(SnapshotError::OpenTurnNotLast {
                number: turn.number(),
            });
        }
    }
    Ok(())
}

fn validate_character(character: &Character, side: Side) -> Result<(), CombatError> {
    character.validate()?;
    if character.side() != side {
        return Err(SnapshotError::CharacterMisplaced {
            character: character.id(),
        }
        .into());
    }
    Ok(())
}

fn rebuild_zones(
    snapshot: CardZonesSnapshot,
    side: Side,
    oracle: &dyn CardOracle,
) -> Result<CardZones, CombatError> {
    let mut instances = BTreeMap::new();
    for card in snapshot.cards {
        if card.owner != side {
            return Err(SnapshotError::CardZoneMismatch(card.id).into());
        }
        let definition = oracle
            .card(card.card_id)
            .ok_or(OracleError::CardNotFound(card.card_id))?;
        let instance = CardInstance::new(card.id, definition, card.owner)
            .with_power_bonus(card.power_bonus)
            .with_cooldown(card.current_cooldown)
            .with_slots(card.hand_slot, card.combat_slot);
        if instances.insert(card.id, instance).is_some() {
            return Err(SnapshotError::DuplicateCard(card.id).into());
        }
    }

    // each instance in exactly one container
    let mut placed = BTreeSet::new();
    let containers = [
        snapshot.deck.as_slice(),
        snapshot.hand.as_slice(),
        snapshot.in_play.as_slice(),
        snapshot.discard.as_slice(),
    ];
    for id in containers.into_iter().flatten() {
        if !instances.contains_key(id) {
            return Err(SnapshotError::CardZoneMismatch(*id).into());
        }
        if !placed.insert(*id) {
            return Err(SnapshotError::DuplicateCard(*id).into());
        }
    }
    if let Some(orphan) = instances.keys().find(|id| !placed.contains(*id)) {
        return Err(SnapshotError::CardZoneMismatch(*orphan).into());
    }

    // slot assignments must agree with the container
    for id in snapshot.hand.as_slice() {
        let card = &instances[id];
        if card.hand_slot().is_none() || card.combat_slot().is_some() {
            return Err(SnapshotError::CardZoneMismatch(*id).into());
        }
    }
    for id in snapshot.in_play.iter() {
        let card = &instances[id];
        if card.combat_slot().is_none() || card.hand_slot().is_some() {
            return Err(SnapshotError::CardZoneMismatch(*id).into());
        }
    }
    for id in snapshot.deck.as_slice().iter().chain(snapshot.discard.as_slice()) {
        let card = &instances[id];
        if card.hand_slot().is_some() || card.combat_slot().is_some() {
            return Err(SnapshotError::CardZoneMismatch(*id).into());
        }
    }

    Ok(CardZones::from_parts(
        instances,
        snapshot.deck,
        snapshot.hand,
        snapshot.in_play,
        snapshot.discard,
    ))
}
