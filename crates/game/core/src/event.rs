//! Notifications emitted by the session.
//!
//! Every state change the presentation layer may want to animate is pushed
//! to the session outbox as a [`CombatEvent`]. Events describe committed
//! changes; skipping or cancelling their playback never rolls anything back.

use crate::card::{CardId, CardInstanceId};
use crate::character::{CharacterId, Side, TurnEffectTick};
use crate::effect::{AppliedEffect, ValidationRejection};
use crate::env::EnemyId;
use crate::slot::SlotPosition;
use crate::stage::StageId;
use crate::state::CombatPhase;

/// How a session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatOutcome {
    Victory,
    Defeat,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatEvent {
    PhaseChanged {
        from: CombatPhase,
        to: CombatPhase,
    },
    TurnStarted {
        number: u32,
        side: Side,
    },
    TurnCompleted {
        number: u32,
        side: Side,
    },
    CardDrawn {
        side: Side,
        card: CardInstanceId,
        hand_slot: SlotPosition,
    },
    CardPlayed {
        side: Side,
        card: CardInstanceId,
        card_id: CardId,
        slot: SlotPosition,
    },
    /// A queued card stepped one lane closer to battle.
    CardAdvanced {
        side: Side,
        card: CardInstanceId,
        from: SlotPosition,
        to: SlotPosition,
    },
    CardReturned {
        side: Side,
        card: CardInstanceId,
        hand_slot: SlotPosition,
    },
    CardDiscarded {
        side: Side,
        card: CardInstanceId,
    },
    EffectResolved {
        card: CardInstanceId,
        effect: AppliedEffect,
    },
    EffectRejected {
        card: CardInstanceId,
        rejection: ValidationRejection,
    },
    TurnEffectTicked {
        side: Side,
        tick: TurnEffectTick,
    },
    HealthChanged {
        side: Side,
        character: CharacterId,
        previous: u32,
        current: u32,
    },
    GuardStateChanged {
        side: Side,
        character: CharacterId,
        guarded: bool,
    },
    ResourceChanged {
        side: Side,
        previous: u32,
        current: u32,
    },
    CharacterDied {
        side: Side,
        character: CharacterId,
    },
    HandVanished {
        side: Side,
        cards: Vec<CardInstanceId>,
    },
    RewardGranted {
        enemy: EnemyId,
        amount: u32,
    },
    /// The next enemy of the stage is ready to be spawned.
    SpawnRequested {
        enemy: EnemyId,
    },
    EnemySpawned {
        enemy: EnemyId,
        character: CharacterId,
    },
    StageCompleted {
        stage: StageId,
    },
    GameOver {
        outcome: CombatOutcome,
    },
}
