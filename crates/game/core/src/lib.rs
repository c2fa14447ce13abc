//! Deterministic combat resolution for a turn-based card battler.
//!
//! `battle-core` defines the canonical combat rules (characters, cards, slots,
//! the effect pipeline, turn/phase state machine and stage progression) and
//! exposes pure, synchronous APIs. All combat mutations flow through
//! [`CombatSession`], which owns every piece of mutable state and reports what
//! happened through an outbox of [`CombatEvent`]s.
//!
//! Static content (card definitions, enemy templates, stages) and randomness
//! are injected through the oracle traits bundled in [`env::CombatEnv`].
pub mod card;
pub mod character;
pub mod config;
pub mod effect;
pub mod engine;
pub mod env;
pub mod error;
pub mod event;
pub mod slot;
pub mod stage;
pub mod state;

pub use card::{
    CardDefinition, CardEffect, CardError, CardId, CardInstance, CardInstanceId, CardLocation,
    CardZones, Deck, DiscardPile, EffectKind, Hand, PlayRejection, Recipient, shuffle,
};
pub use character::{
    Character, CharacterError, CharacterId, DamageOutcome, HealOutcome, Resource, Side, Stats,
    TurnEffect, TurnEffectKind, TurnEffectTick,
};
pub use config::CombatConfig;
pub use effect::{
    AppliedEffect, AppliedValue, CardExecutionContext, CardResolution, RejectionReason,
    ResolveError, ValidationRejection, resolve_card,
};
pub use engine::{DrawOutcome, PlayOutcome, QueueReport, TurnError};
pub use env::{
    CardOracle, CombatEnv, CombatantTemplate, ContentCatalog, EnemyId, EnemyOracle, EnemyTemplate,
    Env, OracleError, PcgRng, ResourceSpec, RngOracle, RngState, StageOracle, compute_seed,
};
pub use error::{CombatError, FaultKind, GameError};
pub use event::{CombatEvent, CombatOutcome};
pub use slot::{CombatLane, CombatSlot, SlotError, SlotOccupant, SlotPosition, SlotRegistry};
pub use stage::{
    ProgressState, Stage, StageDefinition, StageError, StageId, advance_enemy, start_stage,
};
pub use state::{
    CardInstanceSnapshot, CardZonesSnapshot, CombatPhase, CombatSession, CombatSnapshot,
    ExecutionQueue, ExecutionRequest, SnapshotError, Turn, TurnContext,
};
