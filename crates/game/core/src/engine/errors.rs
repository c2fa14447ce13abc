//! Error types for turn sequencing and session flow.

use crate::character::Side;
use crate::error::{FaultKind, GameError};
use crate::state::CombatPhase;

/// Sequencing faults raised by session operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TurnError {
    #[error("turn {number} is still active")]
    TurnAlreadyActive { number: u32 },

    #[error("no turn is active")]
    NoActiveTurn,

    #[error("it is the {expected} turn, not the {actual} turn")]
    NotActingSide { expected: Side, actual: Side },

    #[error("cannot move from {from} to {to}")]
    InvalidTransition { from: CombatPhase, to: CombatPhase },

    #[error("session is over ({0})")]
    SessionOver(CombatPhase),

    #[error("session is paused")]
    Paused,

    #[error("session is not paused")]
    NotPaused,

    #[error("combat has not started")]
    NotStarted,

    #[error("combat has already started")]
    AlreadyStarted,

    #[error("no enemy is on the field")]
    NoOpponent,

    #[error("resolution already started this turn")]
    ResolutionStarted,

    #[error("no enemy is waiting to be spawned")]
    NoPendingEnemy,
}

impl GameError for TurnError {
    fn kind(&self) -> FaultKind {
        FaultKind::InvalidOperation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::TurnAlreadyActive { .. } => "TURN_ALREADY_ACTIVE",
            Self::NoActiveTurn => "TURN_NO_ACTIVE_TURN",
            Self::NotActingSide { .. } => "TURN_NOT_ACTING_SIDE",
            Self::InvalidTransition { .. } => "TURN_INVALID_TRANSITION",
            Self::SessionOver(_) => "TURN_SESSION_OVER",
            Self::Paused => "TURN_PAUSED",
            Self::NotPaused => "TURN_NOT_PAUSED",
            Self::NotStarted => "TURN_NOT_STARTED",
            Self::AlreadyStarted => "TURN_ALREADY_STARTED",
            Self::NoOpponent => "TURN_NO_OPPONENT",
            Self::ResolutionStarted => "TURN_RESOLUTION_STARTED",
            Self::NoPendingEnemy => "TURN_NO_PENDING_ENEMY",
        }
    }
}
