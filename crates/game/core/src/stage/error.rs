use crate::error::{FaultKind, GameError};

use super::{ProgressState, StageId};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StageError {
    #[error("stage has no next enemy")]
    NoNextEnemy,

    #[error("stage is already {0}")]
    AlreadyTerminal(ProgressState),

    #[error("stage cannot complete: {advanced} of {total} enemies reached")]
    IncompleteEnemies { advanced: usize, total: usize },

    #[error("stage has already started")]
    AlreadyStarted,

    #[error("{0} has no enemies")]
    Empty(StageId),

    #[error("stage index {index}/{total} is inconsistent with state {state}")]
    InconsistentProgress {
        index: usize,
        total: usize,
        state: ProgressState,
    },
}

impl GameError for StageError {
    fn kind(&self) -> FaultKind {
        match self {
            Self::Empty(_) | Self::InconsistentProgress { .. } => FaultKind::InvalidArgument,
            Self::NoNextEnemy
            | Self::AlreadyTerminal(_)
            | Self::IncompleteEnemies { .. }
            | Self::AlreadyStarted => FaultKind::InvalidOperation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoNextEnemy => "STAGE_NO_NEXT_ENEMY",
            Self::AlreadyTerminal(_) => "STAGE_ALREADY_TERMINAL",
            Self::IncompleteEnemies { .. } => "STAGE_INCOMPLETE_ENEMIES",
            Self::AlreadyStarted => "STAGE_ALREADY_STARTED",
            Self::Empty(_) => "STAGE_EMPTY",
            Self::InconsistentProgress { .. } => "STAGE_INCONSISTENT_PROGRESS",
        }
    }
}
