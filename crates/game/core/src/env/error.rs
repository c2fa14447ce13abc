//! Oracle access errors.

use crate::card::CardId;
use crate::error::{FaultKind, GameError};
use crate::stage::StageId;

use super::EnemyId;

/// Errors that occur when accessing oracle data.
///
/// A missing oracle is a wiring bug in the caller; a missing entry is a bad
/// reference in content or in the request.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    /// CardOracle is not available in the environment.
    #[error("CardOracle not available")]
    CardsNotAvailable,

    /// EnemyOracle is not available in the environment.
    #[error("EnemyOracle not available")]
    EnemiesNotAvailable,

    /// StageOracle is not available in the environment.
    #[error("StageOracle not available")]
    StagesNotAvailable,

    /// RngOracle is not available in the environment.
    #[error("RngOracle not available")]
    RngNotAvailable,

    #[error("card definition {0} not found")]
    CardNotFound(CardId),

    #[error("enemy template {0} not found")]
    EnemyNotFound(EnemyId),

    #[error("stage definition {0} not found")]
    StageNotFound(StageId),
}

impl GameError for OracleError {
    fn kind(&self) -> FaultKind {
        use OracleError::*;
        match self {
            CardsNotAvailable | EnemiesNotAvailable | StagesNotAvailable | RngNotAvailable => {
                FaultKind::InvalidOperation
            }
            CardNotFound(_) | EnemyNotFound(_) | StageNotFound(_) => FaultKind::InvalidArgument,
        }
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            CardsNotAvailable => "ORACLE_CARDS_NOT_AVAILABLE",
            EnemiesNotAvailable => "ORACLE_ENEMIES_NOT_AVAILABLE",
            StagesNotAvailable => "ORACLE_STAGES_NOT_AVAILABLE",
            RngNotAvailable => "ORACLE_RNG_NOT_AVAILABLE",
            CardNotFound(_) => "ORACLE_CARD_NOT_FOUND",
            EnemyNotFound(_) => "ORACLE_ENEMY_NOT_FOUND",
            StageNotFound(_) => "ORACLE_STAGE_NOT_FOUND",
        }
    }
}
