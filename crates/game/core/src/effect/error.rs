use crate::card::CardInstanceId;
use crate::character::{CharacterError, Side};
use crate::error::{FaultKind, GameError};

/// Faults while resolving a card.
///
/// Validation failures (dead or missing target) are not errors; they are
/// reported in [`super::CardResolution::rejection`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("card {0} is not in play")]
    CardNotInPlay(CardInstanceId),

    #[error("no {0} character to cast the card")]
    CasterMissing(Side),

    #[error("effect could not be applied: {0}")]
    Character(#[from] CharacterError),
}

impl GameError for ResolveError {
    fn kind(&self) -> FaultKind {
        match self {
            Self::CardNotInPlay(_) | Self::CasterMissing(_) => FaultKind::InvalidOperation,
            Self::Character(e) => e.kind(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::CardNotInPlay(_) => "RESOLVE_CARD_NOT_IN_PLAY",
            Self::CasterMissing(_) => "RESOLVE_CASTER_MISSING",
            Self::Character(e) => e.error_code(),
        }
    }
}
