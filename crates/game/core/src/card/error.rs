//! Card lookup errors.

use crate::error::{FaultKind, GameError};

use super::CardInstanceId;

/// A card reference that the session does not know about.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CardError {
    /// The instance id was never created in this session.
    #[error("unknown card instance {0}")]
    UnknownInstance(CardInstanceId),
}

impl GameError for CardError {
    fn kind(&self) -> FaultKind {
        FaultKind::InvalidArgument
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownInstance(_) => "CARD_UNKNOWN_INSTANCE",
        }
    }
}
