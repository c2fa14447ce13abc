use crate::card::CardInstanceId;
use crate::character::Side;
use crate::error::{FaultKind, GameError};

use super::SlotPosition;

/// Errors raised by slot addressing and registry writes.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SlotError {
    #[error("wait lane {0} is out of range (1..=4)")]
    WaitLaneOutOfRange(u8),

    #[error("{0} is not a combat lane")]
    NotACombatPosition(SlotPosition),

    #[error("slot {position} cannot be owned by {owner}")]
    OwnerMismatch { position: SlotPosition, owner: Side },

    #[error("hand index {index} exceeds capacity {capacity}")]
    HandIndexOutOfRange { index: u8, capacity: u8 },

    /// A card id may occupy at most one slot across the registry.
    #[error("card {card} already occupies {position}")]
    CardAlreadyPlaced {
        card: CardInstanceId,
        position: SlotPosition,
    },
}

impl GameError for SlotError {
    fn kind(&self) -> FaultKind {
        match self {
            Self::CardAlreadyPlaced { .. } => FaultKind::InvalidOperation,
            _ => FaultKind::InvalidArgument,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::WaitLaneOutOfRange(_) => "SLOT_WAIT_LANE_OUT_OF_RANGE",
            Self::NotACombatPosition(_) => "SLOT_NOT_A_COMBAT_POSITION",
            Self::OwnerMismatch { .. } => "SLOT_OWNER_MISMATCH",
            Self::HandIndexOutOfRange { .. } => "SLOT_HAND_INDEX_OUT_OF_RANGE",
            Self::CardAlreadyPlaced { .. } => "SLOT_CARD_ALREADY_PLACED",
        }
    }
}
