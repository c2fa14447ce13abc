//! Character state errors.

use crate::error::{FaultKind, GameError};

/// Errors raised by character primitives.
///
/// Operations on an already-dead character are no-ops, not errors, so late
/// effect ticks never fault.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CharacterError {
    /// Damage, heal, or restore amounts must be strictly positive.
    #[error("{operation} amount must be positive")]
    NonPositiveAmount { operation: &'static str },

    /// Maximum health must be at least 1.
    #[error("max health must be positive")]
    ZeroMaxHealth,

    /// Current health exceeds maximum health.
    #[error("current health {current} exceeds max health {max}")]
    HealthOutOfRange { current: u32, max: u32 },

    /// Current resource exceeds the resource maximum.
    #[error("resource {name} current {current} exceeds max {max}")]
    ResourceOutOfRange {
        name: String,
        current: u32,
        max: u32,
    },

    /// A per-turn effect was registered with zero duration.
    #[error("per-turn effect duration must be positive")]
    ZeroDuration,
}

impl GameError for CharacterError {
    fn kind(&self) -> FaultKind {
        FaultKind::InvalidArgument
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NonPositiveAmount { .. } => "CHARACTER_NON_POSITIVE_AMOUNT",
            Self::ZeroMaxHealth => "CHARACTER_ZERO_MAX_HEALTH",
            Self::HealthOutOfRange { .. } => "CHARACTER_HEALTH_OUT_OF_RANGE",
            Self::ResourceOutOfRange { .. } => "CHARACTER_RESOURCE_OUT_OF_RANGE",
            Self::ZeroDuration => "CHARACTER_ZERO_DURATION",
        }
    }
}
