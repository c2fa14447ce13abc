//! Effects registered on a character that fire once at each of its turn starts.

use crate::card::CardId;

use super::{CharacterError, DamageOutcome, HealOutcome};

/// What a per-turn effect does when it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnEffectKind {
    /// Damage over time. Bypasses guard.
    Damage,
    /// Heal over time.
    Heal,
    /// Re-applies guard every turn.
    Guard,
}

/// A registered per-turn effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnEffect {
    pub kind: TurnEffectKind,
    pub power: u32,
    pub remaining_turns: u32,
    /// Card that registered the effect, if any.
    pub source: Option<CardId>,
}

impl TurnEffect {
    pub fn new(kind: TurnEffectKind, power: u32, duration: u32) -> Self {
        Self {
            kind,
            power,
            remaining_turns: duration,
            source: None,
        }
    }

    pub fn with_source(mut self, source: CardId) -> Self {
        self.source = Some(source);
        self
    }

    #[inline]
    pub fn is_expired(&self) -> bool {
        self.remaining_turns == 0
    }

    pub(crate) fn validate(&self) -> Result<(), CharacterError> {
        if self.remaining_turns == 0 {
            return Err(CharacterError::ZeroDuration);
        }
        match self.kind {
            TurnEffectKind::Damage if self.power == 0 => Err(CharacterError::NonPositiveAmount {
                operation: "per-turn damage",
            }),
            TurnEffectKind::Heal if self.power == 0 => Err(CharacterError::NonPositiveAmount {
                operation: "per-turn heal",
            }),
            _ => Ok(()),
        }
    }

    /// Consumes one turn of duration.
    pub(crate) fn elapse(&mut self) {
        self.remaining_turns = self.remaining_turns.saturating_sub(1);
    }
}

/// What one per-turn effect did when it fired.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnEffectTick {
    Damaged {
        effect: TurnEffect,
        outcome: DamageOutcome,
    },
    Healed {
        effect: TurnEffect,
        outcome: HealOutcome,
    },
    Guarded {
        effect: TurnEffect,
        flipped: bool,
    },
}

impl TurnEffectTick {
    /// The effect as it was before this tick consumed a turn.
    pub fn effect(&self) -> &TurnEffect {
        match self {
            Self::Damaged { effect, .. }
            | Self::Healed { effect, .. }
            | Self::Guarded { effect, .. } => effect,
        }
    }

    pub fn caused_death(&self) -> bool {
        matches!(self, Self::Damaged { outcome, .. } if outcome.died)
    }
}
