use crate::card::{CardId, CardInstanceId, EffectKind, Recipient};
use crate::character::{DamageOutcome, HealOutcome, Side, TurnEffect};

/// Why an effect was not applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RejectionReason {
    /// No opposing character is on the field.
    TargetMissing,
    /// The opposing character is already dead.
    TargetDead,
    /// The caster died before its card resolved.
    SourceDead,
}

/// A failed validation. Effects after `effect_index` were skipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValidationRejection {
    /// Declaration index of the rejected effect.
    pub effect_index: usize,
    pub reason: RejectionReason,
}

/// What an applied effect changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AppliedValue {
    Damage(DamageOutcome),
    Heal(HealOutcome),
    Guard { flipped: bool },
    TurnEffectRegistered(TurnEffect),
    /// The recipient already carries the maximum number of per-turn effects.
    TurnEffectCapped,
    /// Power scaled down to zero.
    NoEffect,
}

/// One effect that passed validation and ran.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AppliedEffect {
    /// Declaration index within the card definition.
    pub effect_index: usize,
    pub kind: EffectKind,
    /// Side of the character the effect landed on.
    pub recipient: Side,
    /// Magnitude after the instance's power bonus.
    pub power: u32,
    pub value: AppliedValue,
}

impl AppliedEffect {
    /// Whether this effect killed its recipient.
    pub fn caused_death(&self) -> bool {
        matches!(self.value, AppliedValue::Damage(outcome) if outcome.died)
    }
}

/// Everything one resolving card did.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardResolution {
    pub card: CardInstanceId,
    pub card_id: CardId,
    pub owner: Side,
    /// Applied effects in execution order.
    pub applied: Vec<AppliedEffect>,
    pub rejection: Option<ValidationRejection>,
}

impl CardResolution {
    /// Sides whose character died during this resolution.
    pub fn deaths(&self) -> impl Iterator<Item = Side> + '_ {
        self.applied
            .iter()
            .filter(|effect| effect.caused_death())
            .map(|effect| effect.recipient)
    }

    pub fn is_complete(&self) -> bool {
        self.rejection.is_none()
    }
}

pub(super) fn recipient_side(owner: Side, recipient: Recipient) -> Side {
    match recipient {
        Recipient::Source => owner,
        Recipient::Target => owner.opponent(),
    }
}
