//! Card definitions - static card data.
//!
//! A `CardDefinition` holds the immutable properties of a card type. It is
//! shared by reference (`Arc`) across every [`super::CardInstance`] created
//! from it; per-copy runtime data lives on the instance.

use crate::character::TurnEffectKind;

/// Unique identifier of a card definition (the card "type", not a copy).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CardId(pub u32);

impl core::fmt::Display for CardId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "card#{}", self.0)
    }
}

/// Who receives a per-turn effect registered by a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Recipient {
    /// The caster.
    Source,
    /// The caster's opponent.
    Target,
}

/// The kind-specific part of a card effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectKind {
    /// Damage the target. `ignore_guard` bypasses (and preserves) its guard.
    Damage { ignore_guard: bool },

    /// Heal the source.
    Heal,

    /// Register guard on the source.
    Guard,

    /// Register a per-turn effect on the chosen recipient.
    TurnEffect {
        kind: TurnEffectKind,
        duration: u32,
        recipient: Recipient,
    },
}

impl EffectKind {
    /// The side of the execution context this effect lands on.
    pub const fn recipient(&self) -> Recipient {
        match self {
            Self::Damage { .. } => Recipient::Target,
            Self::Heal | Self::Guard => Recipient::Source,
            Self::TurnEffect { recipient, .. } => *recipient,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Damage { .. } => "damage",
            Self::Heal => "heal",
            Self::Guard => "guard",
            Self::TurnEffect { .. } => "turn_effect",
        }
    }
}

/// One entry of a card's effect list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardEffect {
    /// Execution order; ties keep declaration order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub order: u32,
    pub kind: EffectKind,
    /// Base magnitude before the instance's power bonus.
    #[cfg_attr(feature = "serde", serde(default))]
    pub power: u32,
}

impl CardEffect {
    pub fn new(kind: EffectKind, power: u32) -> Self {
        Self {
            order: 0,
            kind,
            power,
        }
    }

    pub fn damage(power: u32) -> Self {
        Self::new(EffectKind::Damage { ignore_guard: false }, power)
    }

    pub fn piercing_damage(power: u32) -> Self {
        Self::new(EffectKind::Damage { ignore_guard: true }, power)
    }

    pub fn heal(power: u32) -> Self {
        Self::new(EffectKind::Heal, power)
    }

    pub fn guard() -> Self {
        Self::new(EffectKind::Guard, 0)
    }

    pub fn turn_effect(
        kind: TurnEffectKind,
        power: u32,
        duration: u32,
        recipient: Recipient,
    ) -> Self {
        Self::new(
            EffectKind::TurnEffect {
                kind,
                duration,
                recipient,
            },
            power,
        )
    }

    pub fn with_order(mut self, order: u32) -> Self {
        self.order = order;
        self
    }
}

/// Immutable card metadata.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardDefinition {
    pub id: CardId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    pub effects: Vec<CardEffect>,
    /// Resource cost; `None` means free.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cost: Option<u32>,
    /// Turns the card rests in hand after it resolves.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cooldown: u32,
    /// Consumable cards go to the discard pile after resolving.
    #[cfg_attr(feature = "serde", serde(default))]
    pub consumable: bool,
}

impl CardDefinition {
    pub fn new(id: CardId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            effects: Vec::new(),
            cost: None,
            cooldown: 0,
            consumable: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_effect(mut self, effect: CardEffect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = Some(cost);
        self
    }

    pub fn with_cooldown(mut self, cooldown: u32) -> Self {
        self.cooldown = cooldown;
        self
    }

    pub fn consumable(mut self) -> Self {
        self.consumable = true;
        self
    }

    /// Effects in execution order: ascending `order`, declaration order on ties.
    pub fn ordered_effects(&self) -> Vec<(usize, &CardEffect)> {
        let mut effects: Vec<_> = self.effects.iter().enumerate().collect();
        // sort_by_key is stable
        effects.sort_by_key(|(_, effect)| effect.order);
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordered_effects_is_stable_on_ties() {
        let card = CardDefinition::new(CardId(1), "combo")
            .with_effect(CardEffect::damage(1).with_order(2))
            .with_effect(CardEffect::heal(2).with_order(0))
            .with_effect(CardEffect::guard().with_order(2))
            .with_effect(CardEffect::damage(3).with_order(1));

        let order: Vec<usize> = card.ordered_effects().iter().map(|(i, _)| *i).collect();
        assert_eq!(order, vec![1, 3, 0, 2]);
    }

    #[test]
    fn recipients_follow_kind() {
        assert_eq!(CardEffect::damage(1).kind.recipient(), Recipient::Target);
        assert_eq!(CardEffect::heal(1).kind.recipient(), Recipient::Source);
        assert_eq!(CardEffect::guard().kind.recipient(), Recipient::Source);
        let poison = CardEffect::turn_effect(TurnEffectKind::Damage, 1, 3, Recipient::Target);
        assert_eq!(poison.kind.recipient(), Recipient::Target);
    }
}
