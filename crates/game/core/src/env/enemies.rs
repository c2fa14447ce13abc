//! Combatant templates and the enemy oracle.
//!
//! Templates describe a combatant before it enters a session: health, an
//! optional resource pool, the deck it fights with and (for enemies) the
//! reward granted on defeat. The session turns them into a [`Character`] plus
//! card instances at spawn time.

use crate::card::CardId;
use crate::character::{Character, CharacterError, CharacterId, Resource, Side, Stats};

/// Unique identifier of an enemy template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EnemyId(pub u32);

impl core::fmt::Display for EnemyId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "enemy#{}", self.0)
    }
}

/// Resource pool a combatant starts with.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceSpec {
    pub name: String,
    pub max_amount: u32,
    /// Defaults to `max_amount`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub starting_amount: Option<u32>,
}

impl ResourceSpec {
    pub fn new(name: impl Into<String>, max_amount: u32) -> Self {
        Self {
            name: name.into(),
            max_amount,
            starting_amount: None,
        }
    }

    pub fn starting_at(mut self, amount: u32) -> Self {
        self.starting_amount = Some(amount);
        self
    }

    pub fn to_resource(&self) -> Result<Resource, CharacterError> {
        Resource::new(
            self.name.clone(),
            self.max_amount,
            self.starting_amount.unwrap_or(self.max_amount),
        )
    }
}

/// Loadout shared by the player and enemy templates.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantTemplate {
    pub name: String,
    pub max_health: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub resource: Option<ResourceSpec>,
    /// Deck contents, bottom first.
    pub deck: Vec<CardId>,
}

impl CombatantTemplate {
    pub fn new(name: impl Into<String>, max_health: u32) -> Self {
        Self {
            name: name.into(),
            max_health,
            resource: None,
            deck: Vec::new(),
        }
    }

    pub fn with_resource(mut self, resource: ResourceSpec) -> Self {
        self.resource = Some(resource);
        self
    }

    pub fn with_deck(mut self, deck: Vec<CardId>) -> Self {
        self.deck = deck;
        self
    }

    /// Builds a full-health character from this template.
    pub fn spawn(&self, id: CharacterId, side: Side) -> Result<Character, CharacterError> {
        let stats = Stats::new(self.max_health)?;
        let mut character = Character::new(id, self.name.clone(), side, stats);
        if let Some(spec) = &self.resource {
            character = character.with_resource(spec.to_resource()?);
        }
        Ok(character)
    }
}

/// Enemy template: a combatant plus its defeat reward.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyTemplate {
    pub id: EnemyId,
    pub name: String,
    pub max_health: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub resource: Option<ResourceSpec>,
    pub deck: Vec<CardId>,
    /// Reward granted once when this enemy dies.
    #[cfg_attr(feature = "serde", serde(default))]
    pub reward: u32,
}

impl EnemyTemplate {
    pub fn new(id: EnemyId, combatant: CombatantTemplate) -> Self {
        Self {
            id,
            name: combatant.name,
            max_health: combatant.max_health,
            resource: combatant.resource,
            deck: combatant.deck,
            reward: 0,
        }
    }

    pub fn with_reward(mut self, reward: u32) -> Self {
        self.reward = reward;
        self
    }

    pub fn combatant(&self) -> CombatantTemplate {
        CombatantTemplate {
            name: self.name.clone(),
            max_health: self.max_health,
            resource: self.resource.clone(),
            deck: self.deck.clone(),
        }
    }
}

/// Read-only enemy roster.
pub trait EnemyOracle: Send + Sync {
    fn enemy(&self, id: EnemyId) -> Option<EnemyTemplate>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_builds_full_health_character() {
        let template = CombatantTemplate::new("slime", 12)
            .with_resource(ResourceSpec::new("ooze", 3).starting_at(1));
        let slime = template.spawn(CharacterId(4), Side::Enemy).unwrap();
        assert_eq!(slime.current_health(), 12);
        assert_eq!(slime.side(), Side::Enemy);
        assert_eq!(slime.resource().unwrap().current_amount(), 1);
    }

    #[test]
    fn spawn_rejects_zero_health() {
        let template = CombatantTemplate::new("ghost", 0);
        assert_eq!(
            template.spawn(CharacterId(1), Side::Enemy),
            Err(CharacterError::ZeroMaxHealth)
        );
    }
}
