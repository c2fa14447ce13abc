//! Resource pools (mana, charges) spent to play cards.
//!
//! Resources are immutable values: every update returns a new instance so a
//! pool captured in an event or snapshot can never change underneath its
//! holder.

use super::CharacterError;

/// A named, bounded pool: `0 <= current_amount <= max_amount`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resource {
    name: String,
    max_amount: u32,
    current_amount: u32,
}

impl Resource {
    /// Creates a pool at an explicit current amount.
    pub fn new(
        name: impl Into<String>,
        max_amount: u32,
        current_amount: u32,
    ) -> Result<Self, CharacterError> {
        let resource = Self {
            name: name.into(),
            max_amount,
            current_amount,
        };
        resource.validate()?;
        Ok(resource)
    }

    /// Creates a full pool.
    pub fn full(name: impl Into<String>, max_amount: u32) -> Self {
        Self {
            name: name.into(),
            max_amount,
            current_amount: max_amount,
        }
    }

    /// Checks the pool invariant (used after deserialization).
    pub fn validate(&self) -> Result<(), CharacterError> {
        if self.current_amount > self.max_amount {
            return Err(CharacterError::ResourceOutOfRange {
                name: self.name.clone(),
                current: self.current_amount,
                max: self.max_amount,
            });
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn max_amount(&self) -> u32 {
        self.max_amount
    }

    pub fn current_amount(&self) -> u32 {
        self.current_amount
    }

    pub fn can_afford(&self, cost: u32) -> bool {
        self.current_amount >= cost
    }

    /// Returns the pool after paying `cost`, or `None` when it cannot be paid.
    #[must_use]
    pub fn spend(&self, cost: u32) -> Option<Self> {
        let remaining = self.current_amount.checked_sub(cost)?;
        Some(Self {
            current_amount: remaining,
            ..self.clone()
        })
    }

    /// Returns the pool after restoring `amount`, clamped to the maximum.
    #[must_use]
    pub fn restore(&self, amount: u32) -> Self {
        Self {
            current_amount: self
                .current_amount
                .saturating_add(amount)
                .min(self.max_amount),
            ..self.clone()
        }
    }

    /// Returns the pool with `current_amount` replaced.
    pub fn with_current(&self, current_amount: u32) -> Result<Self, CharacterError> {
        Self::new(self.name.clone(), self.max_amount, current_amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spend_returns_new_instance() {
        let mana = Resource::full("mana", 3);
        let after = mana.spend(2).unwrap();
        assert_eq!(mana.current_amount(), 3);
        assert_eq!(after.current_amount(), 1);
        assert!(after.spend(2).is_none());
    }

    #[test]
    fn restore_clamps_to_max() {
        let mana = Resource::new("mana", 3, 0).unwrap();
        assert_eq!(mana.restore(10).current_amount(), 3);
    }

    #[test]
    fn rejects_current_above_max() {
        assert!(Resource::new("mana", 2, 3).is_err());
        assert!(Resource::full("mana", 2).with_current(5).is_err());
    }
}
