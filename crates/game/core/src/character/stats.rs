//! Health pool and the outcomes of mutating it.

use super::CharacterError;

/// Health of a combatant.
///
/// Invariant: `0 <= current_health <= max_health` and `max_health >= 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stats {
    max_health: u32,
    current_health: u32,
}

impl Stats {
    /// Creates a full health pool.
    pub fn new(max_health: u32) -> Result<Self, CharacterError> {
        Self::with_current(max_health, max_health)
    }

    /// Creates a health pool at an explicit current value.
    pub fn with_current(max_health: u32, current_health: u32) -> Result<Self, CharacterError> {
        let stats = Self {
            max_health,
            current_health,
        };
        stats.validate()?;
        Ok(stats)
    }

    /// Checks the health invariant (used after deserialization).
    pub fn validate(&self) -> Result<(), CharacterError> {
        if self.max_health == 0 {
            return Err(CharacterError::ZeroMaxHealth);
        }
        if self.current_health > self.max_health {
            return Err(CharacterError::HealthOutOfRange {
                current: self.current_health,
                max: self.max_health,
            });
        }
        Ok(())
    }

    #[inline]
    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    #[inline]
    pub fn current_health(&self) -> u32 {
        self.current_health
    }

    #[inline]
    pub fn is_depleted(&self) -> bool {
        self.current_health == 0
    }

    /// Subtracts `amount`, saturating at zero. Returns the amount removed.
    pub(crate) fn lose(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.current_health);
        self.current_health -= lost;
        lost
    }

    /// Adds `amount`, clamped to max. Returns the amount restored.
    pub(crate) fn gain(&mut self, amount: u32) -> u32 {
        let gained = amount.min(self.max_health - self.current_health);
        self.current_health += gained;
        gained
    }
}

/// Result of a damage call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageOutcome {
    /// Damage requested by the caller.
    pub requested: u32,

    /// Health before the call.
    pub previous: u32,

    /// Health after the call.
    pub current: u32,

    /// The hit was nullified by guard.
    pub blocked: bool,

    /// This call cleared the guard flag.
    pub guard_cleared: bool,

    /// This call moved the character from alive to dead.
    ///
    /// Only the transition sets it; hits landing on an already-dead character
    /// report `false`.
    pub died: bool,
}

impl DamageOutcome {
    /// Health actually removed.
    pub fn applied(&self) -> u32 {
        self.previous - self.current
    }

    pub(crate) fn ignored(requested: u32, health: u32) -> Self {
        Self {
            requested,
            previous: health,
            current: health,
            ..Self::default()
        }
    }
}

/// Result of a heal call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealOutcome {
    pub requested: u32,
    pub previous: u32,
    pub current: u32,
}

impl HealOutcome {
    /// Health actually restored.
    pub fn applied(&self) -> u32 {
        self.current - self.previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_max_health() {
        assert_eq!(Stats::new(0), Err(CharacterError::ZeroMaxHealth));
    }

    #[test]
    fn rejects_current_above_max() {
        assert!(matches!(
            Stats::with_current(10, 11),
            Err(CharacterError::HealthOutOfRange { current: 11, max: 10 })
        ));
    }

    #[test]
    fn lose_and_gain_saturate() {
        let mut stats = Stats::with_current(10, 3).unwrap();
        assert_eq!(stats.lose(5), 3);
        assert_eq!(stats.current_health(), 0);
        assert_eq!(stats.gain(50), 10);
        assert_eq!(stats.current_health(), 10);
    }
}
