//! Combatants and their mutable state.
//!
//! A single [`Character`] type serves both sides of a fight; the [`Side`] tag
//! distinguishes the controlled character from the opposing one. State is
//! mutated only through the primitives on `Character`, each of which reports
//! precisely what changed so the session can emit notifications for actual
//! transitions only.
mod error;
mod resource;
mod stats;
mod turn_effect;

pub use error::CharacterError;
pub use resource::Resource;
pub use stats::{DamageOutcome, HealOutcome, Stats};
pub use turn_effect::{TurnEffect, TurnEffectKind, TurnEffectTick};

/// Which side of the fight something belongs to.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    /// The controlled character.
    Player,
    /// The opposing character.
    Enemy,
}

impl Side {
    pub const fn opponent(self) -> Self {
        match self {
            Self::Player => Self::Enemy,
            Self::Enemy => Self::Player,
        }
    }
}

/// Session-unique identifier of a character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CharacterId(pub u32);

impl CharacterId {
    /// The controlled character always has id 0.
    pub const PLAYER: Self = Self(0);
}

impl core::fmt::Display for CharacterId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "character#{}", self.0)
    }
}

/// An HP-bearing combatant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Character {
    id: CharacterId,
    name: String,
    side: Side,
    stats: Stats,
    guarded: bool,
    resource: Option<Resource>,
    turn_effects: Vec<TurnEffect>,
}

impl Character {
    pub fn new(id: CharacterId, name: impl Into<String>, side: Side, stats: Stats) -> Self {
        Self {
            id,
            name: name.into(),
            side,
            stats,
            guarded: false,
            resource: None,
            turn_effects: Vec::new(),
        }
    }

    pub fn with_resource(mut self, resource: Resource) -> Self {
        self.resource = Some(resource);
        self
    }

    /// Re-checks every invariant (used after deserialization).
    pub fn validate(&self) -> Result<(), CharacterError> {
        self.stats.validate()?;
        if let Some(resource) = &self.resource {
            resource.validate()?;
        }
        self.turn_effects.iter().try_for_each(TurnEffect::validate)
    }

    // ===== accessors =====

    pub fn id(&self) -> CharacterId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn current_health(&self) -> u32 {
        self.stats.current_health()
    }

    pub fn max_health(&self) -> u32 {
        self.stats.max_health()
    }

    pub fn is_guarded(&self) -> bool {
        self.guarded
    }

    /// Derived from health; never stored.
    pub fn is_dead(&self) -> bool {
        self.stats.is_depleted()
    }

    pub fn is_alive(&self) -> bool {
        !self.is_dead()
    }

    pub fn resource(&self) -> Option<&Resource> {
        self.resource.as_ref()
    }

    pub fn turn_effects(&self) -> &[TurnEffect] {
        &self.turn_effects
    }

    // ===== health =====

    /// Applies a hit. A guarded character blocks the hit and loses its guard.
    pub fn take_damage(&mut self, amount: u32) -> Result<DamageOutcome, CharacterError> {
        Self::require_positive(amount, "damage")?;
        if self.is_dead() {
            return Ok(DamageOutcome::ignored(amount, 0));
        }

        if self.guarded {
            self.guarded = false;
            let health = self.current_health();
            return Ok(DamageOutcome {
                blocked: true,
                guard_cleared: true,
                ..DamageOutcome::ignored(amount, health)
            });
        }

        Ok(self.lose_health(amount))
    }

    /// Applies a hit that bypasses guard. Guard stays as it was.
    pub fn take_damage_ignoring_guard(
        &mut self,
        amount: u32,
    ) -> Result<DamageOutcome, CharacterError> {
        Self::require_positive(amount, "damage")?;
        if self.is_dead() {
            return Ok(DamageOutcome::ignored(amount, 0));
        }
        Ok(self.lose_health(amount))
    }

    /// Restores health up to the maximum. Never resurrects.
    pub fn heal(&mut self, amount: u32) -> Result<HealOutcome, CharacterError> {
        Self::require_positive(amount, "heal")?;
        let previous = self.current_health();
        if !self.is_dead() {
            self.stats.gain(amount);
        }
        Ok(HealOutcome {
            requested: amount,
            previous,
            current: self.current_health(),
        })
    }

    /// Sets the guard flag. Returns `true` only when the flag actually flipped.
    pub fn set_guarded(&mut self, guarded: bool) -> bool {
        if self.is_dead() || self.guarded == guarded {
            return false;
        }
        self.guarded = guarded;
        true
    }

    fn lose_health(&mut self, amount: u32) -> DamageOutcome {
        let previous = self.current_health();
        self.stats.lose(amount);
        DamageOutcome {
            requested: amount,
            previous,
            current: self.current_health(),
            blocked: false,
            guard_cleared: false,
            died: previous > 0 && self.is_dead(),
        }
    }

    fn require_positive(amount: u32, operation: &'static str) -> Result<(), CharacterError> {
        if amount == 0 {
            return Err(CharacterError::NonPositiveAmount { operation });
        }
        Ok(())
    }

    // ===== resource =====

    /// Whether the pool covers `cost`. Characters without a pool afford nothing.
    pub fn can_afford(&self, cost: u32) -> bool {
        self.resource
            .as_ref()
            .is_some_and(|resource| resource.can_afford(cost))
    }

    /// Pays `cost` from the pool. Returns `false` (and changes nothing) when it
    /// cannot be paid.
    pub fn spend_resource(&mut self, cost: u32) -> bool {
        match self.resource.as_ref().and_then(|r| r.spend(cost)) {
            Some(next) => {
                self.resource = Some(next);
                true
            }
            None => false,
        }
    }

    /// Restores the pool. Returns `(previous, current)` when a pool exists.
    pub fn restore_resource(&mut self, amount: u32) -> Option<(u32, u32)> {
        let resource = self.resource.as_ref()?;
        let previous = resource.current_amount();
        let next = resource.restore(amount);
        let current = next.current_amount();
        self.resource = Some(next);
        Some((previous, current))
    }

    // ===== per-turn effects =====

    /// Registers an effect that fires at each of this character's turn starts.
    pub fn register_turn_effect(&mut self, effect: TurnEffect) -> Result<(), CharacterError> {
        effect.validate()?;
        if self.is_alive() {
            self.turn_effects.push(effect);
        }
        Ok(())
    }

    /// Fires every registered effect once, newest first, and drops the ones
    /// that expired.
    ///
    /// Iterating from the end keeps indices of not-yet-visited entries stable
    /// while expired entries are removed in place.
    pub fn tick_turn_effects(&mut self) -> Vec<TurnEffectTick> {
        let mut ticks = Vec::with_capacity(self.turn_effects.len());
        if self.is_dead() {
            return ticks;
        }

        for index in (0..self.turn_effects.len()).rev() {
            let effect = self.turn_effects[index];
            let tick = match effect.kind {
                TurnEffectKind::Damage => TurnEffectTick::Damaged {
                    effect,
                    outcome: self.lose_health_if_alive(effect.power),
                },
                TurnEffectKind::Heal => TurnEffectTick::Healed {
                    effect,
                    outcome: self.heal_if_alive(effect.power),
                },
                TurnEffectKind::Guard => TurnEffectTick::Guarded {
                    effect,
                    flipped: self.set_guarded(true),
                },
            };
            ticks.push(tick);

            self.turn_effects[index].elapse();
            if self.turn_effects[index].is_expired() {
                self.turn_effects.remove(index);
            }
        }

        ticks
    }

    /// Drops every registered effect (used when a character leaves combat).
    pub fn clear_turn_effects(&mut self) {
        self.turn_effects.clear();
    }

    fn lose_health_if_alive(&mut self, amount: u32) -> DamageOutcome {
        if self.is_dead() {
            return DamageOutcome::ignored(amount, 0);
        }
        self.lose_health(amount)
    }

    fn heal_if_alive(&mut self, amount: u32) -> HealOutcome {
        let previous = self.current_health();
        if !self.is_dead() {
            self.stats.gain(amount);
        }
        HealOutcome {
            requested: amount,
            previous,
            current: self.current_health(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hero(hp: u32) -> Character {
        Character::new(
            CharacterId::PLAYER,
            "hero",
            Side::Player,
            Stats::new(hp).unwrap(),
        )
    }

    #[test]
    fn damage_then_heal_clamps() {
        let mut c = hero(10);
        let hit = c.take_damage(4).unwrap();
        assert_eq!((hit.previous, hit.current), (10, 6));
        assert_eq!(hit.applied(), 4);

        let healed = c.heal(100).unwrap();
        assert_eq!(healed.current, 10);
        assert_eq!(healed.applied(), 4);
    }

    #[test]
    fn guard_blocks_one_hit_then_clears() {
        let mut c = hero(10);
        assert!(c.set_guarded(true));

        let blocked = c.take_damage(5).unwrap();
        assert!(blocked.blocked);
        assert!(blocked.guard_cleared);
        assert_eq!(c.current_health(), 10);
        assert!(!c.is_guarded());

        let landed = c.take_damage(5).unwrap();
        assert!(!landed.blocked);
        assert_eq!(c.current_health(), 5);
    }

    #[test]
    fn ignoring_guard_always_subtracts_and_keeps_guard() {
        let mut c = hero(10);
        c.set_guarded(true);
        let hit = c.take_damage_ignoring_guard(3).unwrap();
        assert_eq!(hit.current, 7);
        assert!(c.is_guarded());
    }

    #[test]
    fn set_guarded_reports_flip_only() {
        let mut c = hero(10);
        assert!(c.set_guarded(true));
        assert!(!c.set_guarded(true));
        assert!(c.set_guarded(false));
        assert!(!c.set_guarded(false));
    }

    #[test]
    fn died_is_reported_once() {
        let mut c = hero(5);
        assert!(c.take_damage(9).unwrap().died);
        assert_eq!(c.current_health(), 0);
        assert!(c.is_dead());

        let late = c.take_damage(3).unwrap();
        assert!(!late.died);
        assert_eq!(late.applied(), 0);
    }

    #[test]
    fn dead_characters_are_not_healed() {
        let mut c = hero(5);
        c.take_damage(5).unwrap();
        let heal = c.heal(3).unwrap();
        assert_eq!(heal.current, 0);
        assert!(c.is_dead());
        assert!(!c.set_guarded(true));
    }

    #[test]
    fn zero_amounts_are_invalid_arguments() {
        let mut c = hero(5);
        assert!(matches!(
            c.take_damage(0),
            Err(CharacterError::NonPositiveAmount { .. })
        ));
        assert!(c.take_damage_ignoring_guard(0).is_err());
        assert!(c.heal(0).is_err());
    }

    #[test]
    fn resource_spend_is_all_or_nothing() {
        let mut c = hero(5).with_resource(Resource::new("mana", 3, 2).unwrap());
        assert!(!c.spend_resource(3));
        assert_eq!(c.resource().unwrap().current_amount(), 2);
        assert!(c.spend_resource(2));
        assert_eq!(c.resource().unwrap().current_amount(), 0);
        assert_eq!(c.restore_resource(5), Some((0, 3)));
    }

    #[test]
    fn turn_effects_tick_newest_first_and_expire() {
        let mut c = hero(20);
        c.register_turn_effect(TurnEffect::new(TurnEffectKind::Damage, 2, 1))
            .unwrap();
        c.register_turn_effect(TurnEffect::new(TurnEffectKind::Heal, 1, 2))
            .unwrap();
        c.take_damage(5).unwrap();

        let ticks = c.tick_turn_effects();
        assert_eq!(ticks.len(), 2);
        assert!(matches!(ticks[0], TurnEffectTick::Healed { .. }));
        assert!(matches!(ticks[1], TurnEffectTick::Damaged { .. }));
        // 15 + 1 - 2
        assert_eq!(c.current_health(), 14);
        assert_eq!(c.turn_effects().len(), 1);
        assert_eq!(c.turn_effects()[0].kind, TurnEffectKind::Heal);

        c.tick_turn_effects();
        assert!(c.turn_effects().is_empty());
        assert_eq!(c.current_health(), 15);
    }

    #[test]
    fn damage_over_time_bypasses_guard() {
        let mut c = hero(10);
        c.set_guarded(true);
        c.register_turn_effect(TurnEffect::new(TurnEffectKind::Damage, 3, 2))
            .unwrap();
        c.tick_turn_effects();
        assert_eq!(c.current_health(), 7);
        assert!(c.is_guarded());
    }

    #[test]
    fn rejects_degenerate_turn_effects() {
        let mut c = hero(10);
        assert_eq!(
            c.register_turn_effect(TurnEffect::new(TurnEffectKind::Guard, 0, 0)),
            Err(CharacterError::ZeroDuration)
        );
        assert!(
            c.register_turn_effect(TurnEffect::new(TurnEffectKind::Damage, 0, 2))
                .is_err()
        );
        assert!(
            c.register_turn_effect(TurnEffect::new(TurnEffectKind::Guard, 0, 2))
                .is_ok()
        );
    }
}
