//! Card instances - runtime card state.
//!
//! `CardInstance` represents one copy of a card in a session. It tracks the
//! mutable state (cooldown, slot assignment) while sharing its definition.

use std::sync::Arc;

use crate::character::Side;
use crate::slot::SlotPosition;

use super::definition::{CardDefinition, CardEffect, CardId};

/// Session-unique identifier of a card copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CardInstanceId(pub u32);

impl core::fmt::Display for CardInstanceId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "instance#{}", self.0)
    }
}

/// Why a card could not be committed to a slot.
///
/// These are expected gameplay conditions, not faults; callers typically retry
/// with another card or slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayRejection {
    /// The card still has turns of cooldown left.
    OnCooldown { remaining: u32 },

    /// The caster's pool does not cover the cost.
    InsufficientResource { required: u32, available: u32 },

    /// The card exists but is not in its owner's hand.
    NotInHand,

    /// The requested slot already holds a card.
    SlotOccupied(SlotPosition),

    /// Every wait lane of the side is taken.
    NoFreeLane,
}

/// A copy of a card owned by one side.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardInstance {
    id: CardInstanceId,
    definition: Arc<CardDefinition>,
    current_cooldown: u32,
    hand_slot: Option<SlotPosition>,
    combat_slot: Option<SlotPosition>,
    owner: Side,
    power_bonus: i32,
}

impl CardInstance {
    pub fn new(id: CardInstanceId, definition: Arc<CardDefinition>, owner: Side) -> Self {
        Self {
            id,
            definition,
            current_cooldown: 0,
            hand_slot: None,
            combat_slot: None,
            owner,
            power_bonus: 0,
        }
    }

    pub fn with_power_bonus(mut self, power_bonus: i32) -> Self {
        self.power_bonus = power_bonus;
        self
    }

    pub(crate) fn with_cooldown(mut self, current_cooldown: u32) -> Self {
        self.current_cooldown = current_cooldown;
        self
    }

    pub(crate) fn with_slots(
        mut self,
        hand_slot: Option<SlotPosition>,
        combat_slot: Option<SlotPosition>,
    ) -> Self {
        self.hand_slot = hand_slot;
        self.combat_slot = combat_slot;
        self
    }

    // ===== accessors =====

    pub fn id(&self) -> CardInstanceId {
        self.id
    }

    pub fn card_id(&self) -> CardId {
        self.definition.id
    }

    pub fn definition(&self) -> &Arc<CardDefinition> {
        &self.definition
    }

    pub fn owner(&self) -> Side {
        self.owner
    }

    pub fn current_cooldown(&self) -> u32 {
        self.current_cooldown
    }

    pub fn is_on_cooldown(&self) -> bool {
        self.current_cooldown > 0
    }

    pub fn hand_slot(&self) -> Option<SlotPosition> {
        self.hand_slot
    }

    pub fn combat_slot(&self) -> Option<SlotPosition> {
        self.combat_slot
    }

    pub fn power_bonus(&self) -> i32 {
        self.power_bonus
    }

    /// Sets the balancing adjustment applied by [`Self::effect_power`].
    pub fn set_power_bonus(&mut self, power_bonus: i32) {
        self.power_bonus = power_bonus;
    }

    /// Magnitude of `effect` for this copy, independent of the effect kind.
    pub fn effect_power(&self, effect: &CardEffect) -> u32 {
        let scaled = i64::from(effect.power) + i64::from(self.power_bonus);
        scaled.clamp(0, i64::from(u32::MAX)) as u32
    }

    // ===== lifecycle =====

    /// Checks the play preconditions against the caster's pool.
    pub fn check_playable(&self, available_resource: Option<u32>) -> Result<(), PlayRejection> {
        if self.current_cooldown > 0 {
            return Err(PlayRejection::OnCooldown {
                remaining: self.current_cooldown,
            });
        }
        if let Some(required) = self.definition.cost {
            let available = available_resource.unwrap_or(0);
            if available < required {
                return Err(PlayRejection::InsufficientResource {
                    required,
                    available,
                });
            }
        }
        Ok(())
    }

    /// Moves the card out of hand into `combat_slot` and starts its cooldown.
    ///
    /// Cooldown starts here, when the card leaves the hand, not while it sits
    /// in hand.
    pub(crate) fn play(&mut self, combat_slot: SlotPosition) {
        self.hand_slot = None;
        self.combat_slot = Some(combat_slot);
        self.current_cooldown = self.definition.cooldown;
    }

    /// Moves a resolved card back into a hand slot, keeping its cooldown.
    pub(crate) fn return_to_hand(&mut self, hand_slot: SlotPosition) {
        self.combat_slot = None;
        self.hand_slot = Some(hand_slot);
    }

    pub(crate) fn assign_hand_slot(&mut self, hand_slot: SlotPosition) {
        self.hand_slot = Some(hand_slot);
    }

    pub(crate) fn move_combat_slot(&mut self, combat_slot: SlotPosition) {
        self.combat_slot = Some(combat_slot);
    }

    pub(crate) fn clear_slots(&mut self) {
        self.hand_slot = None;
        self.combat_slot = None;
    }

    /// Decrements the cooldown by one, saturating at zero. Returns whether it
    /// changed.
    pub fn tick_cooldown(&mut self) -> bool {
        if self.current_cooldown == 0 {
            return false;
        }
        self.current_cooldown -= 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::CombatLane;

    fn strike() -> Arc<CardDefinition> {
        Arc::new(
            CardDefinition::new(CardId(7), "strike")
                .with_effect(CardEffect::damage(3))
                .with_cost(2)
                .with_cooldown(2),
        )
    }

    #[test]
    fn play_starts_cooldown_and_leaves_hand() {
        let mut card = CardInstance::new(CardInstanceId(1), strike(), Side::Player);
        card.assign_hand_slot(SlotPosition::hand(Side::Player, 0));
        assert!(card.check_playable(Some(2)).is_ok());

        let battle = SlotPosition::combat(Side::Player, CombatLane::Battle);
        card.play(battle);
        assert_eq!(card.current_cooldown(), 2);
        assert_eq!(card.hand_slot(), None);
        assert_eq!(card.combat_slot(), Some(battle));
        assert_eq!(
            card.check_playable(Some(2)),
            Err(PlayRejection::OnCooldown { remaining: 2 })
        );
    }

    #[test]
    fn cooldown_ticks_down_to_zero() {
        let mut card = CardInstance::new(CardInstanceId(1), strike(), Side::Player).with_cooldown(1);
        assert!(card.tick_cooldown());
        assert!(!card.tick_cooldown());
        assert_eq!(card.current_cooldown(), 0);
    }

    #[test]
    fn cost_requires_resource() {
        let card = CardInstance::new(CardInstanceId(1), strike(), Side::Player);
        assert_eq!(
            card.check_playable(None),
            Err(PlayRejection::InsufficientResource {
                required: 2,
                available: 0
            })
        );
        assert_eq!(
            card.check_playable(Some(1)),
            Err(PlayRejection::InsufficientResource {
                required: 2,
                available: 1
            })
        );
    }

    #[test]
    fn effect_power_applies_bonus_and_floors_at_zero() {
        let mut card = CardInstance::new(CardInstanceId(1), strike(), Side::Enemy);
        let effect = card.definition().effects[0];
        assert_eq!(card.effect_power(&effect), 3);
        card.set_power_bonus(2);
        assert_eq!(card.effect_power(&effect), 5);
        card.set_power_bonus(-10);
        assert_eq!(card.effect_power(&effect), 0);
    }
}
