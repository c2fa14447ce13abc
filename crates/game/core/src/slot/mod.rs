//! Positional storage for hand cards, combat lanes and character placement.
//!
//! The registry stores at most one occupant per position. It does not enforce
//! that a card id appears in a single slot; [`crate::CombatSession`] checks
//! [`SlotRegistry::find_card`] before every `set_slot`.
mod error;

pub use error::SlotError;

use std::collections::BTreeMap;

use crate::card::CardInstanceId;
use crate::character::{CharacterId, Side};
use crate::config::CombatConfig;

/// One of the five combat positions of a side.
///
/// Cards wait in `Wait4..Wait1` and step one lane closer to `Battle` after
/// every resolution. Only the battle lane resolves.
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
pub enum CombatLane {
    Battle,
    Wait1,
    Wait2,
    Wait3,
    Wait4,
}

impl CombatLane {
    /// Wait lanes from closest to farthest from battle.
    pub const WAIT_LANES: [Self; CombatConfig::WAIT_LANES] =
        [Self::Wait1, Self::Wait2, Self::Wait3, Self::Wait4];

    /// Maps `1..=4` to the matching wait lane.
    pub fn wait(index: u8) -> Result<Self, SlotError> {
        match index {
            1 => Ok(Self::Wait1),
            2 => Ok(Self::Wait2),
            3 => Ok(Self::Wait3),
            4 => Ok(Self::Wait4),
            _ => Err(SlotError::WaitLaneOutOfRange(index)),
        }
    }

    pub const fn is_battle(self) -> bool {
        matches!(self, Self::Battle)
    }

    /// The lane one step closer to battle, `None` for the battle lane.
    pub const fn toward_battle(self) -> Option<Self> {
        match self {
            Self::Battle => None,
            Self::Wait1 => Some(Self::Battle),
            Self::Wait2 => Some(Self::Wait1),
            Self::Wait3 => Some(Self::Wait2),
            Self::Wait4 => Some(Self::Wait3),
        }
    }
}

/// Address of a slot. Ordering is the iteration order of the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SlotPosition {
    /// Character placement of a side.
    Character { side: Side },
    /// A combat lane of a side.
    Combat { side: Side, lane: CombatLane },
    /// A hand slot of a side, `index < hand_capacity`.
    Hand { side: Side, index: u8 },
}

impl SlotPosition {
    pub const fn hand(side: Side, index: u8) -> Self {
        Self::Hand { side, index }
    }

    pub const fn combat(side: Side, lane: CombatLane) -> Self {
        Self::Combat { side, lane }
    }

    pub const fn battle(side: Side) -> Self {
        Self::Combat {
            side,
            lane: CombatLane::Battle,
        }
    }

    pub const fn character(side: Side) -> Self {
        Self::Character { side }
    }

    pub const fn side(&self) -> Side {
        match *self {
            Self::Character { side } | Self::Combat { side, .. } | Self::Hand { side, .. } => side,
        }
    }

    pub const fn lane(&self) -> Option<CombatLane> {
        match *self {
            Self::Combat { lane, .. } => Some(lane),
            _ => None,
        }
    }
}

impl core::fmt::Display for SlotPosition {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Character { side } => write!(f, "{side}/character"),
            Self::Combat { side, lane } => write!(f, "{side}/{lane}"),
            Self::Hand { side, index } => write!(f, "{side}/hand[{index}]"),
        }
    }
}

/// What a slot holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SlotOccupant {
    Card(CardInstanceId),
    Character(CharacterId),
}

/// Value stored at a slot position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatSlot {
    pub position: SlotPosition,
    pub occupant: Option<SlotOccupant>,
    pub owner: Option<Side>,
}

impl CombatSlot {
    pub const fn empty(position: SlotPosition) -> Self {
        Self {
            position,
            occupant: None,
            owner: None,
        }
    }

    pub const fn with_card(position: SlotPosition, card: CardInstanceId, owner: Side) -> Self {
        Self {
            position,
            occupant: Some(SlotOccupant::Card(card)),
            owner: Some(owner),
        }
    }

    pub const fn with_character(position: SlotPosition, character: CharacterId) -> Self {
        Self {
            position,
            occupant: Some(SlotOccupant::Character(character)),
            owner: Some(position.side()),
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }

    pub fn card(&self) -> Option<CardInstanceId> {
        match self.occupant {
            Some(SlotOccupant::Card(id)) => Some(id),
            _ => None,
        }
    }
}

/// Sparse map from position to slot value. Unset positions read as empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotRegistry {
    hand_capacity: u8,
    slots: BTreeMap<SlotPosition, CombatSlot>,
}

impl SlotRegistry {
    pub fn new(hand_capacity: u8) -> Self {
        Self {
            hand_capacity,
            slots: BTreeMap::new(),
        }
    }

    pub fn hand_capacity(&self) -> u8 {
        self.hand_capacity
    }

    /// Returns the stored slot, or an empty slot for positions never set.
    pub fn get_slot(&self, position: SlotPosition) -> CombatSlot {
        self.slots
            .get(&position)
            .copied()
            .unwrap_or(CombatSlot::empty(position))
    }

    pub fn is_occupied(&self, position: SlotPosition) -> bool {
        self.slots.contains_key(&position)
    }

    /// Overwrites the slot at `slot.position`.
    ///
    /// # Errors
    ///
    /// Fails when the owner disagrees with the side of the position or a hand
    /// index is past capacity.
    pub fn set_slot(&mut self, slot: CombatSlot) -> Result<(), SlotError> {
        self.check_position(slot.position)?;
        if let Some(owner) = slot.owner
            && owner != slot.position.side()
        {
            return Err(SlotError::OwnerMismatch {
                position: slot.position,
                owner,
            });
        }

        if slot.is_empty() {
            self.slots.remove(&slot.position);
        } else {
            self.slots.insert(slot.position, slot);
        }
        Ok(())
    }

    /// Empties a position, returning what it held.
    pub fn clear_slot(&mut self, position: SlotPosition) -> Option<CombatSlot> {
        self.slots.remove(&position)
    }

    /// Empties every hand and combat slot of `side`. Character placement is
    /// kept. Returns the cleared slots in position order.
    pub fn clear_side(&mut self, side: Side) -> Vec<CombatSlot> {
        let positions: Vec<_> = self
            .slots
            .keys()
            .filter(|position| {
                position.side() == side && !matches!(position, SlotPosition::Character { .. })
            })
            .copied()
            .collect();
        positions
            .into_iter()
            .filter_map(|position| self.slots.remove(&position))
            .collect()
    }

    pub fn clear_all_slots(&mut self) {
        self.slots.clear();
    }

    /// Position of the slot holding `card`, if any.
    pub fn find_card(&self, card: CardInstanceId) -> Option<SlotPosition> {
        self.slots
            .values()
            .find(|slot| slot.card() == Some(card))
            .map(|slot| slot.position)
    }

    /// Occupied slots in position order.
    pub fn iter(&self) -> impl Iterator<Item = &CombatSlot> {
        self.slots.values()
    }

    /// Lowest free hand index of `side`, `None` when the hand is full.
    pub fn first_free_hand_index(&self, side: Side) -> Option<u8> {
        (0..self.hand_capacity).find(|&index| !self.is_occupied(SlotPosition::hand(side, index)))
    }

    /// Closest free wait lane of `side`.
    pub fn first_free_wait_lane(&self, side: Side) -> Option<CombatLane> {
        CombatLane::WAIT_LANES
            .into_iter()
            .find(|&lane| !self.is_occupied(SlotPosition::combat(side, lane)))
    }

    fn check_position(&self, position: SlotPosition) -> Result<(), SlotError> {
        if let SlotPosition::Hand { index, .. } = position
            && index >= self.hand_capacity
        {
            return Err(SlotError::HandIndexOutOfRange {
                index,
                capacity: self.hand_capacity,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_positions_read_as_empty() {
        let registry = SlotRegistry::new(5);
        let position = SlotPosition::battle(Side::Enemy);
        assert_eq!(registry.get_slot(position), CombatSlot::empty(position));
    }

    #[test]
    fn set_then_clear_all() {
        let mut registry = SlotRegistry::new(5);
        let position = SlotPosition::combat(Side::Player, CombatLane::Wait2);
        registry
            .set_slot(CombatSlot::with_card(position, CardInstanceId(3), Side::Player))
            .unwrap();
        assert_eq!(registry.get_slot(position).card(), Some(CardInstanceId(3)));
        assert_eq!(registry.find_card(CardInstanceId(3)), Some(position));

        registry.clear_all_slots();
        assert!(registry.get_slot(position).is_empty());
        assert_eq!(registry.find_card(CardInstanceId(3)), None);
    }

    #[test]
    fn owner_must_match_position_side() {
        let mut registry = SlotRegistry::new(5);
        let position = SlotPosition::battle(Side::Player);
        let err = registry
            .set_slot(CombatSlot::with_card(position, CardInstanceId(1), Side::Enemy))
            .unwrap_err();
        assert!(matches!(err, SlotError::OwnerMismatch { .. }));
    }

    #[test]
    fn hand_index_is_bounded() {
        let mut registry = SlotRegistry::new(2);
        let err = registry
            .set_slot(CombatSlot::with_card(
                SlotPosition::hand(Side::Player, 2),
                CardInstanceId(1),
                Side::Player,
            ))
            .unwrap_err();
        assert_eq!(
            err,
            SlotError::HandIndexOutOfRange {
                index: 2,
                capacity: 2
            }
        );
    }

    #[test]
    fn clear_side_keeps_character_and_other_side() {
        let mut registry = SlotRegistry::new(5);
        registry
            .set_slot(CombatSlot::with_character(
                SlotPosition::character(Side::Enemy),
                CharacterId(1),
            ))
            .unwrap();
        registry
            .set_slot(CombatSlot::with_card(
                SlotPosition::battle(Side::Enemy),
                CardInstanceId(1),
                Side::Enemy,
            ))
            .unwrap();
        registry
            .set_slot(CombatSlot::with_card(
                SlotPosition::hand(Side::Enemy, 0),
                CardInstanceId(2),
                Side::Enemy,
            ))
            .unwrap();
        registry
            .set_slot(CombatSlot::with_card(
                SlotPosition::battle(Side::Player),
                CardInstanceId(3),
                Side::Player,
            ))
            .unwrap();

        let cleared = registry.clear_side(Side::Enemy);
        assert_eq!(cleared.len(), 2);
        assert!(registry.is_occupied(SlotPosition::character(Side::Enemy)));
        assert!(registry.is_occupied(SlotPosition::battle(Side::Player)));
    }

    #[test]
    fn free_lane_and_hand_lookup() {
        let mut registry = SlotRegistry::new(2);
        assert_eq!(
            registry.first_free_wait_lane(Side::Enemy),
            Some(CombatLane::Wait1)
        );
        registry
            .set_slot(CombatSlot::with_card(
                SlotPosition::combat(Side::Enemy, CombatLane::Wait1),
                CardInstanceId(1),
                Side::Enemy,
            ))
            .unwrap();
        assert_eq!(
            registry.first_free_wait_lane(Side::Enemy),
            Some(CombatLane::Wait2)
        );

        registry
            .set_slot(CombatSlot::with_card(
                SlotPosition::hand(Side::Player, 0),
                CardInstanceId(2),
                Side::Player,
            ))
            .unwrap();
        assert_eq!(registry.first_free_hand_index(Side::Player), Some(1));
    }

    #[test]
    fn wait_lane_index_is_validated() {
        assert_eq!(CombatLane::wait(4), Ok(CombatLane::Wait4));
        assert_eq!(CombatLane::wait(0), Err(SlotError::WaitLaneOutOfRange(0)));
        assert_eq!(CombatLane::wait(7), Err(SlotError::WaitLaneOutOfRange(7)));
    }
}
