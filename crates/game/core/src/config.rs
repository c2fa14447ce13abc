/// Combat configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Maximum number of cards a side can hold in hand.
    pub hand_capacity: u8,

    /// Cards drawn when a character enters combat.
    pub opening_hand: u8,

    /// Cards drawn by the acting side at the start of each of its turns.
    pub cards_per_turn: u8,

    /// Resource restored to the acting character at the start of its turn.
    pub resource_per_turn: u32,

    /// Per-turn effects a character can carry at once. Registrations past
    /// this cap are dropped.
    pub max_turn_effects: u8,
}

impl CombatConfig {
    // ===== compile-time constants =====
    /// Number of wait lanes queued behind each side's battle lane.
    pub const WAIT_LANES: usize = 4;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_HAND_CAPACITY: u8 = 5;
    pub const DEFAULT_OPENING_HAND: u8 = 3;
    pub const DEFAULT_CARDS_PER_TURN: u8 = 1;
    pub const DEFAULT_RESOURCE_PER_TURN: u32 = 1;
    pub const DEFAULT_MAX_TURN_EFFECTS: u8 = 8;

    pub fn new() -> Self {
        Self {
            hand_capacity: Self::DEFAULT_HAND_CAPACITY,
            opening_hand: Self::DEFAULT_OPENING_HAND,
            cards_per_turn: Self::DEFAULT_CARDS_PER_TURN,
            resource_per_turn: Self::DEFAULT_RESOURCE_PER_TURN,
            max_turn_effects: Self::DEFAULT_MAX_TURN_EFFECTS,
        }
    }

    pub fn with_hand_capacity(mut self, hand_capacity: u8) -> Self {
        self.hand_capacity = hand_capacity;
        self
    }

    pub fn with_opening_hand(mut self, opening_hand: u8) -> Self {
        self.opening_hand = opening_hand;
        self
    }

    pub fn with_cards_per_turn(mut self, cards_per_turn: u8) -> Self {
        self.cards_per_turn = cards_per_turn;
        self
    }

    pub fn with_resource_per_turn(mut self, resource_per_turn: u32) -> Self {
        self.resource_per_turn = resource_per_turn;
        self
    }

    pub fn with_max_turn_effects(mut self, max_turn_effects: u8) -> Self {
        self.max_turn_effects = max_turn_effects;
        self
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
