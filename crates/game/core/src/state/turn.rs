//! Turn history, per-turn bookkeeping and the combat phase machine.

use crate::character::Side;

/// Combat phases.
///
/// ```text
/// None -> Preparation -> PlayerTurn <-> EnemyTurn
/// PlayerTurn | EnemyTurn -> Resolution -> PlayerTurn | EnemyTurn
/// PlayerTurn | EnemyTurn | Resolution -> Victory | Defeat -> Ended
/// Preparation | PlayerTurn | EnemyTurn | Resolution <-> Paused
/// ```
///
/// A running session can also be abandoned straight to `Ended`.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatPhase {
    #[default]
    None,
    Preparation,
    PlayerTurn,
    EnemyTurn,
    Resolution,
    Victory,
    Defeat,
    Ended,
    Paused,
}

impl CombatPhase {
    /// The phase a turn of `side` runs in.
    pub const fn turn_of(side: Side) -> Self {
        match side {
            Side::Player => Self::PlayerTurn,
            Side::Enemy => Self::EnemyTurn,
        }
    }

    /// No further turns can start.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Victory | Self::Defeat | Self::Ended)
    }

    /// Phases that may be paused and resumed.
    pub const fn is_pausable(self) -> bool {
        matches!(
            self,
            Self::Preparation | Self::PlayerTurn | Self::EnemyTurn | Self::Resolution
        )
    }

    /// Whether the machine allows `self -> next`. Resuming from `Paused` is
    /// checked against the phase it was paused from.
    pub fn can_transition_to(self, next: Self) -> bool {
        use CombatPhase::*;
        match (self, next) {
            (None, Preparation) => true,
            (Preparation, PlayerTurn | EnemyTurn) => true,
            (PlayerTurn, EnemyTurn) | (EnemyTurn, PlayerTurn) => true,
            (PlayerTurn | EnemyTurn, Resolution) => true,
            (Resolution, PlayerTurn | EnemyTurn) => true,
            (PlayerTurn | EnemyTurn | Resolution, Victory | Defeat) => true,
            (Victory | Defeat, Ended) => true,
            (from, Paused) => from.is_pausable(),
            (from, Ended) => from.is_pausable() || from == Paused,
            (Paused, to) => to.is_pausable(),
            _ => false,
        }
    }
}

/// One numbered unit of combat progression.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Turn {
    number: u32,
    side: Side,
    phase: CombatPhase,
    completed: bool,
}

impl Turn {
    pub(crate) fn new(number: u32, side: Side, phase: CombatPhase) -> Self {
        Self {
            number,
            side,
            phase,
            completed: false,
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// Phase the turn was created in.
    pub fn phase(&self) -> CombatPhase {
        self.phase
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// One-way completion. Returns `false` if already completed.
    pub(crate) fn complete(&mut self) -> bool {
        !std::mem::replace(&mut self.completed, true)
    }
}

/// Flags scoped to the current turn.
///
/// Reset exactly once when a turn starts. Every `mark_*` returns `true` only
/// the first time it is called within a turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnContext {
    was_enemy_defeated: bool,
    were_hand_cards_vanished: bool,
    effects_ticked: bool,
    player_guard_registered: bool,
    resolution_started: bool,
}

impl TurnContext {
    pub fn was_enemy_defeated(&self) -> bool {
        self.was_enemy_defeated
    }

    pub fn were_hand_cards_vanished(&self) -> bool {
        self.were_hand_cards_vanished
    }

    pub fn effects_ticked(&self) -> bool {
        self.effects_ticked
    }

    pub fn player_guard_registered(&self) -> bool {
        self.player_guard_registered
    }

    pub fn resolution_started(&self) -> bool {
        self.resolution_started
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn mark_enemy_defeated(&mut self) -> bool {
        set_once(&mut self.was_enemy_defeated)
    }

    pub(crate) fn mark_hand_cards_vanished(&mut self) -> bool {
        set_once(&mut self.were_hand_cards_vanished)
    }

    pub(crate) fn mark_effects_ticked(&mut self) -> bool {
        set_once(&mut self.effects_ticked)
    }

    pub(crate) fn mark_player_guard_registered(&mut self) -> bool {
        set_once(&mut self.player_guard_registered)
    }

    pub(crate) fn mark_resolution_started(&mut self) -> bool {
        set_once(&mut self.resolution_started)
    }
}

fn set_once(flag: &mut bool) -> bool {
    !std::mem::replace(flag, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_machine_edges() {
        use CombatPhase::*;
        assert!(None.can_transition_to(Preparation));
        assert!(!None.can_transition_to(PlayerTurn));
        assert!(Preparation.can_transition_to(EnemyTurn));
        assert!(PlayerTurn.can_transition_to(EnemyTurn));
        assert!(!PlayerTurn.can_transition_to(PlayerTurn));
        assert!(Resolution.can_transition_to(PlayerTurn));
        assert!(EnemyTurn.can_transition_to(Defeat));
        assert!(!Preparation.can_transition_to(Victory));
        assert!(Victory.can_transition_to(Ended));
        assert!(!Victory.can_transition_to(PlayerTurn));
        assert!(!Ended.can_transition_to(Preparation));
        assert!(Resolution.can_transition_to(Paused));
        assert!(!Victory.can_transition_to(Paused));
        assert!(Paused.can_transition_to(Ended));
    }

    #[test]
    fn context_flags_set_once_until_reset() {
        let mut ctx = TurnContext::default();
        assert!(ctx.mark_enemy_defeated());
        assert!(!ctx.mark_enemy_defeated());
        assert!(ctx.was_enemy_defeated());

        ctx.reset();
        assert!(!ctx.was_enemy_defeated());
        assert!(ctx.mark_enemy_defeated());
    }

    #[test]
    fn turn_completion_is_one_way() {
        let mut turn = Turn::new(1, Side::Player, CombatPhase::Preparation);
        assert!(turn.complete());
        assert!(!turn.complete());
        assert!(turn.is_completed());
    }
}
