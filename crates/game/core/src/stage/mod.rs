//! Stage progression through an ordered list of enemies.
//!
//! A stage moves `NotStarted -> InProgress -> Completed`, or to `Failed` from
//! any non-terminal state. The enemy index only grows.
mod error;
mod flow;

pub use error::StageError;
pub use flow::{advance_enemy, start_stage};

use crate::env::EnemyId;

/// Unique identifier of a stage definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StageId(pub u32);

impl core::fmt::Display for StageId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "stage#{}", self.0)
    }
}

/// Static stage content.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StageDefinition {
    pub id: StageId,
    pub name: String,
    /// Enemies in fight order.
    pub enemies: Vec<EnemyId>,
}

impl StageDefinition {
    pub fn new(id: StageId, name: impl Into<String>, enemies: Vec<EnemyId>) -> Self {
        Self {
            id,
            name: name.into(),
            enemies,
        }
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProgressState {
    NotStarted,
    InProgress,
    Completed,
    Failed,
}

impl ProgressState {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// Runtime progress through a [`StageDefinition`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stage {
    id: StageId,
    enemies: Vec<EnemyId>,
    /// Number of enemies advanced to so far.
    index: usize,
    state: ProgressState,
}

impl Stage {
    pub fn new(definition: &StageDefinition) -> Result<Self, StageError> {
        if definition.enemies.is_empty() {
            return Err(StageError::Empty(definition.id));
        }
        Ok(Self {
            id: definition.id,
            enemies: definition.enemies.clone(),
            index: 0,
            state: ProgressState::NotStarted,
        })
    }

    pub fn id(&self) -> StageId {
        self.id
    }

    pub fn state(&self) -> ProgressState {
        self.state
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn enemies(&self) -> &[EnemyId] {
        &self.enemies
    }

    pub fn has_next_enemy(&self) -> bool {
        self.index < self.enemies.len()
    }

    pub fn peek_next_enemy_id(&self) -> Option<EnemyId> {
        self.enemies.get(self.index).copied()
    }

    /// The enemy most recently advanced to.
    pub fn current_enemy_id(&self) -> Option<EnemyId> {
        self.index
            .checked_sub(1)
            .and_then(|i| self.enemies.get(i).copied())
    }

    /// Moves to the next enemy. The first advance starts the stage.
    pub fn advance_to_next_enemy(&mut self) -> Result<EnemyId, StageError> {
        self.ensure_not_terminal()?;
        let next = self.peek_next_enemy_id().ok_or(StageError::NoNextEnemy)?;
        self.index += 1;
        if self.state == ProgressState::NotStarted {
            self.state = ProgressState::InProgress;
        }
        Ok(next)
    }

    /// Marks the stage completed once every enemy has been advanced through.
    pub fn complete(&mut self) -> Result<(), StageError> {
        self.ensure_not_terminal()?;
        if self.index != self.enemies.len() {
            return Err(StageError::IncompleteEnemies {
                advanced: self.index,
                total: self.enemies.len(),
            });
        }
        self.state = ProgressState::Completed;
        Ok(())
    }

    pub fn mark_failed(&mut self) -> Result<(), StageError> {
        self.ensure_not_terminal()?;
        self.state = ProgressState::Failed;
        Ok(())
    }

    /// Re-checks the progress invariants (used after deserialization).
    pub fn validate(&self) -> Result<(), StageError> {
        if self.enemies.is_empty() {
            return Err(StageError::Empty(self.id));
        }
        let consistent = self.index <= self.enemies.len()
            && match self.state {
                ProgressState::NotStarted => self.index == 0,
                ProgressState::InProgress => self.index > 0,
                ProgressState::Completed => self.index == self.enemies.len(),
                ProgressState::Failed => true,
            };
        if !consistent {
            return Err(StageError::InconsistentProgress {
                index: self.index,
                total: self.enemies.len(),
                state: self.state,
            });
        }
        Ok(())
    }

    fn ensure_not_terminal(&self) -> Result<(), StageError> {
        if self.state.is_terminal() {
            return Err(StageError::AlreadyTerminal(self.state));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_enemy_stage() -> Stage {
        Stage::new(&StageDefinition::new(
            StageId(1),
            "forest",
            vec![EnemyId(1), EnemyId(2)],
        ))
        .unwrap()
    }

    #[test]
    fn advancing_starts_then_runs_out() {
        let mut stage = two_enemy_stage();
        assert_eq!(stage.state(), ProgressState::NotStarted);
        assert_eq!(stage.peek_next_enemy_id(), Some(EnemyId(1)));

        assert_eq!(stage.advance_to_next_enemy(), Ok(EnemyId(1)));
        assert_eq!(stage.state(), ProgressState::InProgress);
        assert_eq!(stage.advance_to_next_enemy(), Ok(EnemyId(2)));
        assert_eq!(stage.current_enemy_id(), Some(EnemyId(2)));
        assert!(!stage.has_next_enemy());
        assert_eq!(
            stage.advance_to_next_enemy(),
            Err(StageError::NoNextEnemy)
        );
    }

    #[test]
    fn complete_requires_every_enemy() {
        let mut stage = two_enemy_stage();
        stage.advance_to_next_enemy().unwrap();
        assert_eq!(
            stage.complete(),
            Err(StageError::IncompleteEnemies {
                advanced: 1,
                total: 2
            })
        );
        stage.advance_to_next_enemy().unwrap();
        assert_eq!(stage.complete(), Ok(()));
        assert_eq!(stage.state(), ProgressState::Completed);
        assert_eq!(
            stage.mark_failed(),
            Err(StageError::AlreadyTerminal(ProgressState::Completed))
        );
    }

    #[test]
    fn failed_is_terminal() {
        let mut stage = two_enemy_stage();
        stage.mark_failed().unwrap();
        assert!(stage.advance_to_next_enemy().is_err());
        assert!(stage.complete().is_err());
    }

    #[test]
    fn empty_stage_is_rejected() {
        let def = StageDefinition::new(StageId(9), "void", Vec::new());
        assert_eq!(Stage::new(&def), Err(StageError::Empty(StageId(9))));
    }
}
