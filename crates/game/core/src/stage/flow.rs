//! Stage use cases driven by the session.

use crate::env::EnemyId;

use super::{ProgressState, Stage, StageError};

/// Starts a fresh stage and returns the first enemy to spawn.
pub fn start_stage(stage: &mut Stage) -> Result<EnemyId, StageError> {
    if stage.state() != ProgressState::NotStarted {
        return Err(StageError::AlreadyStarted);
    }
    stage.advance_to_next_enemy()
}

/// Moves past a defeated enemy.
///
/// Returns the next enemy to spawn, or `None` after completing the stage
/// because no enemy remains.
pub fn advance_enemy(stage: &mut Stage) -> Result<Option<EnemyId>, StageError> {
    if stage.has_next_enemy() {
        return stage.advance_to_next_enemy().map(Some);
    }
    stage.complete()?;
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::{StageDefinition, StageId};

    #[test]
    fn two_enemies_then_completed() {
        let def = StageDefinition::new(StageId(1), "crypt", vec![EnemyId(10), EnemyId(20)]);
        let mut stage = Stage::new(&def).unwrap();

        assert_eq!(start_stage(&mut stage), Ok(EnemyId(10)));
        assert_eq!(stage.state(), ProgressState::InProgress);

        assert_eq!(advance_enemy(&mut stage), Ok(Some(EnemyId(20))));
        assert_eq!(stage.state(), ProgressState::InProgress);

        assert_eq!(advance_enemy(&mut stage), Ok(None));
        assert_eq!(stage.state(), ProgressState::Completed);

        assert_eq!(
            advance_enemy(&mut stage),
            Err(StageError::AlreadyTerminal(ProgressState::Completed))
        );
    }

    #[test]
    fn starting_twice_is_rejected() {
        let def = StageDefinition::new(StageId(1), "crypt", vec![EnemyId(10)]);
        let mut stage = Stage::new(&def).unwrap();
        start_stage(&mut stage).unwrap();
        assert_eq!(start_stage(&mut stage), Err(StageError::AlreadyStarted));
    }
}
