//! Repository contract for saving and loading combat snapshots.

use battle_core::CombatSnapshot;

use super::Result;

/// Repository for session snapshot persistence.
///
/// Snapshots are indexed by the turn number they were taken at. Saving the
/// same turn twice overwrites the earlier snapshot.
pub trait SnapshotRepository: Send + Sync {
    /// Save a snapshot taken at `turn`
    fn save(&self, turn: u32, snapshot: &CombatSnapshot) -> Result<()>;

    /// Load the snapshot taken at `turn`
    fn load(&self, turn: u32) -> Result<Option<CombatSnapshot>>;

    /// Check if a snapshot exists
    fn exists(&self, turn: u32) -> bool;

    /// Delete a snapshot
    fn delete(&self, turn: u32) -> Result<()>;

    /// List all saved turns in ascending order
    fn list_turns(&self) -> Result<Vec<u32>>;

    /// Load the snapshot with the highest turn number
    fn latest(&self) -> Result<Option<(u32, CombatSnapshot)>> {
        let Some(turn) = self.list_turns()?.into_iter().max() else {
            return Ok(None);
        };
        Ok(self.load(turn)?.map(|snapshot| (turn, snapshot)))
    }

    /// Delete all snapshots in a range [start, end]
    fn delete_range(&self, start: u32, end: u32) -> Result<usize> {
        let mut deleted = 0;
        for turn in start..=end {
            if self.exists(turn) {
                self.delete(turn)?;
                deleted += 1;
            }
        }
        Ok(deleted)
    }
}
