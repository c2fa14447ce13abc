//! File-based SnapshotRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use battle_core::CombatSnapshot;

use super::{RepositoryError, Result, SnapshotRepository};

/// File-based implementation of SnapshotRepository.
///
/// # File Format
///
/// Snapshots are stored as `snapshot_{turn}.bin` in bincode format. Writes go
/// to a temporary file first and are renamed into place, so a crash never
/// leaves a half-written snapshot behind.
pub struct FileSnapshotRepository {
    base_dir: PathBuf,
}

impl FileSnapshotRepository {
    /// Create a new file-based snapshot repository.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn snapshot_path(&self, turn: u32) -> PathBuf {
        self.base_dir.join(format!("snapshot_{}.bin", turn))
    }
}

impl SnapshotRepository for FileSnapshotRepository {
    fn save(&self, turn: u32, snapshot: &CombatSnapshot) -> Result<()> {
        let path = self.snapshot_path(turn);
        let temp_path = path.with_extension("bin.tmp");

        let bytes = bincode::serialize(snapshot)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!("Saved snapshot[{}] to {}", turn, path.display());
        Ok(())
    }

    fn load(&self, turn: u32) -> Result<Option<CombatSnapshot>> {
        let path = self.snapshot_path(turn);
        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)?;
        let snapshot: CombatSnapshot = bincode::deserialize(&bytes)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        tracing::debug!("Loaded snapshot[{}] from {}", turn, path.display());
        Ok(Some(snapshot))
    }

    fn exists(&self, turn: u32) -> bool {
        self.snapshot_path(turn).exists()
    }

    fn delete(&self, turn: u32) -> Result<()> {
        let path = self.snapshot_path(turn);
        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!("Deleted snapshot[{}]", turn);
        }
        Ok(())
    }

    fn list_turns(&self) -> Result<Vec<u32>> {
        let mut turns = Vec::new();

        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();

            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(turn) = filename
                    .strip_prefix("snapshot_")
                    .and_then(|s| s.strip_suffix(".bin"))
                && let Ok(turn) = turn.parse::<u32>()
            {
                turns.push(turn);
            }
        }

        turns.sort_unstable();
        Ok(turns)
    }
}
