//! In-memory SnapshotRepository implementation for tests and local runs.

use std::collections::BTreeMap;
use std::sync::RwLock;

use battle_core::CombatSnapshot;

use super::{RepositoryError, Result, SnapshotRepository};

/// In-memory implementation of SnapshotRepository.
#[derive(Default)]
pub struct InMemorySnapshotRepository {
    snapshots: RwLock<BTreeMap<u32, CombatSnapshot>>,
}

impl InMemorySnapshotRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotRepository for InMemorySnapshotRepository {
    fn save(&self, turn: u32, snapshot: &CombatSnapshot) -> Result<()> {
        let mut snapshots = self
            .snapshots
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        snapshots.insert(turn, snapshot.clone());
        Ok(())
    }

    fn load(&self, turn: u32) -> Result<Option<CombatSnapshot>> {
        let snapshots = self
            .snapshots
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(snapshots.get(&turn).cloned())
    }

    fn exists(&self, turn: u32) -> bool {
        self.snapshots
            .read()
            .map(|snapshots| snapshots.contains_key(&turn))
            .unwrap_or(false)
    }

    fn delete(&self, turn: u32) -> Result<()> {
        let mut snapshots = self
            .snapshots
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        snapshots.remove(&turn);
        Ok(())
    }

    fn list_turns(&self) -> Result<Vec<u32>> {
        let snapshots = self
            .snapshots
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(snapshots.keys().copied().collect())
    }
}
