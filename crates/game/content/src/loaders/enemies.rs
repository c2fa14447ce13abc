//! Enemy roster loader.

use std::path::Path;

use battle_core::{CharacterId, EnemyTemplate, Side};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, ensure_unique, read_file};

/// Enemy roster structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyRoster {
    pub enemies: Vec<EnemyTemplate>,
}

/// Loader for enemy templates from RON files.
pub struct EnemyLoader;

impl EnemyLoader {
    /// Load an enemy roster from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<EnemyTemplate>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<EnemyTemplate>> {
        let roster: EnemyRoster = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse enemy roster RON: {}", e))?;

        ensure_unique(&roster.enemies, |enemy| enemy.id, "enemy")?;
        for enemy in &roster.enemies {
            // spawning checks health and the resource pool
            enemy
                .combatant()
                .spawn(CharacterId(0), Side::Enemy)
                .map_err(|e| {
                    anyhow::anyhow!("Invalid enemy {} ('{}'): {}", enemy.id, enemy.name, e)
                })?;
        }
        Ok(roster.enemies)
    }
}
