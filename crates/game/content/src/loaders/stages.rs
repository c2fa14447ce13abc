//! Stage list loader.

use std::path::Path;

use battle_core::{Stage, StageDefinition};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, ensure_unique, read_file};

/// Stage list structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageList {
    pub stages: Vec<StageDefinition>,
}

/// Loader for stage definitions from RON files.
pub struct StageLoader;

impl StageLoader {
    /// Load stage definitions from a RON file. Every stage needs an enemy.
    pub fn load(path: &Path) -> LoadResult<Vec<StageDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<StageDefinition>> {
        let list: StageList = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse stage list RON: {}", e))?;

        ensure_unique(&list.stages, |stage| stage.id, "stage")?;
        for stage in &list.stages {
            Stage::new(stage)
                .map_err(|e| anyhow::anyhow!("Invalid stage '{}': {}", stage.name, e))?;
        }
        Ok(list.stages)
    }
}

#[cfg(test)]
mod tests {
    use battle_core::{EnemyId, StageId};

    use super::*;

    #[test]
    fn parses_enemy_order() {
        let stages = StageLoader::parse(
            r#"(stages: [(id: 1, name: "Sewer", enemies: [10, 20, 10])])"#,
        )
        .unwrap();
        assert_eq!(stages[0].id, StageId(1));
        assert_eq!(
            stages[0].enemies,
            vec![EnemyId(10), EnemyId(20), EnemyId(10)]
        );
    }

    #[test]
    fn rejects_empty_stage() {
        assert!(StageLoader::parse(r#"(stages: [(id: 1, name: "Void", enemies: [])])"#).is_err());
    }
}
