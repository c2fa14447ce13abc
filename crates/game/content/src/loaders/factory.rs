//! Content factory for building a catalog from data files.

use std::path::{Path, PathBuf};

use battle_core::{
    CardDefinition, CombatConfig, CombatantTemplate, ContentCatalog, EnemyTemplate,
    StageDefinition,
};

use crate::loaders::{
    CardLoader, ConfigLoader, EnemyLoader, LoadResult, PlayerLoader, StageLoader,
    validate_references,
};

/// Everything a session needs from the data directory.
#[derive(Clone, Debug)]
pub struct LoadedContent {
    pub config: CombatConfig,
    pub player: CombatantTemplate,
    pub catalog: ContentCatalog,
}

/// Content factory that loads all combat content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── cards.ron
/// ├── enemies.ron
/// ├── stages.ron
/// └── player.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load combat configuration from `config.toml`.
    ///
    /// A missing file yields the default configuration.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(CombatConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the card catalog from `cards.ron`.
    pub fn load_cards(&self) -> LoadResult<Vec<CardDefinition>> {
        CardLoader::load(&self.data_dir.join("cards.ron"))
    }

    /// Load the enemy roster from `enemies.ron`.
    pub fn load_enemies(&self) -> LoadResult<Vec<EnemyTemplate>> {
        EnemyLoader::load(&self.data_dir.join("enemies.ron"))
    }

    /// Load stage definitions from `stages.ron`.
    pub fn load_stages(&self) -> LoadResult<Vec<StageDefinition>> {
        StageLoader::load(&self.data_dir.join("stages.ron"))
    }

    /// Load the player loadout from `player.ron`.
    pub fn load_player(&self) -> LoadResult<CombatantTemplate> {
        PlayerLoader::load(&self.data_dir.join("player.ron"))
    }

    /// Loads every file and checks cross references between them.
    pub fn load(&self) -> LoadResult<LoadedContent> {
        let config = self.load_config()?;
        let player = self.load_player()?;

        let mut catalog = ContentCatalog::new();
        for card in self.load_cards()? {
            catalog.insert_card(card);
        }
        for enemy in self.load_enemies()? {
            catalog.insert_enemy(enemy);
        }
        for stage in self.load_stages()? {
            catalog.insert_stage(stage);
        }

        validate_references(&catalog, &player).map_err(|e| {
            anyhow::anyhow!("Invalid content in {}: {}", self.data_dir.display(), e)
        })?;

        Ok(LoadedContent {
            config,
            player,
            catalog,
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }
}
