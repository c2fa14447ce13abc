//! Combat configuration loader.

use std::path::Path;

use battle_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for combat configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<CombatConfig> {
        let config: CombatConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.hand_capacity == 0 {
            anyhow::bail!("hand_capacity must be at least 1");
        }
        if config.opening_hand > config.hand_capacity {
            anyhow::bail!(
                "opening_hand ({}) exceeds hand_capacity ({})",
                config.opening_hand,
                config.hand_capacity
            );
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config = ConfigLoader::parse("hand_capacity = 7\ncards_per_turn = 2\n").unwrap();
        assert_eq!(config.hand_capacity, 7);
        assert_eq!(config.cards_per_turn, 2);
        assert_eq!(config.opening_hand, CombatConfig::DEFAULT_OPENING_HAND);
        assert_eq!(config.max_turn_effects, CombatConfig::DEFAULT_MAX_TURN_EFFECTS);
    }

    #[test]
    fn opening_hand_must_fit() {
        assert!(ConfigLoader::parse("hand_capacity = 2\nopening_hand = 3\n").is_err());
    }
}
