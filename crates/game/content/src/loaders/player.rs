//! Player loadout loader.

use std::path::Path;

use battle_core::{CharacterId, CombatantTemplate, Side};

use crate::loaders::{LoadResult, read_file};

/// Loader for the player's combatant template from a RON file.
pub struct PlayerLoader;

impl PlayerLoader {
    /// Load the player loadout. The deck must not be empty.
    pub fn load(path: &Path) -> LoadResult<CombatantTemplate> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<CombatantTemplate> {
        let template: CombatantTemplate = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse player RON: {}", e))?;

        if template.deck.is_empty() {
            anyhow::bail!("Player '{}' has an empty deck", template.name);
        }
        template
            .spawn(CharacterId::PLAYER, Side::Player)
            .map_err(|e| anyhow::anyhow!("Invalid player '{}': {}", template.name, e))?;
        Ok(template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_loadout() {
        let player = PlayerLoader::parse(
            r#"(
                name: "Warden",
                max_health: 40,
                resource: Some((name: "focus", max_amount: 3)),
                deck: [1, 1, 2],
            )"#,
        )
        .unwrap();
        assert_eq!(player.max_health, 40);
        assert_eq!(player.deck.len(), 3);
    }

    #[test]
    fn rejects_empty_deck() {
        let err = PlayerLoader::parse(r#"(name: "Warden", max_health: 40, deck: [])"#).unwrap_err();
        assert!(err.to_string().contains("empty deck"));
    }
}
