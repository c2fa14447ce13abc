//! Cross-file reference checks.

use battle_core::{CardId, CombatantTemplate, ContentCatalog};

use crate::loaders::LoadResult;

/// Checks that every deck card and every stage enemy resolves in `catalog`.
pub fn validate_references(
    catalog: &ContentCatalog,
    player: &CombatantTemplate,
) -> LoadResult<()> {
    check_deck(catalog, &player.name, player.deck.iter().copied())?;

    for enemy in catalog.enemies() {
        check_deck(catalog, &enemy.name, enemy.deck.iter().copied())?;
    }

    for stage in catalog.stages() {
        for &enemy in &stage.enemies {
            if !catalog.contains_enemy(enemy) {
                anyhow::bail!("Stage '{}' references unknown {}", stage.name, enemy);
            }
        }
    }
    Ok(())
}

fn check_deck(
    catalog: &ContentCatalog,
    owner: &str,
    deck: impl Iterator<Item = CardId>,
) -> LoadResult<()> {
    for card in deck {
        if !catalog.contains_card(card) {
            anyhow::bail!("Deck of '{}' references unknown {}", owner, card);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use battle_core::{CardDefinition, CardEffect, EnemyId, EnemyTemplate, StageDefinition, StageId};

    use super::*;

    fn catalog() -> ContentCatalog {
        ContentCatalog::new()
            .with_card(CardDefinition::new(CardId(1), "Strike").with_effect(CardEffect::damage(3)))
            .with_enemy(EnemyTemplate::new(
                EnemyId(10),
                CombatantTemplate::new("Rat", 5).with_deck(vec![CardId(1)]),
            ))
    }

    #[test]
    fn accepts_consistent_content() {
        let catalog =
            catalog().with_stage(StageDefinition::new(StageId(1), "Sewer", vec![EnemyId(10)]));
        let player = CombatantTemplate::new("Hero", 20).with_deck(vec![CardId(1)]);
        assert!(validate_references(&catalog, &player).is_ok());
    }

    #[test]
    fn reports_unknown_player_card() {
        let player = CombatantTemplate::new("Hero", 20).with_deck(vec![CardId(9)]);
        let err = validate_references(&catalog(), &player).unwrap_err();
        assert!(err.to_string().contains("card#9"));
    }

    #[test]
    fn reports_unknown_stage_enemy() {
        let catalog =
            catalog().with_stage(StageDefinition::new(StageId(1), "Sewer", vec![EnemyId(99)]));
        let player = CombatantTemplate::new("Hero", 20).with_deck(vec![CardId(1)]);
        let err = validate_references(&catalog, &player).unwrap_err();
        assert!(err.to_string().contains("enemy#99"));
    }
}
