//! Card catalog loader.

use std::path::Path;

use battle_core::CardDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, ensure_unique, read_file};

/// Card catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardCatalog {
    pub cards: Vec<CardDefinition>,
}

/// Loader for card catalogs from RON files.
pub struct CardLoader;

impl CardLoader {
    /// Load a card catalog from a RON file.
    ///
    /// Card ids must be unique and every card needs at least one effect.
    pub fn load(path: &Path) -> LoadResult<Vec<CardDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<CardDefinition>> {
        let catalog: CardCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse card catalog RON: {}", e))?;

        ensure_unique(&catalog.cards, |card| card.id, "card")?;
        if let Some(card) = catalog.cards.iter().find(|card| card.effects.is_empty()) {
            anyhow::bail!("Card {} ('{}') has no effects", card.id, card.name);
        }
        Ok(catalog.cards)
    }
}

#[cfg(test)]
mod tests {
    use battle_core::{CardId, EffectKind, Recipient, TurnEffectKind};

    use super::*;

    #[test]
    fn parses_every_effect_kind() {
        let cards = CardLoader::parse(
            r#"(
                cards: [
                    (
                        id: 1,
                        name: "Strike",
                        effects: [(kind: Damage(ignore_guard: false), power: 5)],
                    ),
                    (
                        id: 2,
                        name: "Rite",
                        description: "Mend now, burn later",
                        cost: Some(2),
                        cooldown: 1,
                        consumable: true,
                        effects: [
                            (order: 1, kind: Heal, power: 3),
                            (kind: Guard),
                            (kind: TurnEffect(kind: Damage, duration: 2, recipient: Target), power: 2),
                        ],
                    ),
                ],
            )"#,
        )
        .unwrap();

        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].id, CardId(1));
        assert_eq!(cards[0].cost, None);

        let rite = &cards[1];
        assert_eq!(rite.cost, Some(2));
        assert!(rite.consumable);
        assert_eq!(rite.effects[1].kind, EffectKind::Guard);
        assert_eq!(rite.effects[1].power, 0);
        assert_eq!(
            rite.effects[2].kind,
            EffectKind::TurnEffect {
                kind: TurnEffectKind::Damage,
                duration: 2,
                recipient: Recipient::Target,
            }
        );
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = CardLoader::parse(
            r#"(cards: [
                (id: 1, name: "a", effects: [(kind: Guard)]),
                (id: 1, name: "b", effects: [(kind: Guard)]),
            ])"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Duplicate card id"));
    }

    #[test]
    fn rejects_cards_without_effects() {
        let err = CardLoader::parse(r#"(cards: [(id: 7, name: "Blank", effects: [])])"#)
            .unwrap_err();
        assert!(err.to_string().contains("no effects"));
    }
}
