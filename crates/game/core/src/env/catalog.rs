//! In-memory content catalog implementing every content oracle.
//!
//! The content loader fills one of these from data files; tests build them
//! directly.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::card::{CardDefinition, CardId};
use crate::stage::{StageDefinition, StageId};

use super::{CardOracle, EnemyId, EnemyOracle, EnemyTemplate, StageOracle};

// ============================================================================
// Catalog
// ============================================================================

/// Cards, enemies and stages keyed by id.
#[derive(Clone, Debug, Default)]
pub struct ContentCatalog {
    cards: BTreeMap<CardId, Arc<CardDefinition>>,
    enemies: BTreeMap<EnemyId, EnemyTemplate>,
    stages: BTreeMap<StageId, StageDefinition>,
}

impl ContentCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_card(mut self, card: CardDefinition) -> Self {
        self.insert_card(card);
        self
    }

    pub fn with_enemy(mut self, enemy: EnemyTemplate) -> Self {
        self.insert_enemy(enemy);
        self
    }

    pub fn with_stage(mut self, stage: StageDefinition) -> Self {
        self.insert_stage(stage);
        self
    }

    /// Inserts a card, returning the definition it replaced.
    pub fn insert_card(&mut self, card: CardDefinition) -> Option<Arc<CardDefinition>> {
        self.cards.insert(card.id, Arc::new(card))
    }

    pub fn insert_enemy(&mut self, enemy: EnemyTemplate) -> Option<EnemyTemplate> {
        self.enemies.insert(enemy.id, enemy)
    }

    pub fn insert_stage(&mut self, stage: StageDefinition) -> Option<StageDefinition> {
        self.stages.insert(stage.id, stage)
    }

    pub fn cards(&self) -> impl Iterator<Item = &Arc<CardDefinition>> {
        self.cards.values()
    }

    pub fn enemies(&self) -> impl Iterator<Item = &EnemyTemplate> {
        self.enemies.values()
    }

    pub fn stages(&self) -> impl Iterator<Item = &StageDefinition> {
        self.stages.values()
    }

    pub fn contains_card(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    pub fn contains_enemy(&self, id: EnemyId) -> bool {
        self.enemies.contains_key(&id)
    }
}

// ============================================================================
// Oracle implementations
// ============================================================================

impl CardOracle for ContentCatalog {
    fn card(&self, id: CardId) -> Option<Arc<CardDefinition>> {
        self.cards.get(&id).cloned()
    }
}

impl EnemyOracle for ContentCatalog {
    fn enemy(&self, id: EnemyId) -> Option<EnemyTemplate> {
        self.enemies.get(&id).cloned()
    }
}

impl StageOracle for ContentCatalog {
    fn stage(&self, id: StageId) -> Option<StageDefinition> {
        self.stages.get(&id).cloned()
    }
}
