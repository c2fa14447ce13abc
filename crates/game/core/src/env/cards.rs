use std::sync::Arc;

use crate::card::{CardDefinition, CardId};

/// Read-only card catalog.
///
/// Definitions are handed out as `Arc` so every instance of a card shares one
/// allocation.
pub trait CardOracle: Send + Sync {
    fn card(&self, id: CardId) -> Option<Arc<CardDefinition>>;
}
