//! Runtime wrapper around static combat content and randomness.
//!
//! [`OracleManager`] shares a loaded [`ContentCatalog`] and an RNG oracle so
//! the session worker can build a [`CombatEnv`] on demand. The data is
//! immutable at runtime; dynamic state lives in the session and repositories.
mod rng;

use std::sync::Arc;

use battle_content::LoadedContent;
use battle_core::{CombatEnv, ContentCatalog, PcgRng, RngOracle};

pub use rng::StdRngOracle;

/// Bundles the content catalog with an RNG oracle.
#[derive(Clone)]
pub struct OracleManager {
    pub(crate) catalog: Arc<ContentCatalog>,
    pub(crate) rng: Arc<dyn RngOracle>,
}

impl OracleManager {
    /// Creates a manager backed by the stateless [`PcgRng`].
    pub fn new(catalog: Arc<ContentCatalog>) -> Self {
        Self {
            catalog,
            rng: Arc::new(PcgRng),
        }
    }

    /// Replaces the RNG oracle.
    pub fn with_rng(mut self, rng: impl RngOracle + 'static) -> Self {
        self.rng = Arc::new(rng);
        self
    }

    /// Converts the manager into the oracle bundle battle-core expects.
    pub fn as_combat_env(&self) -> CombatEnv<'_> {
        CombatEnv::from_catalog(self.catalog.as_ref(), self.rng.as_ref())
    }

    pub fn catalog(&self) -> &ContentCatalog {
        &self.catalog
    }
}

impl From<ContentCatalog> for OracleManager {
    fn from(catalog: ContentCatalog) -> Self {
        Self::new(Arc::new(catalog))
    }
}

impl From<&LoadedContent> for OracleManager {
    fn from(content: &LoadedContent) -> Self {
        Self::new(Arc::new(content.catalog.clone()))
    }
}
