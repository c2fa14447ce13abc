//! Traits describing read-only combat content and randomness.
//!
//! Oracles expose card definitions, enemy templates, stage definitions and
//! the RNG. The [`Env`] aggregate bundles them so the session can access
//! everything it needs without hard coupling to concrete implementations.
mod cards;
mod catalog;
mod enemies;
mod error;
mod rng;
mod stages;

pub use cards::CardOracle;
pub use catalog::ContentCatalog;
pub use enemies::{CombatantTemplate, EnemyId, EnemyOracle, EnemyTemplate, ResourceSpec};
pub use error::OracleError;
pub use rng::{PcgRng, RngOracle, RngState, compute_seed};
pub use stages::StageOracle;

/// Aggregates the read-only oracles required by the session.
pub struct Env<'a, C, E, S, R>
where
    C: CardOracle + ?Sized,
    E: EnemyOracle + ?Sized,
    S: StageOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    cards: Option<&'a C>,
    enemies: Option<&'a E>,
    stages: Option<&'a S>,
    rng: Option<&'a R>,
}

// Manual impls: the derives would require `C: Clone` etc., which trait
// objects never satisfy.
impl<C, E, S, R> Clone for Env<'_, C, E, S, R>
where
    C: CardOracle + ?Sized,
    E: EnemyOracle + ?Sized,
    S: StageOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<C, E, S, R> Copy for Env<'_, C, E, S, R>
where
    C: CardOracle + ?Sized,
    E: EnemyOracle + ?Sized,
    S: StageOracle + ?Sized,
    R: RngOracle + ?Sized,
{
}

pub type CombatEnv<'a> = Env<
    'a,
    dyn CardOracle + 'a,
    dyn EnemyOracle + 'a,
    dyn StageOracle + 'a,
    dyn RngOracle + 'a,
>;

impl<'a, C, E, S, R> Env<'a, C, E, S, R>
where
    C: CardOracle + ?Sized,
    E: EnemyOracle + ?Sized,
    S: StageOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    pub fn new(
        cards: Option<&'a C>,
        enemies: Option<&'a E>,
        stages: Option<&'a S>,
        rng: Option<&'a R>,
    ) -> Self {
        Self {
            cards,
            enemies,
            stages,
            rng,
        }
    }

    pub fn with_all(cards: &'a C, enemies: &'a E, stages: &'a S, rng: &'a R) -> Self {
        Self::new(Some(cards), Some(enemies), Some(stages), Some(rng))
    }

    pub fn empty() -> Self {
        Self {
            cards: None,
            enemies: None,
            stages: None,
            rng: None,
        }
    }

    /// Returns the CardOracle, or an error if not available.
    pub fn cards(&self) -> Result<&'a C, OracleError> {
        self.cards.ok_or(OracleError::CardsNotAvailable)
    }

    /// Returns the EnemyOracle, or an error if not available.
    pub fn enemies(&self) -> Result<&'a E, OracleError> {
        self.enemies.ok_or(OracleError::EnemiesNotAvailable)
    }

    /// Returns the StageOracle, or an error if not available.
    pub fn stages(&self) -> Result<&'a S, OracleError> {
        self.stages.ok_or(OracleError::StagesNotAvailable)
    }

    /// Returns the RngOracle, or an error if not available.
    pub fn rng(&self) -> Result<&'a R, OracleError> {
        self.rng.ok_or(OracleError::RngNotAvailable)
    }
}

impl<'a, C, E, S, R> Env<'a, C, E, S, R>
where
    C: CardOracle + 'a,
    E: EnemyOracle + 'a,
    S: StageOracle + 'a,
    R: RngOracle + 'a,
{
    /// Converts this environment into a trait-object based `CombatEnv` (consumes self).
    pub fn into_combat_env(self) -> CombatEnv<'a> {
        self.as_combat_env()
    }

    /// Converts this environment into a trait-object based `CombatEnv` (borrows self).
    pub fn as_combat_env(&self) -> CombatEnv<'a> {
        let cards: Option<&'a dyn CardOracle> = self.cards.map(|cards| cards as _);
        let enemies: Option<&'a dyn EnemyOracle> = self.enemies.map(|enemies| enemies as _);
        let stages: Option<&'a dyn StageOracle> = self.stages.map(|stages| stages as _);
        let rng: Option<&'a dyn RngOracle> = self.rng.map(|rng| rng as _);
        Env::new(cards, enemies, stages, rng)
    }
}

impl<'a> CombatEnv<'a> {
    /// Bundles a catalog that serves every content oracle with an RNG.
    pub fn from_catalog(catalog: &'a ContentCatalog, rng: &'a dyn RngOracle) -> Self {
        let cards: &'a dyn CardOracle = catalog;
        let enemies: &'a dyn EnemyOracle = catalog;
        let stages: &'a dyn StageOracle = catalog;
        Env::with_all(cards, enemies, stages, rng)
    }
}
