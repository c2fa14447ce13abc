//! Data-driven combat content and its loaders.
//!
//! This crate reads static content for the combat engine from RON/TOML data
//! files:
//! - Card catalogs (RON)
//! - Enemy rosters (RON)
//! - Stage lists (RON)
//! - The player loadout (RON)
//! - Combat configuration (TOML)
//!
//! Content is consumed through the oracles of [`battle_core::ContentCatalog`]
//! and never appears in session state. All loaders deserialize battle-core
//! types directly with serde.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    CardLoader, ConfigLoader, ContentFactory, EnemyLoader, LoadResult, LoadedContent,
    PlayerLoader, StageLoader, validate_references,
};
