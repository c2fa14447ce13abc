//! Content loaders for reading combat data from files.
//!
//! Each loader turns one RON/TOML file into battle-core content types;
//! [`ContentFactory`] loads a whole data directory into a validated
//! [`battle_core::ContentCatalog`].

pub mod cards;
pub mod config;
pub mod enemies;
pub mod factory;
pub mod player;
pub mod stages;
mod validate;

pub use cards::CardLoader;
pub use config::ConfigLoader;
pub use enemies::EnemyLoader;
pub use factory::{ContentFactory, LoadedContent};
pub use player::PlayerLoader;
pub use stages::StageLoader;
pub use validate::validate_references;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Fails on the first id that appears twice.
pub(crate) fn ensure_unique<T, K>(
    items: &[T],
    key: impl Fn(&T) -> K,
    what: &str,
) -> LoadResult<()>
where
    K: Ord + std::fmt::Display,
{
    let mut seen = std::collections::BTreeSet::new();
    for item in items {
        let id = key(item);
        if seen.contains(&id) {
            anyhow::bail!("Duplicate {} id {}", what, id);
        }
        seen.insert(id);
    }
    Ok(())
}
