//! Repository layer for dynamic runtime data
//!
//! Repositories handle data that CHANGES during combat: session snapshots for
//! save/load. Static content (cards, enemies, stages) is handled by Oracles,
//! not Repositories.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileSnapshotRepository;
pub use memory::InMemorySnapshotRepository;
pub use traits::SnapshotRepository;
