//! Runtime orchestration for the combat engine.
//!
//! This crate wires together the intent provider abstraction, oracle access,
//! snapshot repositories, and the session worker into a cohesive runtime API.
//! Consumers embed [`Runtime`] to drive turns, subscribe to events, and issue
//! individual combat operations through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`workers`] keeps the session task internal to the crate
//! - [`oracle`] and [`repository`] provide data adapters reused by other crates
pub mod api;
pub mod events;
pub mod logging;
pub mod oracle;
pub mod repository;
pub mod runtime;

mod workers;

pub use api::{
    CardIntent, FirstPlayableProvider, IntentProvider, PassProvider, ProviderKind, Result,
    RuntimeError, RuntimeHandle,
};
pub use events::{Event, EventBus, PersistenceEvent, Topic, TurnEvent};
pub use oracle::{OracleManager, StdRngOracle};
pub use repository::{
    FileSnapshotRepository, InMemorySnapshotRepository, RepositoryError, SnapshotRepository,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig, TurnSummary};
