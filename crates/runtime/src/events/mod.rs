//! Topic-based event bus for runtime events.
//!
//! The session worker drains the combat outbox after every command and
//! republishes each [`battle_core::CombatEvent`] here. Consumers subscribe
//! only to the topics they need; delivery is best effort and never blocks the
//! worker.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{PersistenceEvent, TurnEvent};
