//! Event types for the non-combat topics.

use battle_core::{CombatEvent, Side};
use serde::{Deserialize, Serialize};

/// Lightweight turn boundary notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnEvent {
    Started { number: u32, side: Side },
    Completed { number: u32, side: Side },
}

impl TurnEvent {
    /// Picks the turn boundaries out of the combat stream.
    pub fn from_combat(event: &CombatEvent) -> Option<Self> {
        match *event {
            CombatEvent::TurnStarted { number, side } => Some(Self::Started { number, side }),
            CombatEvent::TurnCompleted { number, side } => Some(Self::Completed { number, side }),
            _ => None,
        }
    }
}

/// Snapshot persistence results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PersistenceEvent {
    SnapshotSaved { turn: u32 },
    SnapshotFailed { turn: u32, error: String },
    SnapshotRestored { turn: u32 },
}
