//! Session operations.
//!
//! Every mutation of a [`CombatSession`] is an inherent method defined in this
//! module, split by concern:
//!
//! - `setup`: construction, combat start and enemy spawning
//! - `turns`: turn lifecycle, pause/resume and session end
//! - `play`: drawing, playing and discarding cards
//! - `resolution`: the execution queue and per-slot card resolution
//! - `death`: character death, rewards and stage progression
//!
//! Operations either fail with a [`CombatError`](crate::CombatError) before
//! touching state, or commit and report what changed through the event
//! outbox. Expected gameplay conditions are returned as outcome values.

mod death;
mod errors;
mod play;
mod resolution;
mod setup;
mod turns;

pub use errors::TurnError;

use crate::card::{CardInstanceId, PlayRejection};
use crate::effect::CardResolution;
use crate::slot::SlotPosition;
#[cfg(doc)]
use crate::state::CombatSession;

/// Result of asking a side to draw one card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DrawOutcome {
    Drawn(CardInstanceId),
    DeckEmpty,
    HandFull,
}

impl DrawOutcome {
    pub fn card(&self) -> Option<CardInstanceId> {
        match self {
            Self::Drawn(id) => Some(*id),
            _ => None,
        }
    }
}

/// Result of a play attempt. Rejections leave the session untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayOutcome {
    Played { slot: SlotPosition },
    Rejected(PlayRejection),
}

impl PlayOutcome {
    pub fn is_played(&self) -> bool {
        matches!(self, Self::Played { .. })
    }
}

/// Summary of one drain of the execution queue.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueueReport {
    /// Resolutions in execution order.
    pub resolutions: Vec<CardResolution>,
    /// Requests whose slot held no card.
    pub empty_slots: usize,
    /// Requests dropped because the session ended mid-drain.
    pub skipped: usize,
}
