//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, repositories, intent providers and
//! the combat engine so clients can bubble them up with consistent context.
use std::fmt;

use battle_core::{CombatError, Side, StageId};
use thiserror::Error;
use tokio::sync::oneshot;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Combat(#[from] CombatError),

    #[error("{kind} intent provider not set")]
    ProviderNotSet { kind: ProviderKind },

    #[error("intent provider failed: {0}")]
    Provider(String),

    #[error("session worker command channel closed")]
    CommandChannelClosed,

    #[error("session worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("session worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("no snapshot repository configured")]
    RepositoryNotSet,

    #[error("no snapshot saved for turn {turn}")]
    SnapshotNotFound { turn: u32 },

    #[error("runtime requires oracles to be configured before building")]
    MissingOracles,

    #[error("runtime requires a player loadout or an initial session")]
    MissingPlayer,

    #[error("runtime requires a stage to fight")]
    MissingStage,

    #[error("{0} is not in the content catalog")]
    UnknownStage(StageId),

    #[error("the session is over")]
    SessionFinished,
}

/// Which side an intent provider plays for.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ProviderKind {
    Player,
    Enemy,
}

impl From<Side> for ProviderKind {
    fn from(side: Side) -> Self {
        match side {
            Side::Player => ProviderKind::Player,
            Side::Enemy => ProviderKind::Enemy,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProviderKind::Player => "player",
            ProviderKind::Enemy => "enemy",
        };
        write!(f, "{}", label)
    }
}
