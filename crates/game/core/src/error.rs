//! Common error infrastructure for battle-core.
//!
//! This module provides shared types and traits used across all error types in
//! battle-core. Domain-specific errors (e.g., `CharacterError`, `TurnError`)
//! are defined in their respective modules alongside the operations they guard.
//!
//! # Taxonomy
//!
//! Every error the core surfaces is one of two kinds:
//! - **InvalidArgument**: a missing required reference or an out-of-range input
//!   (unknown card instance, non-positive damage, wait lane `7`).
//! - **InvalidOperation**: a sequencing bug in the caller (starting a turn while
//!   one is active, advancing a finished stage). Fatal to that call only, never
//!   to the session.
//!
//! Expected conditions (empty deck, dead target, card on cooldown, insufficient
//! resource) are not errors. They are reported through `Option`, `bool`, or
//! dedicated outcome enums so callers can tell them apart from true faults.

use crate::card::CardError;
use crate::character::CharacterError;
use crate::effect::ResolveError;
use crate::engine::TurnError;
use crate::env::OracleError;
use crate::slot::SlotError;
use crate::stage::StageError;
use crate::state::SnapshotError;

/// Classification of a fault surfaced by the core.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FaultKind {
    /// Null/missing required reference or out-of-range numeric input.
    InvalidArgument,

    /// The call is not legal in the current state (sequencing bug).
    InvalidOperation,
}

impl FaultKind {
    /// Returns a human-readable name for this kind.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidArgument => "invalid_argument",
            Self::InvalidOperation => "invalid_operation",
        }
    }
}

/// Common trait for all battle-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify by what the caller did wrong, not by impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the taxonomy bucket of this error.
    fn kind(&self) -> FaultKind;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }

    /// Shorthand for `kind() == InvalidArgument`.
    fn is_invalid_argument(&self) -> bool {
        self.kind() == FaultKind::InvalidArgument
    }

    /// Shorthand for `kind() == InvalidOperation`.
    fn is_invalid_operation(&self) -> bool {
        self.kind() == FaultKind::InvalidOperation
    }
}

/// Umbrella error returned by [`crate::CombatSession`] operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CombatError {
    #[error(transparent)]
    Character(#[from] CharacterError),

    #[error(transparent)]
    Card(#[from] CardError),

    #[error(transparent)]
    Slot(#[from] SlotError),

    #[error(transparent)]
    Turn(#[from] TurnError),

    #[error(transparent)]
    Stage(#[from] StageError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

impl GameError for CombatError {
    fn kind(&self) -> FaultKind {
        match self {
            Self::Character(e) => e.kind(),
            Self::Card(e) => e.kind(),
            Self::Slot(e) => e.kind(),
            Self::Turn(e) => e.kind(),
            Self::Stage(e) => e.kind(),
            Self::Resolve(e) => e.kind(),
            Self::Oracle(e) => e.kind(),
            Self::Snapshot(e) => e.kind(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Character(e) => e.error_code(),
            Self::Card(e) => e.error_code(),
            Self::Slot(e) => e.error_code(),
            Self::Turn(e) => e.error_code(),
            Self::Stage(e) => e.error_code(),
            Self::Resolve(e) => e.error_code(),
            Self::Oracle(e) => e.error_code(),
            Self::Snapshot(e) => e.error_code(),
        }
    }
}
