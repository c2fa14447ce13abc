//! Card effect pipeline.
//!
//! Turns a resolving card into character-state mutations:
//! 1. Bind the card, its caster (source) and the caster's opponent (target)
//! 2. Order effects by `order`, declaration order on ties
//! 3. For each effect, validate its recipient, then apply it
//! 4. Stop at the first failed validation and report it
//!
//! The pipeline is pure over the borrowed characters; the session turns the
//! returned [`CardResolution`] into events and death handling.
mod context;
mod error;
mod pipeline;
mod result;

pub use context::CardExecutionContext;
pub use error::ResolveError;
pub use pipeline::resolve_card;
pub use result::{
    AppliedEffect, AppliedValue, CardResolution, RejectionReason, ValidationRejection,
};
