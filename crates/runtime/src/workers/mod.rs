//! Worker tasks that back the runtime orchestration.
//!
//! The session worker is the only owner of the [`battle_core::CombatSession`];
//! every mutation reaches it as a [`Command`].

mod session;

pub use session::{Command, SessionWorker};
