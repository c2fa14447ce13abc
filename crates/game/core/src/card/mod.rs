//! Card definitions, instances and the containers that hold them.
//!
//! A card moves through `deck -> hand -> play -> (hand | discard)`. Cooldown
//! starts when the card leaves the hand and ticks down while it sits in hand
//! again.
mod definition;
mod error;
mod instance;
mod shuffle;
mod zones;

pub use definition::{CardDefinition, CardEffect, CardId, EffectKind, Recipient};
pub use error::CardError;
pub use instance::{CardInstance, CardInstanceId, PlayRejection};
pub use shuffle::shuffle;
pub use zones::{CardLocation, CardZones, Deck, DiscardPile, Hand};
