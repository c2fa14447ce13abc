use crate::card::{CardInstance, Recipient};
use crate::character::Character;

/// Execution context for one resolving card.
///
/// `source` is the caster's character; `target` is the opposing character,
/// absent when no opponent is on the field.
pub struct CardExecutionContext<'a> {
    pub card: &'a CardInstance,
    pub source: &'a mut Character,
    pub target: Option<&'a mut Character>,
    /// Cap on registered per-turn effects per character.
    pub max_turn_effects: usize,
}

impl<'a> CardExecutionContext<'a> {
    pub fn new(
        card: &'a CardInstance,
        source: &'a mut Character,
        target: Option<&'a mut Character>,
    ) -> Self {
        Self {
            card,
            source,
            target,
            max_turn_effects: usize::MAX,
        }
    }

    pub fn with_max_turn_effects(mut self, max_turn_effects: usize) -> Self {
        self.max_turn_effects = max_turn_effects;
        self
    }

    /// The character an effect with `recipient` lands on.
    pub(super) fn recipient_mut(&mut self, recipient: Recipient) -> Option<&mut Character> {
        match recipient {
            Recipient::Source => Some(&mut *self.source),
            Recipient::Target => self.target.as_deref_mut(),
        }
    }
}
