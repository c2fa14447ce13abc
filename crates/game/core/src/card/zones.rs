//! Card containers of one side: deck, hand, cards in play and discard pile.
//!
//! The containers store instance ids only; [`CardZones`] owns the instances
//! themselves and keeps every id in exactly one container.

use std::collections::BTreeMap;

use crate::env::{RngOracle, RngState};

use super::{CardError, CardInstance, CardInstanceId, shuffle};

/// Draw pile. The top of the deck is the tail of the list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Deck {
    cards: Vec<CardInstanceId>,
}

impl Deck {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cards(cards: Vec<CardInstanceId>) -> Self {
        Self { cards }
    }

    /// Places a card on top of the deck.
    pub fn push(&mut self, id: CardInstanceId) {
        self.cards.push(id);
    }

    /// Takes the top card, or `None` when the deck is empty.
    pub fn draw(&mut self) -> Option<CardInstanceId> {
        self.cards.pop()
    }

    pub fn shuffle<R: RngOracle + ?Sized>(&mut self, rng: &R, state: &mut RngState) {
        shuffle(&mut self.cards, rng, state);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn as_slice(&self) -> &[CardInstanceId] {
        &self.cards
    }

    fn remove(&mut self, id: CardInstanceId) -> bool {
        remove_id(&mut self.cards, id)
    }
}

/// Cards held by a side, in the order they were received.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Hand {
    cards: Vec<CardInstanceId>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cards(cards: Vec<CardInstanceId>) -> Self {
        Self { cards }
    }

    pub fn push(&mut self, id: CardInstanceId) {
        self.cards.push(id);
    }

    pub fn remove(&mut self, id: CardInstanceId) -> bool {
        remove_id(&mut self.cards, id)
    }

    pub fn contains(&self, id: CardInstanceId) -> bool {
        self.cards.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn as_slice(&self) -> &[CardInstanceId] {
        &self.cards
    }

    fn take_all(&mut self) -> Vec<CardInstanceId> {
        std::mem::take(&mut self.cards)
    }
}

/// Cards removed from play for the rest of the session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DiscardPile {
    cards: Vec<CardInstanceId>,
}

impl DiscardPile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cards(cards: Vec<CardInstanceId>) -> Self {
        Self { cards }
    }

    pub fn push(&mut self, id: CardInstanceId) {
        self.cards.push(id);
    }

    pub fn contains(&self, id: CardInstanceId) -> bool {
        self.cards.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn as_slice(&self) -> &[CardInstanceId] {
        &self.cards
    }
}

fn remove_id(cards: &mut Vec<CardInstanceId>, id: CardInstanceId) -> bool {
    match cards.iter().position(|&c| c == id) {
        Some(index) => {
            cards.remove(index);
            true
        }
        None => false,
    }
}

/// Which container currently holds a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CardLocation {
    Deck,
    Hand,
    InPlay,
    Discard,
}

/// All cards of one side, with the container each one sits in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CardZones {
    instances: BTreeMap<CardInstanceId, CardInstance>,
    deck: Deck,
    hand: Hand,
    in_play: Vec<CardInstanceId>,
    discard: DiscardPile,
}

impl CardZones {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds zones from their parts. Callers validate the parts first.
    pub(crate) fn from_parts(
        instances: BTreeMap<CardInstanceId, CardInstance>,
        deck: Deck,
        hand: Hand,
        in_play: Vec<CardInstanceId>,
        discard: DiscardPile,
    ) -> Self {
        Self {
            instances,
            deck,
            hand,
            in_play,
            discard,
        }
    }

    /// Registers a new card on top of the deck.
    pub fn add_to_deck(&mut self, card: CardInstance) {
        let id = card.id();
        self.instances.insert(id, card);
        self.deck.push(id);
    }

    pub fn get(&self, id: CardInstanceId) -> Option<&CardInstance> {
        self.instances.get(&id)
    }

    pub fn get_mut(&mut self, id: CardInstanceId) -> Option<&mut CardInstance> {
        self.instances.get_mut(&id)
    }

    pub fn require(&self, id: CardInstanceId) -> Result<&CardInstance, CardError> {
        self.get(id).ok_or(CardError::UnknownInstance(id))
    }

    pub fn instances(&self) -> impl Iterator<Item = &CardInstance> {
        self.instances.values()
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn in_play(&self) -> &[CardInstanceId] {
        &self.in_play
    }

    pub fn discard_pile(&self) -> &DiscardPile {
        &self.discard
    }

    pub fn location(&self, id: CardInstanceId) -> Option<CardLocation> {
        if self.hand.contains(id) {
            Some(CardLocation::Hand)
        } else if self.in_play.contains(&id) {
            Some(CardLocation::InPlay)
        } else if self.deck.as_slice().contains(&id) {
            Some(CardLocation::Deck)
        } else if self.discard.contains(id) {
            Some(CardLocation::Discard)
        } else {
            None
        }
    }

    pub fn shuffle_deck<R: RngOracle + ?Sized>(&mut self, rng: &R, state: &mut RngState) {
        self.deck.shuffle(rng, state);
    }

    /// Moves the top card of the deck into the hand.
    pub fn draw(&mut self) -> Option<CardInstanceId> {
        let id = self.deck.draw()?;
        self.hand.push(id);
        Some(id)
    }

    /// Moves a hand card into play. Returns `false` if it was not in hand.
    pub(crate) fn move_to_play(&mut self, id: CardInstanceId) -> bool {
        if !self.hand.remove(id) {
            return false;
        }
        self.in_play.push(id);
        true
    }

    /// Moves a resolved card from play back into the hand.
    pub(crate) fn return_to_hand(&mut self, id: CardInstanceId) -> bool {
        if !remove_id(&mut self.in_play, id) {
            return false;
        }
        self.hand.push(id);
        true
    }

    /// Moves a card from whichever container holds it to the discard pile.
    ///
    /// Returns `Ok(false)` when the card is already discarded; discarding is
    /// idempotent. Unknown ids are an argument error.
    pub fn discard(&mut self, id: CardInstanceId) -> Result<bool, CardError> {
        let card = self
            .instances
            .get_mut(&id)
            .ok_or(CardError::UnknownInstance(id))?;

        let removed =
            self.hand.remove(id) || remove_id(&mut self.in_play, id) || self.deck.remove(id);
        if !removed {
            return Ok(false);
        }
        card.clear_slots();
        self.discard.push(id);
        Ok(true)
    }

    /// Discards the whole hand at once, returning the ids in hand order.
    pub(crate) fn vanish_hand(&mut self) -> Vec<CardInstanceId> {
        let vanished = self.hand.take_all();
        for id in &vanished {
            if let Some(card) = self.instances.get_mut(id) {
                card.clear_slots();
            }
            self.discard.push(*id);
        }
        vanished
    }

    /// Decrements the cooldown of every hand card. Returns the ids that changed.
    pub(crate) fn tick_hand_cooldowns(&mut self) -> Vec<CardInstanceId> {
        let mut ticked = Vec::new();
        for id in self.hand.as_slice() {
            if let Some(card) = self.instances.get_mut(id)
                && card.tick_cooldown()
            {
                ticked.push(*id);
            }
        }
        ticked
    }
}
