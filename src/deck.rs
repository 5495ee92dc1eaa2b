//! The 52-card deck used for each round.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::card::{Card, DECK_SIZE, SUITS};

/// An ordered collection of cards, drained from the top during a round.
///
/// A deck starts full and ordered; [`Deck::shuffle`] must be called before
/// dealing. The deck itself does not detect an unshuffled deal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Creates a full deck in the canonical suit-major order.
    #[must_use]
    pub fn new() -> Self {
        let mut deck = Self {
            cards: Vec::with_capacity(DECK_SIZE),
        };
        deck.reset();
        deck
    }

    /// Creates a deck from an explicit card sequence.
    ///
    /// Cards are drawn from the back, so the last element is the next draw.
    /// Intended for stacked decks in tests and replays.
    #[must_use]
    pub const fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Replaces the contents with the canonical ordered 52-card set.
    pub fn reset(&mut self) {
        self.cards.clear();
        for suit in SUITS {
            for rank in 1..=13 {
                self.cards.push(Card::new(suit, rank));
            }
        }
    }

    /// Uniformly permutes the current contents.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Removes and returns the top card, or `None` when the deck is empty.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Returns the number of cards remaining.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the deck is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Returns the remaining cards, next draw last.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}
