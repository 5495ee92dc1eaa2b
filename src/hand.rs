//! Pure blackjack scoring over card slices.
//!
//! A hand is always rescored from its full card list; nothing is patched
//! incrementally, so the value can never drift from the cards.

use crate::card::Card;

const fn card_value(rank: u8) -> u8 {
    match rank {
        1 => 11,
        2..=10 => rank,
        11..=13 => 10,
        _ => 0,
    }
}

fn evaluate_cards(cards: &[Card]) -> (u8, bool) {
    let mut value: u8 = 0;
    let mut aces: u8 = 0;

    for card in cards {
        if card.rank == 1 {
            aces += 1;
        }
        value = value.saturating_add(card_value(card.rank));
    }

    while value > 21 && aces > 0 {
        value -= 10;
        aces -= 1;
    }

    let is_soft = aces > 0 && value <= 21;
    (value, is_soft)
}

/// Calculates the blackjack value of a hand.
///
/// Aces are counted as 11 where that keeps the total at 21 or below,
/// otherwise as 1. Only the composition of the hand matters, not the order
/// the cards were drawn.
///
/// # Example
///
/// ```
/// use rankjack::{Card, Suit, hand_value};
///
/// let hand = [Card::new(Suit::Hearts, 1), Card::new(Suit::Spades, 9)];
/// assert_eq!(hand_value(&hand), 20);
/// ```
#[must_use]
pub fn hand_value(cards: &[Card]) -> u8 {
    evaluate_cards(cards).0
}

/// Returns whether the hand is soft (contains an ace counted as 11).
#[must_use]
pub fn is_soft(cards: &[Card]) -> bool {
    evaluate_cards(cards).1
}

/// Returns whether a score is a bust.
#[must_use]
pub const fn is_bust(value: u8) -> bool {
    value > 21
}

/// Returns whether the hand is a natural blackjack: exactly two cards
/// totalling 21. A three-card 21 is not a blackjack.
#[must_use]
pub fn is_blackjack(cards: &[Card]) -> bool {
    cards.len() == 2 && hand_value(cards) == 21
}
