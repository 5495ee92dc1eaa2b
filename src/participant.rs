//! Seats at the table: the human, AI opponents, and the house.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::hand::{hand_value, is_blackjack};

/// What controls a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeatKind {
    /// The human player.
    Human,
    /// A computer-controlled peer seat.
    Ai,
    /// The house seat (head-to-head and team modes only).
    House,
}

/// Turn status of a seat within the current round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeatStatus {
    /// The seat can still act or draw.
    Active,
    /// The seat has stood.
    Stood,
    /// The seat has busted (over 21).
    Busted,
}

/// One seat at the table, owning its hand and round-win tally.
#[derive(Debug, Clone)]
pub struct Participant {
    /// Stable seat identifier (also the seat's index in creation order).
    pub id: u8,
    /// Display name.
    pub name: String,
    /// What controls this seat.
    pub kind: SeatKind,
    /// Team assignment, set in team mode only.
    pub team: Option<u8>,
    /// Cards dealt or drawn this round, in order.
    pub hand: Vec<Card>,
    /// Turn status within the current round.
    pub status: SeatStatus,
    /// Rounds won so far this match.
    pub rounds_won: u32,
}

impl Participant {
    /// Creates a seat with an empty hand.
    #[must_use]
    pub const fn new(id: u8, name: String, kind: SeatKind, team: Option<u8>) -> Self {
        Self {
            id,
            name,
            kind,
            team,
            hand: Vec::new(),
            status: SeatStatus::Active,
            rounds_won: 0,
        }
    }

    /// Scores the current hand.
    #[must_use]
    pub fn score(&self) -> u8 {
        hand_value(&self.hand)
    }

    /// Returns whether the current hand is a natural blackjack.
    #[must_use]
    pub fn has_blackjack(&self) -> bool {
        is_blackjack(&self.hand)
    }

    /// Returns whether this is the house seat.
    #[must_use]
    pub fn is_house(&self) -> bool {
        self.kind == SeatKind::House
    }

    /// Returns whether this is the human seat.
    #[must_use]
    pub fn is_human(&self) -> bool {
        self.kind == SeatKind::Human
    }

    /// Clears the hand and reactivates the seat for a new round.
    ///
    /// The round-win tally carries across rounds.
    pub fn reset_for_round(&mut self) {
        self.hand.clear();
        self.status = SeatStatus::Active;
    }
}

/// Everyday AI display names.
pub const REGULAR_AI_NAMES: [&str; 16] = [
    "Alex", "Sam", "Jordan", "Casey", "Morgan", "Taylor", "Riley", "Quinn", "Avery", "Blake",
    "Cameron", "Drew", "Emery", "Finley", "Gray", "Harper",
];

/// High-ranked AI display names, used less often.
pub const RANKED_AI_NAMES: [&str; 16] = [
    "Shadow", "Viper", "Phoenix", "Raven", "Wolf", "Eagle", "Tiger", "Dragon", "Frost", "Blaze",
    "Storm", "Thunder", "Void", "Nova", "Zen", "Apex",
];

/// Picks an AI display name: 70% from the regular pool, 30% from the
/// high-ranked pool.
pub fn random_ai_name<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    let pool: &[&str] = if rng.random_bool(0.7) {
        &REGULAR_AI_NAMES
    } else {
        &RANKED_AI_NAMES
    };
    pool[rng.random_range(0..pool.len())]
}
