//! Match engine and state management.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::deck::Deck;
use crate::mode::Mode;
use crate::participant::{Participant, SeatKind, random_ai_name};
use crate::result::RoundOutcome;

mod actions;
mod round;
pub mod state;

pub use state::RoundPhase;

/// A match: a fixed set of seats playing a fixed number of rounds in one
/// mode, with a round engine driving each deal-to-resolution cycle.
///
/// The match owns the deck, the seats, and the RNG; exactly one round is in
/// flight at a time and every state transition is sequential, so no
/// synchronization is needed anywhere.
#[derive(Debug)]
pub struct Match {
    /// The mode being played; fixed at creation.
    pub mode: Mode,
    /// Seats in turn order: human first, AI seats in creation order, house
    /// last in modes that have one.
    pub participants: Vec<Participant>,
    /// The deck for the current round, reset and shuffled at each deal.
    pub deck: Deck,
    /// Phase of the current round.
    pub phase: RoundPhase,
    /// Current round number, 1-based.
    pub round: u32,
    /// Total rounds in this match; fixed by the mode.
    pub max_rounds: u32,
    /// Outcomes of each resolved round, in order.
    pub round_history: Vec<Vec<RoundOutcome>>,
    /// Scan position for the AI turn phase.
    next_ai_seat: usize,
    /// Random number generator.
    rng: ChaCha8Rng,
}

impl Match {
    /// Creates a match in the given mode with the given seed.
    ///
    /// Seats are created in turn order with AI names drawn from the name
    /// pools. The first round still needs [`Match::start_round`].
    ///
    /// # Example
    ///
    /// ```no_run
    /// use rankjack::{Match, Mode};
    ///
    /// let game = Match::new(Mode::HeadToHead, 42);
    /// assert_eq!(game.participants.len(), 3);
    /// ```
    #[must_use]
    pub fn new(mode: Mode, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let participants = Self::create_seats(mode, &mut rng);

        Self {
            mode,
            participants,
            deck: Deck::new(),
            phase: RoundPhase::Dealing,
            round: 1,
            max_rounds: mode.max_rounds(),
            round_history: Vec::new(),
            next_ai_seat: 0,
            rng,
        }
    }

    fn create_seats<R: Rng + ?Sized>(mode: Mode, rng: &mut R) -> Vec<Participant> {
        let human_team = (mode == Mode::Team).then_some(1);
        let mut seats = vec![Participant::new(
            0,
            "You".to_owned(),
            SeatKind::Human,
            human_team,
        )];

        let ai_team = |index: usize| match mode {
            // Seat 1 is the human's teammate, the rest are the rival team.
            Mode::Team => Some(if index == 0 { 1 } else { 2 }),
            Mode::HeadToHead | Mode::FreeForAll => None,
        };

        for index in 0..mode.ai_seats() {
            seats.push(Participant::new(
                seats.len() as u8,
                random_ai_name(rng).to_owned(),
                SeatKind::Ai,
                ai_team(index),
            ));
        }

        if mode.has_house() {
            seats.push(Participant::new(
                seats.len() as u8,
                "House".to_owned(),
                SeatKind::House,
                None,
            ));
        }

        seats
    }

    /// Returns the human seat.
    #[expect(
        clippy::missing_panics_doc,
        reason = "the human seat always exists at index 0"
    )]
    #[must_use]
    pub fn human(&self) -> &Participant {
        &self.participants[0]
    }

    /// Returns the house seat, if this mode has one.
    #[must_use]
    pub fn house(&self) -> Option<&Participant> {
        self.participants.iter().find(|p| p.is_house())
    }

    /// Returns the seat with the given ID.
    #[must_use]
    pub fn participant(&self, id: u8) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    /// Returns the number of rounds resolved so far.
    #[must_use]
    pub fn rounds_played(&self) -> u32 {
        self.round_history.len() as u32
    }

    /// Returns whether every round of the match has been resolved.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.rounds_played() == self.max_rounds
    }

    fn begin_ai_turns(&mut self) {
        self.phase = RoundPhase::AiTurns;
        self.next_ai_seat = 1;
    }

    fn next_ai_index(&self) -> Option<usize> {
        (self.next_ai_seat..self.participants.len())
            .find(|&i| self.participants[i].kind == SeatKind::Ai)
    }

    /// Abandons the in-flight round with no outcome recorded and returns the
    /// match to the dealing phase, ready for a redeal of the same round.
    fn abandon_round(&mut self) {
        for seat in &mut self.participants {
            seat.reset_for_round();
        }
        self.phase = RoundPhase::Dealing;
        self.next_ai_seat = 0;
    }
}
