//! The action interface exposed to a driving UI.
//!
//! A [`Session`] owns the player's profile, the store collaborator, and at
//! most one in-flight match. Every action returns a [`Snapshot`] of the
//! post-action state for rendering; no other coupling to presentation
//! exists. The session drives AI seats, the house, and resolution
//! synchronously once the human's turn ends; a UI that wants to pace AI
//! seats for display can drive [`Match`] directly instead.

use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::card::Card;
use crate::error::{ActionError, MatchError};
use crate::game::{Match, RoundPhase};
use crate::mode::Mode;
use crate::participant::{SeatKind, SeatStatus};
use crate::profile::{Profile, ProfileStore, Stats};
use crate::rating;
use crate::result::{MatchResult, RoundOutcome};

/// Rendering view of one seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatView {
    /// Seat identifier.
    pub id: u8,
    /// Display name.
    pub name: String,
    /// What controls the seat.
    pub kind: SeatKind,
    /// Team assignment, team mode only.
    pub team: Option<u8>,
    /// The seat's cards this round.
    pub cards: Vec<Card>,
    /// Current hand value.
    pub score: u8,
    /// Turn status.
    pub status: SeatStatus,
    /// Rounds won so far this match.
    pub rounds_won: u32,
}

/// Rendering view of the in-flight match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameView {
    /// The mode being played.
    pub mode: Mode,
    /// Phase of the current round.
    pub phase: RoundPhase,
    /// Current round number, 1-based.
    pub round: u32,
    /// Total rounds in the match.
    pub max_rounds: u32,
    /// Every seat in turn order.
    pub seats: Vec<SeatView>,
    /// Outcomes of the just-resolved round, present while the round is in
    /// the resolved phase.
    pub last_outcomes: Option<Vec<RoundOutcome>>,
    /// Final ranking, present once every round has been played.
    pub result: Option<MatchResult>,
}

/// Post-action state snapshot handed back to the driving UI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// The player's current rating.
    pub rating: i32,
    /// The player's lifetime statistics.
    pub stats: Stats,
    /// Pending warning from the persistence collaborator, if any. Store
    /// failures never block gameplay.
    pub warning: Option<String>,
    /// The in-flight match, if one exists.
    pub game: Option<GameView>,
}

fn game_view(game: &Match) -> GameView {
    let seats = game
        .participants
        .iter()
        .map(|seat| SeatView {
            id: seat.id,
            name: seat.name.clone(),
            kind: seat.kind,
            team: seat.team,
            cards: seat.hand.clone(),
            score: seat.score(),
            status: seat.status,
            rounds_won: seat.rounds_won,
        })
        .collect();

    let last_outcomes = if game.phase == RoundPhase::Resolved {
        game.round_history.last().cloned()
    } else {
        None
    };

    GameView {
        mode: game.mode,
        phase: game.phase,
        round: game.round,
        max_rounds: game.max_rounds,
        seats,
        last_outcomes,
        result: game.final_result(),
    }
}

/// A player session: profile, store collaborator, and at most one match.
#[derive(Debug)]
pub struct Session<S> {
    store: S,
    profile: Profile,
    game: Option<Match>,
    rng: ChaCha8Rng,
    warning: Option<String>,
}

impl<S: ProfileStore> Session<S> {
    /// Opens a session, loading the profile from the store.
    ///
    /// A failed load surfaces a warning and falls back to the default
    /// profile (rating 1000, zeroed statistics); it never blocks play.
    pub fn new(mut store: S, seed: u64) -> Self {
        let mut warning = None;
        let profile = match store.load() {
            Ok(Some(profile)) => profile,
            Ok(None) => Profile::default(),
            Err(err) => {
                warning = Some(format!("profile load failed: {err}"));
                Profile::default()
            }
        };

        Self {
            store,
            profile,
            game: None,
            rng: ChaCha8Rng::seed_from_u64(seed),
            warning,
        }
    }

    /// Returns the player's profile.
    #[must_use]
    pub const fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Returns the player's current rating.
    #[must_use]
    pub const fn rating(&self) -> i32 {
        self.profile.rating
    }

    /// Returns the in-flight match, if any.
    #[must_use]
    pub const fn game(&self) -> Option<&Match> {
        self.game.as_ref()
    }

    /// Returns the store collaborator.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Estimated matchmaking wait for the player's rating. Display only.
    #[must_use]
    pub const fn queue_wait(&self) -> Duration {
        rating::queue_wait(self.profile.rating)
    }

    /// Starts a match in the given mode and deals the first round.
    ///
    /// # Errors
    ///
    /// Returns an error if a match is already in progress.
    pub fn select_mode(&mut self, mode: Mode) -> Result<Snapshot, MatchError> {
        if self.game.as_ref().is_some_and(|game| !game.is_over()) {
            return Err(MatchError::MatchInProgress);
        }

        let seed: u64 = self.rng.random();
        let mut game = Match::new(mode, seed);
        game.start_round()?;
        self.game = Some(game);

        Ok(self.snapshot())
    }

    /// Human action: Hit.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no round waiting on the human, or the
    /// deck was exhausted mid-round (see [`Session::redeal`]).
    pub fn hit(&mut self) -> Result<Snapshot, ActionError> {
        let game = self.game.as_mut().ok_or(ActionError::InvalidState)?;
        game.hit()?;
        self.run_to_resolution()?;
        Ok(self.snapshot())
    }

    /// Human action: Stand.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no round waiting on the human, or the
    /// deck was exhausted mid-round.
    pub fn stand(&mut self) -> Result<Snapshot, ActionError> {
        let game = self.game.as_mut().ok_or(ActionError::InvalidState)?;
        game.stand()?;
        self.run_to_resolution()?;
        Ok(self.snapshot())
    }

    /// Human action: Double down.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no round waiting on the human, the hand
    /// has more than two cards, or the deck was exhausted mid-round.
    pub fn double_down(&mut self) -> Result<Snapshot, ActionError> {
        let game = self.game.as_mut().ok_or(ActionError::InvalidState)?;
        game.double_down()?;
        self.run_to_resolution()?;
        Ok(self.snapshot())
    }

    /// Deals the next round of the match.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no match, the current round has not
    /// resolved, or the match is over.
    pub fn advance_round(&mut self) -> Result<Snapshot, MatchError> {
        let game = self.game.as_mut().ok_or(MatchError::NoMatch)?;
        game.advance_round()?;
        game.start_round()?;

        // The final round can resolve straight off the deal on a natural.
        if game.is_over() {
            self.finish_match();
        }

        Ok(self.snapshot())
    }

    /// Redeals the current round after it was abandoned on deck exhaustion.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no match or the match is not in the
    /// dealing phase.
    pub fn redeal(&mut self) -> Result<Snapshot, MatchError> {
        let game = self.game.as_mut().ok_or(MatchError::NoMatch)?;
        game.start_round()?;

        if game.is_over() {
            self.finish_match();
        }

        Ok(self.snapshot())
    }

    /// Abandons the match between rounds, committing nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no match or a round is mid-flight;
    /// abandonment is only possible between rounds.
    pub fn abandon_match(&mut self) -> Result<Snapshot, MatchError> {
        let game = self.game.as_ref().ok_or(MatchError::NoMatch)?;
        if !matches!(game.phase, RoundPhase::Dealing | RoundPhase::Resolved) {
            return Err(MatchError::RoundInProgress);
        }

        self.game = None;
        Ok(self.snapshot())
    }

    /// Builds a snapshot of the current state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            rating: self.profile.rating,
            stats: self.profile.stats,
            warning: self.warning.clone(),
            game: self.game.as_ref().map(game_view),
        }
    }

    /// Runs AI seats, the house, and resolution after the human's turn.
    fn run_to_resolution(&mut self) -> Result<(), ActionError> {
        let Some(game) = self.game.as_mut() else {
            return Ok(());
        };

        while game.phase == RoundPhase::AiTurns {
            game.play_ai_seat()?;
        }
        if game.phase == RoundPhase::HouseTurn {
            game.play_house()?;
        }

        if game.is_over() {
            self.finish_match();
        }

        Ok(())
    }

    /// Applies rating and statistics for the finished match and saves.
    fn finish_match(&mut self) {
        let Some(game) = self.game.as_ref() else {
            return;
        };
        let human_id = game.human().id;
        let Some(result) = game.final_result() else {
            return;
        };
        let Some(standing) = result.standing_of(human_id) else {
            return;
        };

        self.profile
            .record_result(result.mode, standing.position, result.drawn);

        if let Err(err) = self.store.save(&self.profile) {
            self.warning = Some(format!("profile save failed: {err}"));
        }
    }
}
