use crate::card::Card;
use crate::error::{DealError, MatchError, TurnError};
use crate::hand::is_bust;
use crate::mode::Mode;
use crate::participant::{Participant, SeatStatus};
use crate::policy::{Decision, decide};
use crate::result::{MatchResult, Outcome, RoundOutcome, Standing};

use super::{Match, RoundPhase};

const fn standing(seat: &Participant, position: usize) -> Standing {
    Standing {
        participant_id: seat.id,
        position,
        rounds_won: seat.rounds_won,
    }
}

impl Match {
    /// Starts the current round: resets and shuffles the deck, then deals.
    ///
    /// # Errors
    ///
    /// Returns an error if the round is not in the dealing phase.
    pub fn start_round(&mut self) -> Result<(), DealError> {
        if self.phase != RoundPhase::Dealing {
            return Err(DealError::InvalidState);
        }

        self.deck.reset();
        self.deck.shuffle(&mut self.rng);
        self.deal()
    }

    /// Deals two cards to every seat from the current deck contents.
    ///
    /// Cards go out in two passes over the seats in turn order. If the deal
    /// leaves the human or the house with a natural blackjack, the round
    /// resolves immediately with blackjack-aware outcomes.
    ///
    /// Prefer [`Match::start_round`], which shuffles first; dealing from an
    /// explicit deck is for stacked decks in tests and replays.
    ///
    /// # Errors
    ///
    /// Returns an error if the round is not in the dealing phase or the deck
    /// cannot cover two cards per seat.
    pub fn deal(&mut self) -> Result<(), DealError> {
        if self.phase != RoundPhase::Dealing {
            return Err(DealError::InvalidState);
        }

        if self.deck.remaining() < self.participants.len() * 2 {
            return Err(DealError::DeckExhausted);
        }

        for _ in 0..2 {
            for seat in &mut self.participants {
                if let Some(card) = self.deck.draw() {
                    seat.hand.push(card);
                }
            }
        }

        // Natural blackjacks short-circuit the round: the human's hand is
        // checked first, then the house's.
        let human_natural = self.participants[0].has_blackjack();
        let house_natural = self.house().is_some_and(Participant::has_blackjack);

        if human_natural || house_natural {
            self.resolve_round();
        } else {
            self.phase = RoundPhase::HumanTurn;
        }

        Ok(())
    }

    /// Resolves the next AI seat: draws under the fixed-threshold policy
    /// until it stands or busts. Returns the seat's ID.
    ///
    /// One call resolves one seat, so a presentation layer can pace seats;
    /// the logical order is strictly sequential regardless of pacing. After
    /// the last AI seat the round moves to the house turn, or resolves
    /// directly in free-for-all.
    ///
    /// # Errors
    ///
    /// Returns an error if the round is not in the AI turn phase, or if the
    /// deck is exhausted (which abandons the round).
    pub fn play_ai_seat(&mut self) -> Result<u8, TurnError> {
        if self.phase != RoundPhase::AiTurns {
            return Err(TurnError::InvalidState);
        }

        let Some(index) = self.next_ai_index() else {
            // No AI seats left; the phase should already have moved on.
            return Err(TurnError::InvalidState);
        };

        loop {
            let score = self.participants[index].score();

            if is_bust(score) {
                self.participants[index].status = SeatStatus::Busted;
                break;
            }

            if decide(score) == Decision::Stand {
                self.participants[index].status = SeatStatus::Stood;
                break;
            }

            let Some(card) = self.deck.draw() else {
                self.abandon_round();
                return Err(TurnError::DeckExhausted);
            };
            self.participants[index].hand.push(card);
        }

        let id = self.participants[index].id;
        self.next_ai_seat = index + 1;

        if self.next_ai_index().is_none() {
            if self.mode.has_house() {
                self.phase = RoundPhase::HouseTurn;
            } else {
                self.resolve_round();
            }
        }

        Ok(id)
    }

    /// Plays out the house hand under the same fixed-threshold policy, then
    /// resolves the round. Returns the cards the house drew.
    ///
    /// The hole card always participates in scoring; hiding it is a display
    /// concern only.
    ///
    /// # Errors
    ///
    /// Returns an error if the round is not in the house turn phase, or if
    /// the deck is exhausted (which abandons the round).
    pub fn play_house(&mut self) -> Result<Vec<Card>, TurnError> {
        if self.phase != RoundPhase::HouseTurn {
            return Err(TurnError::InvalidState);
        }

        let Some(index) = self.participants.iter().position(Participant::is_house) else {
            return Err(TurnError::InvalidState);
        };

        let mut drawn = Vec::new();

        loop {
            let score = self.participants[index].score();

            if is_bust(score) {
                self.participants[index].status = SeatStatus::Busted;
                break;
            }

            if decide(score) == Decision::Stand {
                self.participants[index].status = SeatStatus::Stood;
                break;
            }

            let Some(card) = self.deck.draw() else {
                self.abandon_round();
                return Err(TurnError::DeckExhausted);
            };
            self.participants[index].hand.push(card);
            drawn.push(card);
        }

        self.resolve_round();

        Ok(drawn)
    }

    /// Computes outcomes for every non-house seat, updates tallies, and
    /// appends to the round history.
    fn resolve_round(&mut self) {
        let outcomes = match self.participants.iter().find(|p| p.is_house()) {
            Some(house) => Self::outcomes_against_house(&self.participants, house),
            None => Self::outcomes_free_for_all(&self.participants),
        };

        for outcome in &outcomes {
            if outcome.outcome == Outcome::Win {
                // Seat IDs double as indices in creation order.
                self.participants[outcome.participant_id as usize].rounds_won += 1;
            }
        }

        self.round_history.push(outcomes);
        self.phase = RoundPhase::Resolved;
    }

    fn outcomes_against_house(seats: &[Participant], house: &Participant) -> Vec<RoundOutcome> {
        let house_score = house.score();
        let house_bust = is_bust(house_score);
        let house_natural = house.has_blackjack();

        seats
            .iter()
            .filter(|seat| !seat.is_house())
            .map(|seat| {
                let score = seat.score();
                let natural = seat.has_blackjack();
                let outcome = if is_bust(score) {
                    Outcome::Bust
                } else if house_bust || (natural && !house_natural) {
                    // A natural beats a drawn-out 21.
                    Outcome::Win
                } else if house_natural && !natural {
                    Outcome::Lose
                } else if score > house_score {
                    Outcome::Win
                } else if score < house_score {
                    Outcome::Lose
                } else {
                    Outcome::Push
                };

                RoundOutcome {
                    participant_id: seat.id,
                    outcome,
                    final_score: score,
                }
            })
            .collect()
    }

    fn outcomes_free_for_all(seats: &[Participant]) -> Vec<RoundOutcome> {
        let best = seats
            .iter()
            .map(Participant::score)
            .filter(|score| !is_bust(*score))
            .max();

        seats
            .iter()
            .map(|seat| {
                let score = seat.score();
                let outcome = match best {
                    // Full-table bust: nobody takes the round.
                    None => Outcome::Push,
                    Some(_) if is_bust(score) => Outcome::Bust,
                    // Every seat tied at the best score takes a round win.
                    Some(best) if score == best => Outcome::Win,
                    Some(_) => Outcome::Lose,
                };

                RoundOutcome {
                    participant_id: seat.id,
                    outcome,
                    final_score: score,
                }
            })
            .collect()
    }

    /// Advances to the next round after a resolution, resetting every seat.
    ///
    /// The next round still needs [`Match::start_round`].
    ///
    /// # Errors
    ///
    /// Returns an error if the match is over or the current round has not
    /// resolved.
    pub fn advance_round(&mut self) -> Result<(), MatchError> {
        if self.is_over() {
            return Err(MatchError::MatchOver);
        }
        if self.phase != RoundPhase::Resolved {
            return Err(MatchError::RoundInProgress);
        }

        self.round += 1;
        for seat in &mut self.participants {
            seat.reset_for_round();
        }
        self.phase = RoundPhase::Dealing;
        self.next_ai_seat = 0;

        Ok(())
    }

    /// Computes the final ranking once every round has been resolved.
    ///
    /// Returns `None` while the match is still in progress.
    #[must_use]
    pub fn final_result(&self) -> Option<MatchResult> {
        if !self.is_over() {
            return None;
        }

        Some(match self.mode {
            Mode::HeadToHead => self.head_to_head_result(),
            Mode::Team => self.team_result(),
            Mode::FreeForAll => self.free_for_all_result(),
        })
    }

    fn head_to_head_result(&self) -> MatchResult {
        let human = &self.participants[0];
        let rival = &self.participants[1];
        let drawn = human.rounds_won == rival.rounds_won;

        let ranking = if drawn {
            vec![standing(human, 1), standing(rival, 1)]
        } else if human.rounds_won > rival.rounds_won {
            vec![standing(human, 1), standing(rival, 2)]
        } else {
            vec![standing(rival, 1), standing(human, 2)]
        };

        MatchResult {
            mode: self.mode,
            ranking,
            drawn,
        }
    }

    fn team_result(&self) -> MatchResult {
        let team_total = |team: u8| {
            self.participants
                .iter()
                .filter(|p| p.team == Some(team))
                .map(|p| p.rounds_won)
                .sum::<u32>()
        };
        let team_one = team_total(1);
        let team_two = team_total(2);
        let drawn = team_one == team_two;
        let winner = if team_two > team_one { 2 } else { 1 };

        let mut ranking = Vec::new();
        for seat in self.participants.iter().filter(|p| !p.is_house()) {
            let position = if drawn || seat.team == Some(winner) {
                1
            } else {
                2
            };
            ranking.push(standing(seat, position));
        }
        // Winning team listed first, seat order within each team.
        ranking.sort_by_key(|s| s.position);

        MatchResult {
            mode: self.mode,
            ranking,
            drawn,
        }
    }

    fn free_for_all_result(&self) -> MatchResult {
        let mut seats: Vec<&Participant> = self
            .participants
            .iter()
            .filter(|p| !p.is_house())
            .collect();
        // Stable sort: tied tallies keep seat order rather than tiebreaking.
        seats.sort_by(|a, b| b.rounds_won.cmp(&a.rounds_won));

        let ranking = seats
            .into_iter()
            .enumerate()
            .map(|(index, seat)| standing(seat, index + 1))
            .collect();

        MatchResult {
            mode: self.mode,
            ranking,
            drawn: false,
        }
    }
}
