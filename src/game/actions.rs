use crate::card::Card;
use crate::error::ActionError;
use crate::hand::is_bust;
use crate::participant::SeatStatus;

use super::{Match, RoundPhase};

impl Match {
    fn ensure_human_turn(&self) -> Result<(), ActionError> {
        if self.phase == RoundPhase::HumanTurn {
            Ok(())
        } else {
            Err(ActionError::InvalidState)
        }
    }

    /// Human action: Hit (draw a card).
    ///
    /// Busting ends the human's turn and hands play to the AI seats.
    ///
    /// # Errors
    ///
    /// Returns an error if the round is not waiting on the human, or if the
    /// deck is exhausted (which abandons the round, see
    /// [`Match::start_round`]).
    pub fn hit(&mut self) -> Result<Card, ActionError> {
        self.ensure_human_turn()?;

        let Some(card) = self.deck.draw() else {
            self.abandon_round();
            return Err(ActionError::DeckExhausted);
        };

        let human = &mut self.participants[0];
        human.hand.push(card);

        if is_bust(human.score()) {
            human.status = SeatStatus::Busted;
            self.begin_ai_turns();
        }

        Ok(card)
    }

    /// Human action: Stand (keep the current hand).
    ///
    /// # Errors
    ///
    /// Returns an error if the round is not waiting on the human.
    pub fn stand(&mut self) -> Result<(), ActionError> {
        self.ensure_human_turn()?;

        self.participants[0].status = SeatStatus::Stood;
        self.begin_ai_turns();

        Ok(())
    }

    /// Human action: Double down (draw exactly one card, then stand).
    ///
    /// Only legal while the hand has exactly two cards; rejected as a no-op
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the round is not waiting on the human, the hand
    /// has more than two cards, or the deck is exhausted (which abandons the
    /// round).
    pub fn double_down(&mut self) -> Result<Card, ActionError> {
        self.ensure_human_turn()?;

        if self.participants[0].hand.len() != 2 {
            return Err(ActionError::CannotDouble);
        }

        let Some(card) = self.deck.draw() else {
            self.abandon_round();
            return Err(ActionError::DeckExhausted);
        };

        let human = &mut self.participants[0];
        human.hand.push(card);
        human.status = if is_bust(human.score()) {
            SeatStatus::Busted
        } else {
            SeatStatus::Stood
        };
        self.begin_ai_turns();

        Ok(card)
    }
}
