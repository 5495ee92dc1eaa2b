//! Round and match outcome types.

use serde::{Deserialize, Serialize};

use crate::mode::Mode;

/// Outcome of one round for one seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// The seat won the round.
    Win,
    /// The seat lost the round.
    Lose,
    /// A tie; no tally change.
    Push,
    /// The seat went over 21.
    Bust,
}

/// One seat's result for a resolved round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    /// The seat this outcome belongs to.
    pub participant_id: u8,
    /// The outcome of the round.
    pub outcome: Outcome,
    /// The seat's final hand value.
    pub final_score: u8,
}

/// One seat's place in the final ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    /// The seat being ranked.
    pub participant_id: u8,
    /// Final position, 1-based. Drawn matches share position 1.
    pub position: usize,
    /// Total rounds won across the match.
    pub rounds_won: u32,
}

/// Final result of a completed match, the sole input to the rating update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// The mode that was played.
    pub mode: Mode,
    /// Non-house seats ranked by rounds won. Free-for-all ties keep seat
    /// order (stable sort).
    pub ranking: Vec<Standing>,
    /// Whether the match ended in a draw (head-to-head and team only).
    pub drawn: bool,
}

impl MatchResult {
    /// Returns the standing for the given seat, if it was ranked.
    #[must_use]
    pub fn standing_of(&self, participant_id: u8) -> Option<&Standing> {
        self.ranking
            .iter()
            .find(|s| s.participant_id == participant_id)
    }
}
