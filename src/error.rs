//! Error types for engine operations.

use thiserror::Error;

/// Errors from the human actions (`hit`, `stand`, `double_down`).
///
/// A rejected action is a no-op: the round state is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionError {
    /// The round is not waiting on the human's turn.
    #[error("not the human's turn")]
    InvalidState,
    /// Double down requires a two-card hand.
    #[error("cannot double down on this hand")]
    CannotDouble,
    /// The deck ran out mid-round; the round was abandoned with no outcome.
    #[error("deck exhausted mid-round")]
    DeckExhausted,
}

/// Errors from dealing a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DealError {
    /// The round is not in the dealing phase.
    #[error("invalid state for dealing")]
    InvalidState,
    /// Not enough cards to give every seat two.
    #[error("deck exhausted during the deal")]
    DeckExhausted,
}

/// Errors from resolving AI seats or the house.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TurnError {
    /// The round is not in the matching turn phase.
    #[error("invalid state for this turn")]
    InvalidState,
    /// The deck ran out mid-round; the round was abandoned with no outcome.
    #[error("deck exhausted mid-round")]
    DeckExhausted,
}

impl From<TurnError> for ActionError {
    fn from(err: TurnError) -> Self {
        match err {
            TurnError::InvalidState => Self::InvalidState,
            TurnError::DeckExhausted => Self::DeckExhausted,
        }
    }
}

/// Errors from match-level progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MatchError {
    /// A match is already in progress.
    #[error("a match is already in progress")]
    MatchInProgress,
    /// The current round has not resolved yet.
    #[error("the current round is still in progress")]
    RoundInProgress,
    /// All rounds of the match have been played.
    #[error("the match is over")]
    MatchOver,
    /// No match has been created.
    #[error("no match in progress")]
    NoMatch,
    /// Dealing the next round failed.
    #[error(transparent)]
    Deal(#[from] DealError),
}

/// Errors from the profile store collaborator.
///
/// Store failures never block gameplay; the session proceeds on in-memory
/// state and surfaces the failure as a warning.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying storage could not be read or written.
    #[error("profile store unavailable: {0}")]
    Io(#[from] std::io::Error),
    /// The stored record could not be encoded or decoded.
    #[error("profile record malformed: {0}")]
    Format(#[from] serde_json::Error),
}
