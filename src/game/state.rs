//! Round phase types.

use serde::{Deserialize, Serialize};

/// Phase of the current round.
///
/// Rounds move `Dealing -> HumanTurn -> AiTurns -> HouseTurn -> Resolved`;
/// free-for-all matches skip `HouseTurn`, and a natural blackjack on the
/// deal jumps straight to `Resolved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Waiting for the round to be dealt.
    Dealing,
    /// Waiting for the human's action.
    HumanTurn,
    /// AI seats resolve in seat order.
    AiTurns,
    /// The house plays out its hand (head-to-head and team modes).
    HouseTurn,
    /// Outcomes are computed and the round has ended.
    Resolved,
}
