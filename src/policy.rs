//! The fixed-threshold hit/stand policy shared by AI seats and the house.

/// A hit-or-stand decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Draw another card.
    Hit,
    /// Keep the current hand.
    Stand,
}

/// The score at which the policy stands.
pub const STAND_THRESHOLD: u8 = 17;

/// Decides hit or stand for the given score.
///
/// Hits on 16 or less, stands on 17 or more. The same rule drives every AI
/// seat and the house; there is no randomness and no reading of opponents'
/// cards. Iterating draw-rescore-decide always terminates, since the score
/// only grows until a stand or a bust.
///
/// # Example
///
/// ```
/// use rankjack::{Decision, decide};
///
/// assert_eq!(decide(16), Decision::Hit);
/// assert_eq!(decide(17), Decision::Stand);
/// ```
#[must_use]
pub const fn decide(score: u8) -> Decision {
    if score < STAND_THRESHOLD {
        Decision::Hit
    } else {
        Decision::Stand
    }
}
