//! Skill rating updates and the rating-derived queue wait.

use std::time::Duration;

use crate::mode::Mode;

/// Rating assigned to a player with no stored profile.
pub const DEFAULT_RATING: i32 = 1000;

/// Ratings never drop below this floor.
pub const RATING_FLOOR: i32 = 1;

/// Computes the signed rating delta for a finished match.
///
/// Head-to-head pays a flat +25 for a win and -25 for a loss; team pays
/// +20/-20 per member; free-for-all pays +30/+15/+5 for the top three
/// positions and nothing below. Draws (head-to-head and team) pay zero.
///
/// # Example
///
/// ```
/// use rankjack::{Mode, rating};
///
/// assert_eq!(rating::delta(Mode::HeadToHead, 1, false), 25);
/// assert_eq!(rating::delta(Mode::FreeForAll, 2, false), 15);
/// ```
#[must_use]
pub const fn delta(mode: Mode, position: usize, drawn: bool) -> i32 {
    if drawn {
        return 0;
    }
    match mode {
        Mode::HeadToHead => {
            if position == 1 {
                25
            } else {
                -25
            }
        }
        Mode::Team => {
            if position == 1 {
                20
            } else {
                -20
            }
        }
        Mode::FreeForAll => match position {
            1 => 30,
            2 => 15,
            3 => 5,
            _ => 0,
        },
    }
}

/// Applies a delta to a rating, clamping at the floor of 1.
#[must_use]
pub const fn apply(rating: i32, delta: i32) -> i32 {
    let updated = rating + delta;
    if updated < RATING_FLOOR {
        RATING_FLOOR
    } else {
        updated
    }
}

/// Estimated matchmaking queue wait for the given rating.
///
/// Bounded to 3..=20 seconds and monotonically non-decreasing in rating;
/// higher-rated players wait longer. Display pacing only, never a gameplay
/// input.
#[must_use]
pub const fn queue_wait(rating: i32) -> Duration {
    let scaled = rating / 100;
    let secs = if scaled < 3 {
        3
    } else if scaled > 20 {
        20
    } else {
        scaled
    };
    Duration::from_secs(secs as u64)
}
