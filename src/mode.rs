//! Competitive match modes and their per-mode constants.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A competitive mode. The mode fixes seat layout, round count, the outcome
/// comparison rule, and the rating formula; nothing about it changes after
/// match creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Human versus one AI, outcomes judged against the house. Five rounds.
    HeadToHead,
    /// Human and an AI teammate versus two AI, judged against the house.
    /// Five rounds.
    Team,
    /// Human versus four AI peers, no house. Ten rounds.
    FreeForAll,
}

impl Mode {
    /// Number of rounds in a match of this mode.
    #[must_use]
    pub const fn max_rounds(self) -> u32 {
        match self {
            Self::HeadToHead | Self::Team => 5,
            Self::FreeForAll => 10,
        }
    }

    /// Number of AI seats (excluding the house).
    #[must_use]
    pub const fn ai_seats(self) -> usize {
        match self {
            Self::HeadToHead => 1,
            Self::Team => 3,
            Self::FreeForAll => 4,
        }
    }

    /// Whether a house seat plays in this mode.
    #[must_use]
    pub const fn has_house(self) -> bool {
        !matches!(self, Self::FreeForAll)
    }

    /// Short display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::HeadToHead => "1v1",
            Self::Team => "2v2",
            Self::FreeForAll => "ffa",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
