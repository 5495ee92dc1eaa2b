//! The persisted player profile and the store collaborator seam.
//!
//! The engine only ever reads the profile at startup and writes it back
//! after a completed match; everything in between is in-memory. The storage
//! medium itself stays behind [`ProfileStore`].

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::mode::Mode;
use crate::rating::{self, DEFAULT_RATING};

/// Per-mode match counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeStats {
    /// Matches completed in this mode.
    pub games_played: u32,
    /// Matches won in this mode.
    pub games_won: u32,
}

/// Match counters broken down by mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerModeStats {
    /// Head-to-head counters.
    pub head_to_head: ModeStats,
    /// Team counters.
    pub team: ModeStats,
    /// Free-for-all counters.
    pub free_for_all: ModeStats,
}

impl PerModeStats {
    /// Returns the counters for the given mode.
    #[must_use]
    pub const fn for_mode(&self, mode: Mode) -> &ModeStats {
        match mode {
            Mode::HeadToHead => &self.head_to_head,
            Mode::Team => &self.team,
            Mode::FreeForAll => &self.free_for_all,
        }
    }

    /// Returns the counters for the given mode, mutably.
    pub const fn for_mode_mut(&mut self, mode: Mode) -> &mut ModeStats {
        match mode {
            Mode::HeadToHead => &mut self.head_to_head,
            Mode::Team => &mut self.team,
            Mode::FreeForAll => &mut self.free_for_all,
        }
    }
}

/// Lifetime match statistics. Win rate is derived, never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// Matches completed.
    pub games_played: u32,
    /// Matches won outright (position 1, not a draw).
    pub games_won: u32,
    /// Longest winning streak.
    pub best_streak: u32,
    /// Current winning streak.
    pub current_streak: u32,
    /// Counters per mode.
    pub per_mode: PerModeStats,
}

impl Stats {
    /// Fraction of completed matches won, 0.0 when none played.
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            f64::from(self.games_won) / f64::from(self.games_played)
        }
    }
}

/// The persisted player record: rating plus statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Current skill rating, floored at 1.
    pub rating: i32,
    /// Lifetime statistics.
    pub stats: Stats,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            rating: DEFAULT_RATING,
            stats: Stats::default(),
        }
    }
}

impl Profile {
    /// Applies one completed match: rating delta plus statistics.
    ///
    /// A win is final position 1 in a non-drawn match; anything else resets
    /// the streak. Returns the rating delta that was applied.
    pub fn record_result(&mut self, mode: Mode, position: usize, drawn: bool) -> i32 {
        let delta = rating::delta(mode, position, drawn);
        self.rating = rating::apply(self.rating, delta);

        let won = position == 1 && !drawn;
        self.stats.games_played += 1;
        let per_mode = self.stats.per_mode.for_mode_mut(mode);
        per_mode.games_played += 1;
        if won {
            self.stats.games_won += 1;
            per_mode.games_won += 1;
            self.stats.current_streak += 1;
            self.stats.best_streak = self.stats.best_streak.max(self.stats.current_streak);
        } else {
            self.stats.current_streak = 0;
        }

        delta
    }
}

/// The persistence collaborator the engine reads at startup and writes
/// after each match.
pub trait ProfileStore {
    /// Loads the stored profile, `None` when nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns an error when the storage medium cannot be read or the record
    /// cannot be decoded.
    fn load(&mut self) -> Result<Option<Profile>, StoreError>;

    /// Saves the profile.
    ///
    /// # Errors
    ///
    /// Returns an error when the storage medium cannot be written.
    fn save(&mut self, profile: &Profile) -> Result<(), StoreError>;
}

/// In-memory store for tests and local runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    profile: Option<Profile>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self { profile: None }
    }

    /// Creates a store preloaded with a profile.
    #[must_use]
    pub const fn with_profile(profile: Profile) -> Self {
        Self {
            profile: Some(profile),
        }
    }

    /// Returns the last saved profile, if any.
    #[must_use]
    pub const fn saved(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }
}

impl ProfileStore for MemoryStore {
    fn load(&mut self) -> Result<Option<Profile>, StoreError> {
        Ok(self.profile)
    }

    fn save(&mut self, profile: &Profile) -> Result<(), StoreError> {
        self.profile = Some(*profile);
        Ok(())
    }
}

/// JSON-file store; a missing file reads as no profile.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store backed by the given path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing path.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl ProfileStore for JsonFileStore {
    fn load(&mut self) -> Result<Option<Profile>, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let profile = serde_json::from_str(&contents)?;
        Ok(Some(profile))
    }

    fn save(&mut self, profile: &Profile) -> Result<(), StoreError> {
        let contents = serde_json::to_string_pretty(profile)?;
        fs::write(&self.path, contents)?;
        Ok(())
    }
}
