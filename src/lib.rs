//! A round-based ranked blackjack engine with AI opponents.
//!
//! The crate provides a [`Match`] type that manages the full round flow
//! (dealing, human actions, AI seats, the house, resolution) across three
//! competitive modes, and a [`Session`] type that layers the player profile,
//! skill rating, and persistence collaborator on top.
//!
//! # Example
//!
//! ```no_run
//! use rankjack::{MemoryStore, Mode, Session};
//!
//! let mut session = Session::new(MemoryStore::new(), 42);
//! let snapshot = session.select_mode(Mode::HeadToHead).expect("no match yet");
//! let _ = snapshot;
//! ```

pub mod card;
pub mod deck;
pub mod error;
pub mod game;
pub mod hand;
pub mod mode;
pub mod participant;
pub mod policy;
pub mod profile;
pub mod rating;
pub mod result;
pub mod session;

// Re-export main types
pub use card::{Card, DECK_SIZE, SUITS, Suit};
pub use deck::Deck;
pub use error::{ActionError, DealError, MatchError, StoreError, TurnError};
pub use game::{Match, RoundPhase};
pub use hand::{hand_value, is_blackjack, is_bust, is_soft};
pub use mode::Mode;
pub use participant::{Participant, SeatKind, SeatStatus};
pub use policy::{Decision, STAND_THRESHOLD, decide};
pub use profile::{JsonFileStore, MemoryStore, ModeStats, PerModeStats, Profile, ProfileStore, Stats};
pub use result::{MatchResult, Outcome, RoundOutcome, Standing};
pub use session::{GameView, SeatView, Session, Snapshot};
