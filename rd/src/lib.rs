//! ReviewDeck - spaced-repetition scheduler for IELTS vocabulary
//!
//! Decides, for every word a learner has picked up, when it must be shown
//! again, and moves that date based on how well the learner recalled it.
//!
//! # Core Concepts
//!
//! - **Level**: familiarity rank, an index into the [`IntervalTable`]
//! - **Due**: an item whose next review date is today or earlier
//! - **Enroll**: add a word to the deck unless it is already there (case-insensitive)
//! - **Outcome**: recall performance (`hard`, `good`, `easy`) that moves the level
//!
//! The whole deck lives as one JSON blob in a [`reviewstore::KvStore`]; every
//! operation loads it, and mutations write it back in full.
//!
//! # Modules
//!
//! - [`intervals`] - interval table and level arithmetic
//! - [`domain`] - vocabulary and review item types
//! - [`clock`] - source of "today"
//! - [`scheduler`] - the review scheduler
//! - [`session`] - interactive terminal review
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface

pub mod cli;
pub mod clock;
pub mod config;
pub mod domain;
pub mod intervals;
pub mod scheduler;
pub mod session;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use domain::{Outcome, ReviewItem, VocabularyItem, normalize_word};
pub use intervals::{DEFAULT_INTERVALS, IntervalError, IntervalTable};
pub use scheduler::{DeckStats, ReviewScheduler, ScheduleError};
pub use session::{ReviewSession, SessionSummary};

/// Storage key the deck is kept under unless configured otherwise
pub const DEFAULT_STORE_KEY: &str = "ielts-copilot-review-words";
