//! Domain types for ReviewDeck
//!
//! VocabularyItem comes from the content generator; ReviewItem is what the
//! scheduler persists. Both serialize as flat camelCase JSON records.

mod item;
mod outcome;

pub use item::{ReviewItem, VocabularyItem, normalize_word};
pub use outcome::Outcome;
