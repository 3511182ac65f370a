//! ReviewScheduler - owns all reads and writes of the review deck
//!
//! Each operation loads the whole deck from the store, transforms it in
//! memory, and (for mutations) writes the whole deck back in one `set`.
//! There is no read-modify-write protection: the last writer wins.

use chrono::NaiveDate;
use reviewstore::{KvStore, StoreError};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::DEFAULT_STORE_KEY;
use crate::clock::{Clock, SystemClock};
use crate::domain::{Outcome, ReviewItem, VocabularyItem};
use crate::intervals::IntervalTable;

/// Errors from scheduler mutations
///
/// Reads never fail: an unreadable or unparsable deck is treated as empty.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("Failed to encode review deck: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Summary of the deck for display
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize)]
pub struct DeckStats {
    /// Items in the deck
    pub total: usize,
    /// Items due today or earlier
    pub due: usize,
    /// Item count per level; stored levels past the table count in the last slot
    pub per_level: Vec<usize>,
    /// Earliest review date after today, if any item is scheduled in the future
    pub next_due: Option<NaiveDate>,
}

/// Spaced-repetition scheduler over a key-value store
pub struct ReviewScheduler<S, C = SystemClock> {
    store: S,
    key: String,
    intervals: IntervalTable,
    clock: C,
}

impl<S: KvStore> ReviewScheduler<S, SystemClock> {
    /// Scheduler using the local date, default key and default intervals
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: KvStore, C: Clock> ReviewScheduler<S, C> {
    pub fn with_clock(store: S, clock: C) -> Self {
        Self {
            store,
            key: DEFAULT_STORE_KEY.to_string(),
            intervals: IntervalTable::default(),
            clock,
        }
    }

    /// Builder method to set the storage key
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Builder method to set the interval table
    pub fn with_intervals(mut self, intervals: IntervalTable) -> Self {
        self.intervals = intervals;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn intervals(&self) -> &IntervalTable {
        &self.intervals
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Load the deck, degrading to empty on any read or parse failure
    fn load(&self) -> Vec<ReviewItem> {
        let blob = match self.store.get(&self.key) {
            Ok(Some(blob)) => blob,
            Ok(None) => {
                debug!(key = %self.key, "load: no deck stored yet");
                return Vec::new();
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to read review deck, treating as empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<ReviewItem>>(&blob) {
            Ok(items) => {
                debug!(key = %self.key, count = items.len(), "load: parsed deck");
                items
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to parse review deck, treating as empty");
                Vec::new()
            }
        }
    }

    fn save(&mut self, items: &[ReviewItem]) -> Result<(), ScheduleError> {
        let blob = serde_json::to_string(items)?;
        self.store.set(&self.key, &blob)?;
        debug!(key = %self.key, count = items.len(), "save: wrote deck");
        Ok(())
    }

    /// Add words not already in the deck; returns how many were added
    ///
    /// Matching is case-insensitive, against both the stored deck and earlier
    /// candidates in the same call. Nothing is written when no word is new.
    pub fn enroll<I>(&mut self, candidates: I) -> Result<usize, ScheduleError>
    where
        I: IntoIterator<Item = VocabularyItem>,
    {
        let mut items = self.load();
        let mut seen: HashSet<String> = items.iter().map(ReviewItem::key).collect();
        let first_review = self.intervals.next_review_date(self.clock.today(), 0);
        debug!(existing = items.len(), %first_review, "enroll: called");

        let before = items.len();
        for candidate in candidates {
            if seen.insert(candidate.key()) {
                items.push(ReviewItem::enroll(candidate, first_review));
            } else {
                debug!(word = %candidate.word, "enroll: already enrolled, skipping");
            }
        }

        let added = items.len() - before;
        if added == 0 {
            debug!("enroll: nothing new, skipping write");
            return Ok(0);
        }

        self.save(&items)?;
        info!(added, total = items.len(), "Enrolled words");
        Ok(added)
    }

    /// Items whose next review date is today or earlier, in storage order
    pub fn due_items(&self) -> Vec<ReviewItem> {
        let today = self.clock.today();
        let due: Vec<ReviewItem> = self.load().into_iter().filter(|item| item.is_due(today)).collect();
        debug!(%today, count = due.len(), "due_items: called");
        due
    }

    /// Number of items due today, for the notification badge
    pub fn due_count(&self) -> usize {
        self.due_items().len()
    }

    /// Every item in the deck, in storage order
    pub fn all_items(&self) -> Vec<ReviewItem> {
        self.load()
    }

    /// Apply a recall outcome to the stored copy of `item`
    ///
    /// The new level is computed from the stored level, not from `item.level`,
    /// so a stale copy held by the caller cannot overwrite newer progress.
    /// Returns `None` without writing when the word is no longer in the deck.
    pub fn record_performance(
        &mut self,
        item: &ReviewItem,
        outcome: Outcome,
    ) -> Result<Option<ReviewItem>, ScheduleError> {
        self.record_performance_for(item.word(), outcome)
    }

    /// Same as [`record_performance`](Self::record_performance), looked up by word
    pub fn record_performance_for(
        &mut self,
        word: &str,
        outcome: Outcome,
    ) -> Result<Option<ReviewItem>, ScheduleError> {
        debug!(%word, %outcome, "record_performance: called");
        let mut items = self.load();

        let Some(idx) = items.iter().position(|i| i.matches(word)) else {
            debug!(%word, "record_performance: word not in deck, ignoring");
            return Ok(None);
        };

        let today = self.clock.today();
        let stored = &mut items[idx];
        let previous = stored.level;
        stored.level = self.intervals.next_level(previous, outcome);
        stored.next_review_date = self.intervals.next_review_date(today, stored.level);
        let updated = stored.clone();

        self.save(&items)?;
        info!(
            word = %updated.word(),
            %outcome,
            previous,
            level = updated.level,
            next_review_date = %updated.next_review_date,
            "Recorded review"
        );
        Ok(Some(updated))
    }

    /// Counts by level plus due and upcoming information
    pub fn stats(&self) -> DeckStats {
        let today = self.clock.today();
        let items = self.load();

        let mut per_level = vec![0usize; self.intervals.len()];
        let top = per_level.len() - 1;
        let mut due = 0;
        let mut next_due: Option<NaiveDate> = None;

        for item in &items {
            per_level[(item.level as usize).min(top)] += 1;
            if item.is_due(today) {
                due += 1;
            } else if next_due.is_none_or(|d| item.next_review_date < d) {
                next_due = Some(item.next_review_date);
            }
        }

        DeckStats {
            total: items.len(),
            due,
            per_level,
            next_due,
        }
    }
}
