//! Interval table and level arithmetic
//!
//! `table[level]` is the number of days between a review at that level and
//! the next one. The table length fixes the maximum level.

use chrono::{Days, NaiveDate};
use thiserror::Error;
use tracing::debug;

use crate::domain::Outcome;

/// Default day offsets per level
pub const DEFAULT_INTERVALS: [u32; 7] = [1, 3, 7, 14, 30, 90, 180];

/// Errors from building an interval table
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntervalError {
    #[error("Interval table must have at least one entry")]
    Empty,

    #[error("Interval at level {level} must be positive")]
    NotPositive { level: usize },

    #[error("Interval at level {level} ({days} days) must be greater than the one before it ({previous} days)")]
    NotIncreasing { level: usize, days: u32, previous: u32 },
}

/// Validated, strictly increasing sequence of positive day offsets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalTable {
    days: Vec<u32>,
}

impl Default for IntervalTable {
    fn default() -> Self {
        Self {
            days: DEFAULT_INTERVALS.to_vec(),
        }
    }
}

impl IntervalTable {
    /// Build a table, rejecting empty, zero or non-increasing entries
    pub fn new(days: Vec<u32>) -> Result<Self, IntervalError> {
        if days.is_empty() {
            return Err(IntervalError::Empty);
        }
        for (level, &d) in days.iter().enumerate() {
            if d == 0 {
                return Err(IntervalError::NotPositive { level });
            }
            if level > 0 && d <= days[level - 1] {
                return Err(IntervalError::NotIncreasing {
                    level,
                    days: d,
                    previous: days[level - 1],
                });
            }
        }
        Ok(Self { days })
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Always false; a table has at least one entry
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.days
    }

    /// Highest reachable level
    pub fn max_level(&self) -> u32 {
        (self.days.len() - 1) as u32
    }

    /// Days until the next review for `level`; levels past the end use the last entry
    pub fn days_for(&self, level: u32) -> u32 {
        let idx = (level as usize).min(self.days.len() - 1);
        self.days[idx]
    }

    /// Level after a review with `outcome`, starting from `current`
    ///
    /// `hard` floors at zero inside its own branch; every branch is then
    /// capped at [`max_level`](Self::max_level).
    pub fn next_level(&self, current: u32, outcome: Outcome) -> u32 {
        let raised = match outcome {
            Outcome::Hard => current.saturating_sub(1),
            Outcome::Good => current.saturating_add(1),
            Outcome::Easy => current.saturating_add(2),
        };
        let level = raised.min(self.max_level());
        debug!(current, %outcome, level, "IntervalTable::next_level: computed");
        level
    }

    /// Date an item at `level` becomes due when reviewed on `today`
    pub fn next_review_date(&self, today: NaiveDate, level: u32) -> NaiveDate {
        add_days(today, self.days_for(level))
    }
}

/// Calendar addition that saturates at the last representable date
pub fn add_days(date: NaiveDate, days: u32) -> NaiveDate {
    date.checked_add_days(Days::new(days as u64)).unwrap_or(NaiveDate::MAX)
}
