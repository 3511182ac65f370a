//! Source of "today"
//!
//! The scheduler only ever needs a calendar date. Production uses the local
//! date; tests and the CLI's `--today` flag pin it.

use chrono::NaiveDate;
use std::cell::Cell;
use std::rc::Rc;

use crate::intervals::add_days;

/// Provides the current calendar date
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Local calendar date of the host, time of day dropped
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// Clock pinned to a date that tests can move
///
/// Clones share the same date, so a test can keep a handle after passing a
/// clone to the scheduler.
#[derive(Debug, Clone)]
pub struct FixedClock {
    today: Rc<Cell<NaiveDate>>,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today: Rc::new(Cell::new(today)),
        }
    }

    pub fn set(&self, today: NaiveDate) {
        self.today.set(today);
    }

    /// Move forward by whole days
    pub fn advance(&self, days: u32) {
        self.today.set(add_days(self.today.get(), days));
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today.get()
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}
