//! Interactive review session
//!
//! Walks through a deck of due items: show the translation, reveal the word
//! on Enter, then read the learner's recall outcome and hand it to the
//! scheduler. Presentation order is the session's business; the scheduler
//! only decides what is due.

use colored::Colorize;
use eyre::Result;
use rand::Rng;
use rand::seq::SliceRandom;
use reviewstore::KvStore;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use serde::Serialize;
use tracing::{debug, info};

use crate::clock::Clock;
use crate::domain::{Outcome, ReviewItem};
use crate::scheduler::{ReviewScheduler, ScheduleError};

/// Tallies for a finished (or abandoned) session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub hard: usize,
    pub good: usize,
    pub easy: usize,
    /// Items removed from the deck by someone else mid-session
    pub missing: usize,
}

impl SessionSummary {
    /// Items graded, including ones that had gone missing
    pub fn reviewed(&self) -> usize {
        self.hard + self.good + self.easy + self.missing
    }

    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Hard => self.hard += 1,
            Outcome::Good => self.good += 1,
            Outcome::Easy => self.easy += 1,
        }
    }
}

impl std::fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Reviewed: {}  (hard {}, good {}, easy {}",
            self.reviewed(),
            self.hard.to_string().red(),
            self.good.to_string().yellow(),
            self.easy.to_string().green()
        )?;
        if self.missing > 0 {
            write!(f, ", no longer in deck {}", self.missing)?;
        }
        write!(f, ")")
    }
}

/// A pass over the items due today
#[derive(Debug, Clone)]
pub struct ReviewSession {
    deck: Vec<ReviewItem>,
    position: usize,
    summary: SessionSummary,
}

/// What the learner typed at the grading prompt
enum Input {
    Grade(Outcome),
    Quit,
}

impl ReviewSession {
    /// Session over `deck` in the given order
    pub fn new(deck: Vec<ReviewItem>) -> Self {
        debug!(size = deck.len(), "ReviewSession::new: called");
        Self {
            deck,
            position: 0,
            summary: SessionSummary::default(),
        }
    }

    /// Session over `deck` in random order
    pub fn shuffled<R: Rng + ?Sized>(mut deck: Vec<ReviewItem>, rng: &mut R) -> Self {
        deck.shuffle(rng);
        Self::new(deck)
    }

    pub fn len(&self) -> usize {
        self.deck.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deck.is_empty()
    }

    pub fn deck(&self) -> &[ReviewItem] {
        &self.deck
    }

    /// Item currently being shown
    pub fn current(&self) -> Option<&ReviewItem> {
        self.deck.get(self.position)
    }

    pub fn is_complete(&self) -> bool {
        self.position >= self.deck.len()
    }

    /// One-based position of the current card and the deck size
    pub fn progress(&self) -> (usize, usize) {
        ((self.position + 1).min(self.deck.len()), self.deck.len())
    }

    pub fn summary(&self) -> &SessionSummary {
        &self.summary
    }

    /// Grade the current item and move to the next one
    ///
    /// Returns the item as stored after the update, or `None` when the session
    /// is already complete or the word vanished from the deck.
    pub fn grade<S: KvStore, C: Clock>(
        &mut self,
        scheduler: &mut ReviewScheduler<S, C>,
        outcome: Outcome,
    ) -> Result<Option<ReviewItem>, ScheduleError> {
        let Some(item) = self.deck.get(self.position) else {
            debug!("ReviewSession::grade: session complete, ignoring");
            return Ok(None);
        };

        let updated = scheduler.record_performance(item, outcome)?;
        match updated {
            Some(_) => self.summary.record(outcome),
            None => self.summary.missing += 1,
        }
        self.position += 1;
        Ok(updated)
    }

    /// Run the session on the terminal until the deck is done or the learner quits
    pub fn run<S: KvStore, C: Clock>(&mut self, scheduler: &mut ReviewScheduler<S, C>) -> Result<()> {
        if self.is_empty() {
            println!("{}", "Nothing to review today. Go learn some new words!".green());
            return Ok(());
        }

        let mut rl = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;

        while let Some(item) = self.current().cloned() {
            let (n, total) = self.progress();
            println!();
            println!("{}", format!("Progress: {} / {}", n, total).dimmed());
            println!("{} {}", "Translation:".cyan(), item.vocabulary.translation.bold());

            match rl.readline("Press Enter to reveal (q to quit) ") {
                Ok(line) if line.trim().eq_ignore_ascii_case("q") => break,
                Ok(_) => {}
                Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
                Err(err) => return Err(eyre::eyre!("Readline error: {}", err)),
            }

            print_card(&item);

            let outcome = match read_outcome(&mut rl)? {
                Input::Grade(outcome) => outcome,
                Input::Quit => break,
            };

            if let Some(updated) = self.grade(scheduler, outcome)? {
                println!(
                    "{} level {} -> next review {}",
                    "✓".green(),
                    updated.level,
                    updated.next_review_date.to_string().yellow()
                );
            } else {
                println!("{} '{}' is no longer in the deck", "!".yellow(), item.word());
            }
        }

        self.print_summary();
        info!(
            reviewed = self.summary.reviewed(),
            hard = self.summary.hard,
            good = self.summary.good,
            easy = self.summary.easy,
            "Review session finished"
        );
        Ok(())
    }

    fn print_summary(&self) {
        println!();
        if self.is_complete() {
            println!("{}", "Great job! Today's review is complete.".green().bold());
        } else {
            println!("{}", "Session paused. Remaining words stay due.".yellow());
        }
        println!("  {}", self.summary);
    }
}

fn print_card(item: &ReviewItem) {
    let vocab = &item.vocabulary;
    println!("  {}", vocab.word.bold());
    if !vocab.pronunciation.is_empty() {
        println!("  {}", vocab.pronunciation.italic().dimmed());
    }
    if !vocab.definition.is_empty() {
        println!("  {}", vocab.definition);
    }
    if !vocab.example.is_empty() {
        println!("  {} \"{}\"", "Example:".dimmed(), vocab.example);
    }
}

fn read_outcome(rl: &mut DefaultEditor) -> Result<Input> {
    loop {
        match rl.readline("How was it? [h]ard / [g]ood / [e]asy (q to quit) ") {
            Ok(line) => {
                let input = line.trim();
                if input.eq_ignore_ascii_case("q") {
                    return Ok(Input::Quit);
                }
                match input.parse::<Outcome>() {
                    Ok(outcome) => return Ok(Input::Grade(outcome)),
                    Err(e) => println!("{}", e.red()),
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => return Ok(Input::Quit),
            Err(err) => return Err(eyre::eyre!("Readline error: {}", err)),
        }
    }
}
