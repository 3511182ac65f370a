//! ReviewDeck - spaced-repetition review for IELTS vocabulary
//!
//! CLI entry point.

use std::fs;
use std::io::Read;

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use tracing::{debug, info};

use reviewdeck::cli::{Cli, Command, OutputFormat};
use reviewdeck::clock::{Clock, FixedClock, SystemClock};
use reviewdeck::config::Config;
use reviewdeck::{ReviewItem, ReviewScheduler, ReviewSession, VocabularyItem};
use reviewstore::KvStore;

fn setup_logging(cli_log_level: Option<&str>, config: &Config) -> Result<()> {
    let log_dir = config.log_dir();
    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Priority: CLI --log-level > config file > default (INFO)
    let level = match cli_log_level.or(config.log_level.as_deref()) {
        Some(s) => match s.to_uppercase().as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    let log_file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("reviewdeck.log"))
        .context("Failed to open log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Note: logging isn't initialized yet, so events from Config::load are dropped
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    setup_logging(cli.log_level.as_deref(), &config).context("Failed to setup logging")?;
    config.validate()?;

    let store = config.open_store()?;
    let intervals = config.interval_table()?;

    // --today pins the date; otherwise use the local calendar date
    let clock: Box<dyn Clock> = match cli.today {
        Some(today) => {
            info!(%today, "Using fixed date");
            Box::new(FixedClock::new(today))
        }
        None => Box::new(SystemClock),
    };

    let mut scheduler = ReviewScheduler::with_clock(store, clock)
        .with_key(config.storage.key.clone())
        .with_intervals(intervals);

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Command::Enroll { file } => cmd_enroll(&mut scheduler, &file),
        Command::Add {
            word,
            translation,
            definition,
            example,
            pronunciation,
        } => {
            let item = VocabularyItem::new(word)
                .with_translation(translation)
                .with_definition(definition)
                .with_example(example)
                .with_pronunciation(pronunciation);
            let word = item.word.clone();
            if scheduler.enroll([item])? == 1 {
                println!("{} Enrolled {}", "✓".green(), word.cyan());
            } else {
                println!("{} '{}' is already in the deck", "-".dimmed(), word);
            }
            Ok(())
        }
        Command::Due { format } => print_items(&scheduler.due_items(), format),
        Command::Count => {
            println!("{}", scheduler.due_count());
            Ok(())
        }
        Command::Grade { word, outcome } => {
            match scheduler.record_performance_for(&word, outcome)? {
                Some(item) => println!(
                    "{} {} -> level {}, next review {}",
                    "✓".green(),
                    item.word().cyan(),
                    item.level,
                    item.next_review_date.to_string().yellow()
                ),
                None => println!("{} '{}' is not in the deck", "-".dimmed(), word),
            }
            Ok(())
        }
        Command::List { format } => print_items(&scheduler.all_items(), format),
        Command::Stats { format } => {
            let stats = scheduler.stats();
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
                OutputFormat::Text => {
                    println!("Words: {}", stats.total);
                    println!("Due today: {}", stats.due.to_string().yellow());
                    if let Some(next) = stats.next_due {
                        println!("Next upcoming review: {}", next);
                    }
                    println!("By level:");
                    for (level, count) in stats.per_level.iter().enumerate() {
                        let days = scheduler.intervals().days_for(level as u32);
                        println!("  {} ({:>3}d): {}", level, days, count);
                    }
                }
            }
            Ok(())
        }
        Command::Review => {
            let due = scheduler.due_items();
            let mut session = if config.review.shuffle {
                ReviewSession::shuffled(due, &mut rand::rng())
            } else {
                ReviewSession::new(due)
            };
            session.run(&mut scheduler)
        }
    }
}

fn cmd_enroll<S: KvStore, C: Clock>(scheduler: &mut ReviewScheduler<S, C>, file: &str) -> Result<()> {
    let content = if file == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        buf
    } else {
        fs::read_to_string(file).context(format!("Failed to read file: {}", file))?
    };

    let candidates: Vec<VocabularyItem> =
        serde_json::from_str(&content).context("Expected a JSON array of vocabulary records")?;
    let offered = candidates.len();
    let added = scheduler.enroll(candidates)?;

    println!(
        "{} Enrolled {} new word(s), {} already in the deck",
        "✓".green(),
        added.to_string().cyan(),
        offered - added
    );
    Ok(())
}

fn print_items(items: &[ReviewItem], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(items)?),
        OutputFormat::Text => {
            if items.is_empty() {
                println!("No words found");
            }
            for item in items {
                println!(
                    "{}  {}  {} {}",
                    item.next_review_date.to_string().dimmed(),
                    format!("L{}", item.level).yellow(),
                    item.word().cyan(),
                    item.vocabulary.translation
                );
            }
        }
    }
    Ok(())
}
