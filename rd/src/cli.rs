//! CLI argument parsing for reviewdeck

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

use crate::domain::Outcome;

/// ReviewDeck - spaced-repetition review for IELTS vocabulary
#[derive(Parser, Debug)]
#[command(name = "rd")]
#[command(author, version, about = "Spaced-repetition review for IELTS vocabulary", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(short = 'l', long = "log-level", global = true)]
    pub log_level: Option<String>,

    /// Pretend today is this date (YYYY-MM-DD)
    #[arg(long, global = true, hide = true, value_parser = parse_date)]
    pub today: Option<NaiveDate>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Enroll words from a JSON array of vocabulary records
    Enroll {
        /// JSON file to read, or '-' for stdin
        #[arg(required = true)]
        file: String,
    },

    /// Enroll a single word
    Add {
        /// The word itself
        #[arg(required = true)]
        word: String,

        /// Translation shown on the front of the card
        #[arg(short, long, default_value = "")]
        translation: String,

        /// English definition
        #[arg(short, long, default_value = "")]
        definition: String,

        /// Example sentence
        #[arg(short, long, default_value = "")]
        example: String,

        /// Pronunciation (IPA)
        #[arg(short, long, default_value = "")]
        pronunciation: String,
    },

    /// List words due today
    Due {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Print the number of words due today
    Count,

    /// Record how well a word was recalled
    Grade {
        /// Word to grade (case-insensitive)
        #[arg(required = true)]
        word: String,

        /// Recall outcome: hard, good, or easy
        #[arg(required = true)]
        outcome: Outcome,
    },

    /// List every word in the deck
    List {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Show deck statistics
    Stats {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Review today's words interactively
    Review,
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("Invalid date '{}' (expected YYYY-MM-DD): {}", s, e))
}

/// Output format for listing commands
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        debug!(%s, "OutputFormat::from_str: called");
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {}. Use: text or json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_grade() {
        let cli = Cli::parse_from(["rd", "grade", "Ubiquitous", "easy"]);
        match cli.command {
            Command::Grade { word, outcome } => {
                assert_eq!(word, "Ubiquitous");
                assert_eq!(outcome, Outcome::Easy);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_grade_rejects_unknown_outcome() {
        assert!(Cli::try_parse_from(["rd", "grade", "word", "meh"]).is_err());
    }

    #[test]
    fn test_global_today_flag() {
        let cli = Cli::parse_from(["rd", "count", "--today", "2025-02-28"]);
        assert_eq!(cli.today, NaiveDate::from_ymd_opt(2025, 2, 28));

        assert!(Cli::try_parse_from(["rd", "count", "--today", "28/02/2025"]).is_err());
    }

    #[test]
    fn test_parse_add_with_fields() {
        let cli = Cli::parse_from(["rd", "add", "lucid", "-t", "清晰的", "--definition", "easy to understand"]);
        match cli.command {
            Command::Add {
                word,
                translation,
                definition,
                example,
                ..
            } => {
                assert_eq!(word, "lucid");
                assert_eq!(translation, "清晰的");
                assert_eq!(definition, "easy to understand");
                assert!(example.is_empty());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("plain".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("table".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }
}
