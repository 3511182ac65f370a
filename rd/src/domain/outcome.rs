//! Recall outcomes reported after a review

use serde::{Deserialize, Serialize};

/// How well the learner recalled a word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// Not remembered; level drops by one
    Hard,
    /// Remembered; level rises by one
    Good,
    /// Remembered without effort; level rises by two
    Easy,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hard => write!(f, "hard"),
            Self::Good => write!(f, "good"),
            Self::Easy => write!(f, "easy"),
        }
    }
}

impl std::str::FromStr for Outcome {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hard" | "h" => Ok(Self::Hard),
            "good" | "g" => Ok(Self::Good),
            "easy" | "e" => Ok(Self::Easy),
            _ => Err(format!("Unknown outcome: {}. Use: hard, good, or easy", s)),
        }
    }
}
