//! Vocabulary and review item types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Case-insensitive identity key for a word
pub fn normalize_word(word: &str) -> String {
    word.to_lowercase()
}

/// A word as produced by the content generator
///
/// Only `word` is required when deserializing; generated records are not
/// guaranteed to carry every field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyItem {
    pub word: String,
    #[serde(default)]
    pub translation: String,
    #[serde(default)]
    pub definition: String,
    #[serde(default)]
    pub example: String,
    #[serde(default)]
    pub pronunciation: String,
}

impl VocabularyItem {
    /// Create an item with only the word set
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            translation: String::new(),
            definition: String::new(),
            example: String::new(),
            pronunciation: String::new(),
        }
    }

    pub fn with_translation(mut self, translation: impl Into<String>) -> Self {
        self.translation = translation.into();
        self
    }

    pub fn with_definition(mut self, definition: impl Into<String>) -> Self {
        self.definition = definition.into();
        self
    }

    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = example.into();
        self
    }

    pub fn with_pronunciation(mut self, pronunciation: impl Into<String>) -> Self {
        self.pronunciation = pronunciation.into();
        self
    }

    /// Lowercased word, used for duplicate detection and lookup
    pub fn key(&self) -> String {
        normalize_word(&self.word)
    }
}

/// A vocabulary item under review, as persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewItem {
    #[serde(flatten)]
    pub vocabulary: VocabularyItem,

    /// Familiarity rank, an index into the interval table
    pub level: u32,

    /// Earliest date the item is due again (`YYYY-MM-DD` on the wire)
    pub next_review_date: NaiveDate,
}

impl ReviewItem {
    /// Enroll a vocabulary item at level 0
    pub fn enroll(vocabulary: VocabularyItem, next_review_date: NaiveDate) -> Self {
        debug!(word = %vocabulary.word, %next_review_date, "ReviewItem::enroll: called");
        Self {
            vocabulary,
            level: 0,
            next_review_date,
        }
    }

    pub fn word(&self) -> &str {
        &self.vocabulary.word
    }

    pub fn key(&self) -> String {
        self.vocabulary.key()
    }

    /// Whether the item should be shown on `today`
    pub fn is_due(&self, today: NaiveDate) -> bool {
        self.next_review_date <= today
    }

    /// Case-insensitive word comparison
    pub fn matches(&self, word: &str) -> bool {
        self.key() == normalize_word(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_normalize_word() {
        assert_eq!(normalize_word("Ubiquitous"), "ubiquitous");
        assert_eq!(normalize_word("ÉCLAT"), "éclat");
    }

    #[test]
    fn test_vocabulary_builder() {
        let item = VocabularyItem::new("ubiquitous")
            .with_translation("无处不在的")
            .with_definition("present everywhere")
            .with_example("Phones are ubiquitous.")
            .with_pronunciation("/juːˈbɪkwɪtəs/");

        assert_eq!(item.word, "ubiquitous");
        assert_eq!(item.translation, "无处不在的");
        assert_eq!(item.pronunciation, "/juːˈbɪkwɪtəs/");
    }

    #[test]
    fn test_vocabulary_missing_fields_default() {
        let item: VocabularyItem = serde_json::from_str(r#"{"word":"Foo"}"#).unwrap();
        assert_eq!(item.word, "Foo");
        assert!(item.translation.is_empty());
        assert!(item.example.is_empty());
    }

    #[test]
    fn test_vocabulary_requires_word() {
        assert!(serde_json::from_str::<VocabularyItem>(r#"{"translation":"x"}"#).is_err());
    }

    #[test]
    fn test_review_item_wire_format() {
        let item = ReviewItem::enroll(VocabularyItem::new("cogent").with_translation("有说服力的"), date("2025-03-09"));

        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["word"], "cogent");
        assert_eq!(value["translation"], "有说服力的");
        assert_eq!(value["level"], 0);
        assert_eq!(value["nextReviewDate"], "2025-03-09");
        assert!(value.get("vocabulary").is_none());
    }

    #[test]
    fn test_review_item_parses_stored_record() {
        let json = r#"{
            "word": "mitigate",
            "translation": "减轻",
            "definition": "make less severe",
            "example": "Trees mitigate flooding.",
            "pronunciation": "/ˈmɪtɪɡeɪt/",
            "nextReviewDate": "2025-01-05",
            "level": 3
        }"#;

        let item: ReviewItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.word(), "mitigate");
        assert_eq!(item.level, 3);
        assert_eq!(item.next_review_date, date("2025-01-05"));
    }

    #[test]
    fn test_review_item_rejects_bad_date() {
        let json = r#"{"word":"x","level":0,"nextReviewDate":"01/05/2025"}"#;
        assert!(serde_json::from_str::<ReviewItem>(json).is_err());
    }

    #[test]
    fn test_is_due() {
        let item = ReviewItem::enroll(VocabularyItem::new("a"), date("2025-01-05"));
        assert!(!item.is_due(date("2025-01-04")));
        assert!(item.is_due(date("2025-01-05")));
        assert!(item.is_due(date("2025-01-06")));
    }

    #[test]
    fn test_matches_ignores_case() {
        let item = ReviewItem::enroll(VocabularyItem::new("Foo"), date("2025-01-05"));
        assert!(item.matches("foo"));
        assert!(item.matches("FOO"));
        assert!(!item.matches("food"));
    }
}
