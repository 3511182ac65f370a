//! End-to-end tests for the `rd` binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Write a config that keeps all data (and logs) inside `dir`
fn write_config(dir: &Path, backend: &str) -> PathBuf {
    let config_path = dir.join("reviewdeck.yml");
    let yaml = format!(
        "storage:\n  backend: {}\n  path: {}\nreview:\n  shuffle: false\n",
        backend,
        dir.join("data").display()
    );
    fs::write(&config_path, yaml).expect("Failed to write config");
    config_path
}

fn rd(config: &Path, today: &str) -> Command {
    let mut cmd = Command::cargo_bin("rd").expect("binary built");
    cmd.env("NO_COLOR", "1")
        .arg("--config")
        .arg(config)
        .arg("--today")
        .arg(today);
    cmd
}

fn write_words(dir: &Path) -> PathBuf {
    let words = r#"[
        {"word": "ubiquitous", "translation": "无处不在的", "definition": "found everywhere",
         "example": "Smartphones are ubiquitous.", "pronunciation": "/juːˈbɪkwɪtəs/"},
        {"word": "Cogent", "translation": "有说服力的"},
        {"word": "cogent", "translation": "duplicate"}
    ]"#;
    let path = dir.join("words.json");
    fs::write(&path, words).expect("Failed to write words");
    path
}

#[test]
fn test_enroll_due_and_grade() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), "file");
    let words = write_words(temp.path());

    rd(&config, "2025-01-10")
        .arg("enroll")
        .arg(&words)
        .assert()
        .success()
        .stdout(predicate::str::contains("Enrolled 2 new word(s), 1 already in the deck"));

    // Nothing due on the day of enrollment
    rd(&config, "2025-01-10")
        .arg("count")
        .assert()
        .success()
        .stdout("0\n");

    rd(&config, "2025-01-11")
        .arg("count")
        .assert()
        .success()
        .stdout("2\n");

    rd(&config, "2025-01-11")
        .args(["grade", "UBIQUITOUS", "good"])
        .assert()
        .success()
        .stdout(predicate::str::contains("level 1").and(predicate::str::contains("2025-01-14")));

    rd(&config, "2025-01-11")
        .args(["due", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"word\": \"Cogent\"").and(predicate::str::contains("ubiquitous").not()));
}

#[test]
fn test_grade_unknown_word_is_not_an_error() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), "file");

    rd(&config, "2025-01-10")
        .args(["grade", "phantom", "easy"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not in the deck"));
}

#[test]
fn test_add_and_stats_with_sqlite() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), "sqlite");

    rd(&config, "2025-01-10")
        .args(["add", "lucid", "--translation", "清晰的"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Enrolled"));

    rd(&config, "2025-01-10")
        .args(["add", "LUCID"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already in the deck"));

    assert!(temp.path().join("data").join("reviewdeck.db").exists());

    rd(&config, "2025-01-10")
        .args(["stats", "--format", "json"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("\"total\": 1")
                .and(predicate::str::contains("\"due\": 0"))
                .and(predicate::str::contains("\"next_due\": \"2025-01-11\"")),
        );
}

#[test]
fn test_review_with_nothing_due() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), "file");

    rd(&config, "2025-01-10")
        .arg("review")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to review today"));
}

#[test]
fn test_enroll_rejects_non_array() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), "file");
    let bad = temp.path().join("bad.json");
    fs::write(&bad, r#"{"word": "single"}"#).unwrap();

    rd(&config, "2025-01-10")
        .arg("enroll")
        .arg(&bad)
        .assert()
        .failure()
        .stderr(predicate::str::contains("JSON array"));
}

#[test]
fn test_enroll_from_stdin() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), "file");

    rd(&config, "2025-01-10")
        .args(["enroll", "-"])
        .write_stdin(r#"[{"word": "mitigate"}]"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("Enrolled 1 new word(s)"));

    rd(&config, "2025-01-10")
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("mitigate").and(predicate::str::contains("2025-01-11")));
}

#[test]
fn test_invalid_intervals_fail_fast() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("reviewdeck.yml");
    fs::write(
        &config_path,
        format!(
            "storage:\n  path: {}\nschedule:\n  intervals: [5, 2]\n",
            temp.path().join("data").display()
        ),
    )
    .unwrap();

    rd(&config_path, "2025-01-10")
        .arg("count")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid schedule.intervals"));
}

#[test]
fn test_unstorable_file_key_fails_fast() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("reviewdeck.yml");
    fs::write(
        &config_path,
        format!(
            "storage:\n  backend: file\n  path: {}\n  key: my deck\n",
            temp.path().join("data").display()
        ),
    )
    .unwrap();

    rd(&config_path, "2025-01-10")
        .arg("count")
        .assert()
        .failure()
        .stderr(predicate::str::contains("storage.key"));
}
