//! End-to-end tests driving the compiled binary.
//!
//! Each test points `STREAKS_HOME` at its own temp directory so tests
//! never touch real data and can run in parallel.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn streaks(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("streaks").expect("binary builds");
    cmd.env("STREAKS_HOME", home.path());
    cmd
}

#[test]
fn add_then_list_shows_habit() {
    let home = TempDir::new().unwrap();

    streaks(&home)
        .args(["add", "Read"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 'Read'"));

    streaks(&home)
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Read"))
        .stdout(predicate::str::contains("Habits (1)"));
}

#[test]
fn add_rejects_empty_name() {
    let home = TempDir::new().unwrap();

    streaks(&home)
        .args(["add", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be empty"));
}

#[test]
fn done_is_idempotent_per_day() {
    let home = TempDir::new().unwrap();

    streaks(&home).args(["add", "Read"]).assert().success();

    streaks(&home)
        .args(["done", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Marked 'Read' done"));

    streaks(&home)
        .args(["done", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already done today"));
}

#[test]
fn done_unknown_id_fails() {
    let home = TempDir::new().unwrap();

    streaks(&home)
        .args(["done", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No habit with id 42"));
}

#[test]
fn stats_shows_streak_after_done() {
    let home = TempDir::new().unwrap();

    streaks(&home).args(["add", "Read"]).assert().success();
    streaks(&home).args(["done", "1"]).assert().success();

    streaks(&home)
        .args(["stats", "1", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"streak\": 1"));
}

#[test]
fn delete_removes_habit_and_log() {
    let home = TempDir::new().unwrap();

    streaks(&home).args(["add", "Read"]).assert().success();
    streaks(&home).args(["done", "1"]).assert().success();

    streaks(&home)
        .args(["delete", "1", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 'Read'"));

    // Re-adding the same name gets a fresh id with an empty log
    streaks(&home).args(["add", "Read"]).assert().success();

    streaks(&home)
        .args(["list", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"id\": 2"))
        .stdout(predicate::str::contains("\"streak\": 0"));
}

#[test]
fn export_includes_habits_without_completions() {
    let home = TempDir::new().unwrap();

    streaks(&home).args(["add", "Read"]).assert().success();
    streaks(&home).args(["add", "Walk"]).assert().success();
    streaks(&home).args(["done", "1"]).assert().success();

    let out_path = home.path().join("report.csv");
    streaks(&home)
        .args(["export"])
        .arg(&out_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 rows"));

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();

    assert_eq!(lines[0], "Habit,Created,Done");
    // One row per habit: Read with a date, Walk with an empty Done field
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("Read,"));
    assert!(!lines[1].ends_with(','));
    assert!(lines[2].starts_with("Walk,"));
    assert!(lines[2].ends_with(','));
}

#[test]
fn edit_updates_name() {
    let home = TempDir::new().unwrap();

    streaks(&home).args(["add", "Read"]).assert().success();

    streaks(&home)
        .args(["edit", "1", "--name", "Read more"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated 'Read more'"));

    streaks(&home)
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Read more"));
}

#[test]
fn add_with_invalid_reminder_warns() {
    let home = TempDir::new().unwrap();

    streaks(&home)
        .args(["add", "Read", "--remind", "9pm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("warning"))
        .stdout(predicate::str::contains("no reminder set"));
}

#[test]
fn json_list_has_count_and_items() {
    let home = TempDir::new().unwrap();

    streaks(&home)
        .args(["list", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"count\": 0"))
        .stdout(predicate::str::contains("\"items\": []"));
}
