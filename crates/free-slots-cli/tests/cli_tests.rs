//! Integration tests for the `free-slots` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to run the actual binary over
//! stdin, files and unreachable URLs, checking both the JSON it prints and the
//! failures it reports.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: path to a fixture under tests/fixtures.
fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

/// Helper: the expected output for events.json.
fn expected_output() -> String {
    std::fs::read_to_string(fixture("expected.json")).expect("expected.json fixture must exist")
}

fn cmd() -> Command {
    Command::cargo_bin("free-slots").unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// Input sources
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn file_to_stdout() {
    cmd()
        .arg(fixture("events.json"))
        .assert()
        .success()
        .stdout(expected_output());
}

#[test]
fn stdin_to_stdout() {
    let input = std::fs::read_to_string(fixture("events.json")).unwrap();

    cmd()
        .write_stdin(input)
        .assert()
        .success()
        .stdout(expected_output());
}

#[test]
fn dash_reads_stdin() {
    let input = r#"[{"start":{"dateTime":"2024-01-15T09:00:00+00:00"},"end":{"dateTime":"2024-01-15T10:00:00+00:00"}}]"#;

    let output = cmd().arg("-").write_stdin(input).output().unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "2024-01-15": [
                {"start_time": "07:00:00", "end_time": "09:00:00"},
                {"start_time": "10:00:00", "end_time": "00:00:00"}
            ]
        })
    );
}

#[test]
fn items_wrapper_is_accepted() {
    let input = r#"{"kind":"calendar#events","items":[
        {"start":{"dateTime":"2024-01-15T09:00:00Z"},"end":{"dateTime":"2024-01-15T10:00:00Z"}},
        {"start":{"dateTime":"2024-01-17T09:00:00Z"},"end":{"dateTime":"2024-01-17T10:00:00Z"}}
    ]}"#;

    cmd()
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"2024-01-16\""));
}

// ─────────────────────────────────────────────────────────────────────────────
// Output
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn file_to_file() {
    let output_path = std::env::temp_dir().join("free-slots-test-output.json");
    let _ = std::fs::remove_file(&output_path);

    cmd()
        .arg(fixture("events.json"))
        .arg("-o")
        .arg(&output_path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let content = std::fs::read_to_string(&output_path).expect("output file must exist");
    assert_eq!(content.trim_end(), expected_output().trim_end());

    let _ = std::fs::remove_file(&output_path);
}

#[test]
fn dates_are_printed_in_ascending_order() {
    let input = r#"[
        {"start":{"dateTime":"2024-01-17T09:00:00Z"},"end":{"dateTime":"2024-01-17T10:00:00Z"}},
        {"start":{"dateTime":"2024-01-15T09:00:00Z"},"end":{"dateTime":"2024-01-15T10:00:00Z"}}
    ]"#;

    let output = cmd().write_stdin(input).output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();

    let first = stdout.find("2024-01-15").unwrap();
    let second = stdout.find("2024-01-16").unwrap();
    let third = stdout.find("2024-01-17").unwrap();
    assert!(first < second && second < third, "stdout: {}", stdout);
}

// ─────────────────────────────────────────────────────────────────────────────
// Failures
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn empty_event_list_fails() {
    cmd()
        .write_stdin("[]")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Empty input"));
}

#[test]
fn malformed_record_fails_without_partial_output() {
    cmd()
        .arg(fixture("malformed.json"))
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("index 1"))
        .stderr(predicate::str::contains("start.dateTime"));
}

#[test]
fn invalid_json_fails() {
    cmd()
        .write_stdin("this is not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("JSON error"));
}

#[test]
fn missing_file_fails() {
    cmd()
        .arg("/nonexistent/free-slots/events.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("/nonexistent/free-slots/events.json"));
}

#[test]
fn unreachable_url_fails() {
    cmd()
        .args(["http://127.0.0.1:9/events.json", "--timeout", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Fetch error"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Flags
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn help_flag_shows_usage() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("free-slots"))
        .stdout(predicate::str::contains("--output"));
}

#[test]
fn unknown_flag_fails() {
    cmd()
        .arg("--window")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error").or(predicate::str::contains("unexpected")));
}
