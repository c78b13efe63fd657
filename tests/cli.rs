//! Integration tests for the `unellipsis` command-line interface.
//!
//! Covers stdin and file input, `--in-place`, `--chat`, `--check`, settings
//! files and the cleaning flags.

use std::fs;

#[macro_use]
mod prelude;
use prelude::*;

/// Verifies that `--in-place` without a file is rejected.
#[test]
fn test_cli_in_place_requires_file() {
    run_cli_with_args(&["--in-place"]).failure();
}

#[test]
fn test_cli_check_conflicts_with_in_place() {
    run_cli_with_args(&["--check", "--in-place", "a.txt"]).failure();
}

/// Verifies that `--version` prints the crate version and exits.
#[test]
fn test_cli_version_flag() {
    run_cli_with_args(&["--version"])
        .success()
        .stdout(format!("unellipsis {}\n", env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_stdin_default_options() {
    run_cli_with_stdin(&[], "foo...bar `x...` baz...\n")
        .success()
        .stdout("foo bar `x...` baz\n");
}

#[rstest]
#[case(&["--two-dots"], "so.. yes 1..2\n", "so yes 1..2\n")]
#[case(&["--all-dots"], "v1.2 ok.\n", "v1 2 ok\n")]
#[case(&["--no-preserve-space"], "a... b...c\n", "abc\n")]
#[case(&["--no-protect-code"], "`a...b`\n", "`a b`\n")]
fn test_cli_flags(#[case] args: &[&str], #[case] input: &str, #[case] expected: &str) {
    run_cli_with_stdin(args, input).success().stdout(expected.to_string());
}

#[test]
fn test_cli_check_reports_count() {
    run_cli_with_stdin(&["--check"], "a... b…\n")
        .success()
        .stdout("4\n");
}

#[test]
fn test_cli_in_place_rewrites_file() {
    let dir = tempdir().expect("failed to create temporary directory");
    let file_path = dir.path().join("notes.txt");
    fs::write(&file_path, "well... ok\n").expect("failed to write test file");
    run_cli_with_args(&[
        "--in-place",
        file_path.to_str().expect("path is not valid UTF-8"),
    ])
    .success()
    .stdout("");
    let out = fs::read_to_string(&file_path).expect("failed to read output file");
    assert_eq!(out, "well ok\n");
}

#[test]
fn test_cli_settings_file_is_backfilled() {
    let dir = tempdir().expect("failed to create temporary directory");
    let settings = dir.path().join("settings.json");
    fs::write(&settings, r#"{ "treatTwoDots": true, "preserveSpace": 0 }"#)
        .expect("failed to write settings");
    run_cli_with_stdin(
        &["--settings", settings.to_str().expect("path is not valid UTF-8")],
        "so.. yes `a..`\n",
    )
    .success()
    .stdout("soyes `a..`\n");
}

#[test]
fn test_cli_malformed_settings_fail() {
    let dir = tempdir().expect("failed to create temporary directory");
    let settings = dir.path().join("settings.json");
    fs::write(&settings, "{").expect("failed to write settings");
    run_cli_with_stdin(
        &["--settings", settings.to_str().expect("path is not valid UTF-8")],
        "x\n",
    )
    .failure()
    .stderr(predicate::str::contains("settings.json"));
}

#[test]
fn test_cli_chat_mode() {
    let input = concat!(
        r#"{"user_name":"You","character_name":"Bot"}"#,
        "\n",
        r#"{"name":"Bot","mes":"Hmm... sure","extra":{"original":"Hmm... sure"},"swipe_id":0}"#,
        "\n",
    );
    let expected = concat!(
        r#"{"user_name":"You","character_name":"Bot"}"#,
        "\n",
        r#"{"name":"Bot","mes":"Hmm sure","extra":{"original":"Hmm sure"},"swipe_id":0}"#,
        "\n",
    );
    run_cli_with_stdin(&["--chat"], input).success().stdout(expected);
}

#[test]
fn test_cli_chat_check_counts_primary_only() {
    let input = r#"{"mes":"a...","extra":{"display_text":"b..."}}"#;
    run_cli_with_stdin(&["--chat", "--check"], input)
        .success()
        .stdout("3\n");
}

#[test]
fn test_cli_chat_invalid_line_fails() {
    run_cli_with_stdin(&["--chat"], "{}\nnope\n")
        .failure()
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn test_cli_quiet_suppresses_notices() {
    run_cli_with_stdin(&["--quiet"], "a...\n")
        .success()
        .stdout("a\n")
        .stderr("");
}

#[test]
fn test_cli_logs_removal_notice() {
    run_cli_with_stdin(&[], "a...\n")
        .success()
        .stderr(predicate::str::contains("Removed 3 dots."));
}

#[test]
fn test_cli_in_place_chat_rewrites_only_when_cleaned() {
    let dir = tempdir().expect("failed to create temporary directory");
    let untouched = "{ \"mes\": \"nothing to do\" }\n";
    let plain = write_fixture(dir.path(), "plain.jsonl", untouched);
    let dotted = write_fixture(dir.path(), "dotted.jsonl", "{ \"mes\": \"so... yes\" }\n");

    run_cli_with_args(&["--chat", "--in-place", arg(&plain), arg(&dotted)])
        .success()
        .stdout("");

    assert_eq!(fs::read_to_string(&plain).expect("readable"), untouched);
    assert_eq!(
        fs::read_to_string(&dotted).expect("readable"),
        "{\"mes\":\"so yes\"}\n"
    );
}

#[test]
fn test_cli_chat_file_error_names_file_and_line() {
    let dir = tempdir().expect("failed to create temporary directory");
    let chat = write_fixture(dir.path(), "broken.jsonl", "{}\nnope\n");
    run_cli_with_args(&["--chat", arg(&chat)])
        .failure()
        .stderr(predicate::str::contains("broken.jsonl:2"));
}
