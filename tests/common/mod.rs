//! Utility helpers shared across integration tests.

use std::{
    fs,
    path::{Path, PathBuf},
};

use assert_cmd::{Command, assert::Assert};

/// Build a chat from primary message texts.
macro_rules! chat_vec {
    ($($text:expr),* $(,)?) => {
        vec![$(unellipsis::Message::new($text)),*]
    };
}

/// Run the binary with `args`, feeding `input` on stdin.
pub fn run_cli_with_stdin(args: &[&str], input: &str) -> Assert {
    Command::cargo_bin("unellipsis")
        .expect("Failed to create cargo command for unellipsis")
        .args(args)
        .write_stdin(input)
        .assert()
}

/// Run the binary with `args` and no stdin.
pub fn run_cli_with_args(args: &[&str]) -> Assert {
    Command::cargo_bin("unellipsis")
        .expect("Failed to create cargo command for unellipsis")
        .args(args)
        .assert()
}

/// Write `contents` to `name` inside `dir` and return the file's path.
pub fn write_fixture(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("failed to write fixture");
    path
}

/// A fixture path as a CLI argument.
pub fn arg(path: &Path) -> &str {
    path.to_str().expect("path is not valid UTF-8")
}
