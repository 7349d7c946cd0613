//! End-to-end tests of the creplay binary.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use crate::helpers::fixture;

/// Binary with colors off and an isolated (missing) config file.
fn creplay(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("creplay").unwrap();
    cmd.env("NO_COLOR", "1")
        .env_remove("CREPLAY_LOG")
        .arg("--config")
        .arg(config_dir.path().join("config.toml"));
    cmd
}

#[test]
fn show_prints_every_file_at_the_end() {
    let dir = TempDir::new().unwrap();
    creplay(&dir)
        .arg("show")
        .arg(fixture("sample.srt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("==> main.rs (rust) <=="))
        .stdout(predicate::str::contains("println!(\"hello\");"))
        .stdout(predicate::str::contains("==> README.md (markdown) <=="));
}

#[test]
fn show_at_time_for_one_file() {
    let dir = TempDir::new().unwrap();
    creplay(&dir)
        .args(["show", "--at", "00:01.5", "--file", "main.rs"])
        .arg(fixture("sample.srt"))
        .assert()
        .success()
        .stdout("fn main() {\n    println!(\"hi\");\n}\n");
}

#[test]
fn show_unknown_file_fails() {
    let dir = TempDir::new().unwrap();
    creplay(&dir)
        .args(["show", "--file", "lib.rs"])
        .arg(fixture("sample.csv"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No file named 'lib.rs'"))
        .stderr(predicate::str::contains("app.js, style.css"));
}

#[test]
fn info_summarizes_recording() {
    let dir = TempDir::new().unwrap();
    creplay(&dir)
        .arg("info")
        .arg(fixture("sample.csv"))
        .assert()
        .success()
        .stdout(predicate::str::contains("CSV"))
        .stdout(predicate::str::contains("00:01.500"))
        .stdout(predicate::str::contains("Files (2):"))
        .stdout(predicate::str::contains("app.js [javascript] 3 events"));
}

#[test]
fn unsupported_recording_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.cast");
    fs::write(&path, "{}").unwrap();

    creplay(&dir)
        .arg("info")
        .arg(&path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("srt, csv, json"));
}

#[test]
fn play_rejects_empty_recording_before_opening_the_terminal() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.json");
    fs::write(&path, "[]").unwrap();

    creplay(&dir)
        .arg("play")
        .arg(&path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("contains no events"));
}

#[test]
fn invalid_time_is_a_usage_error() {
    let dir = TempDir::new().unwrap();
    creplay(&dir)
        .args(["show", "--at", "soon"])
        .arg(fixture("sample.srt"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid time"));
}

#[test]
fn missing_subcommand_is_a_usage_error() {
    Command::cargo_bin("creplay").unwrap().assert().code(2);
}

#[test]
fn config_show_reads_custom_file() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("config.toml"),
        "[player]\ntick_interval_ms = 250\n",
    )
    .unwrap();

    creplay(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tick_interval_ms = 250"))
        .stdout(predicate::str::contains("follow_events = true"));
}

#[test]
fn invalid_config_is_reported() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.toml"), "[player]\nspeed = 0.0\n").unwrap();

    creplay(&dir)
        .args(["config", "show"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid config file"));
}

#[test]
fn completions_are_generated() {
    let dir = TempDir::new().unwrap();
    creplay(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("creplay"));
}
