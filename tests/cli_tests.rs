//! CLI integration tests
//!
//! Each test runs the binary against a throwaway home directory so config
//! and library state never touch the real user dirs.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn wavemark_in(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("wavemark").expect("binary builds");
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env("XDG_DATA_HOME", home.path().join(".local/share"));
    cmd
}

#[test]
fn help_output() {
    let home = TempDir::new().unwrap();
    wavemark_in(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("cue-point"))
        .stdout(predicate::str::contains("--name"))
        .stdout(predicate::str::contains("--device"))
        .stdout(predicate::str::contains("--output"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn version_output() {
    let home = TempDir::new().unwrap();
    wavemark_in(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("wavemark"));
}

#[test]
fn config_path_points_into_home() {
    let home = TempDir::new().unwrap();
    wavemark_in(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("wavemark"))
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn config_init_writes_defaults() {
    let home = TempDir::new().unwrap();
    wavemark_in(&home).args(["config", "init"]).assert().success();

    wavemark_in(&home)
        .args(["config", "get", "live_gain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("6"));
}

#[test]
fn config_set_then_get() {
    let home = TempDir::new().unwrap();
    wavemark_in(&home).args(["config", "init"]).assert().success();
    wavemark_in(&home)
        .args(["config", "set", "live_gain", "7.5"])
        .assert()
        .success();

    wavemark_in(&home)
        .args(["config", "get", "live_gain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("7.5"));
}

#[test]
fn config_set_rejects_unknown_key() {
    let home = TempDir::new().unwrap();
    wavemark_in(&home)
        .args(["config", "set", "volume", "11"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown key"));
}

#[test]
fn config_set_rejects_non_numeric_gain() {
    let home = TempDir::new().unwrap();
    wavemark_in(&home).args(["config", "init"]).assert().success();
    wavemark_in(&home)
        .args(["config", "set", "live_gain", "loud"])
        .assert()
        .failure();
}

#[test]
fn list_on_empty_library() {
    let home = TempDir::new().unwrap();
    wavemark_in(&home)
        .arg("list")
        .assert()
        .success()
        .stderr(predicate::str::contains("No recordings yet"));
}

#[test]
fn clear_requires_confirmation_flag() {
    let home = TempDir::new().unwrap();
    wavemark_in(&home)
        .arg("clear")
        .assert()
        .success()
        .stderr(predicate::str::contains("--yes"));
}

#[test]
fn rename_unknown_recording_fails() {
    let home = TempDir::new().unwrap();
    wavemark_in(&home)
        .args(["rename", "does-not-exist", "New name"])
        .assert()
        .failure();
}
