use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_all_commands() {
    cargo_bin_cmd!("rowcast")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("demo"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_demo_help_shows_flags() {
    cargo_bin_cmd!("rowcast")
        .args(["demo", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--slots"))
        .stdout(predicate::str::contains("--steps"))
        .stdout(predicate::str::contains("--interval-ms"))
        .stdout(predicate::str::contains("--bar-width"))
        .stdout(predicate::str::contains("--plain"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("rowcast")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("rowcast"));
}

#[test]
fn test_missing_subcommand_fails() {
    cargo_bin_cmd!("rowcast").assert().failure();
}

#[test]
fn test_config_help_shows_subcommands() {
    cargo_bin_cmd!("rowcast")
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("path"))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("show"));
}
