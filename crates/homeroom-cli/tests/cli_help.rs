use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_all_commands() {
    cargo_bin_cmd!("homeroom")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("logout"))
        .stdout(predicate::str::contains("whoami"))
        .stdout(predicate::str::contains("forgot-password"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_help_shows_reset_flags() {
    cargo_bin_cmd!("homeroom")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--reset-token"))
        .stdout(predicate::str::contains("--reset-email"));
}

#[test]
fn test_reset_flags_require_each_other() {
    cargo_bin_cmd!("homeroom")
        .args(["--reset-token", "reset-abc123"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--reset-email"));

    cargo_bin_cmd!("homeroom")
        .args(["--reset-email", "head@brookfield.test"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--reset-token"));
}

#[test]
fn test_config_help_shows_subcommands() {
    cargo_bin_cmd!("homeroom")
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("path"))
        .stdout(predicate::str::contains("init"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("homeroom")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("1.0"));
}
