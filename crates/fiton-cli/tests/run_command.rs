use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

#[allow(deprecated)]
fn fiton_bin() -> PathBuf {
    assert_cmd::cargo::cargo_bin("fiton-e2e")
}

fn fiton() -> Command {
    let mut cmd = Command::new(fiton_bin());
    cmd.env_remove("FITON_BASE_URL")
        .env_remove("FITON_WAIT_TIMEOUT")
        .env_remove("FITON_CHROME");
    cmd
}

#[test]
fn test_run_help_lists_flags() {
    fiton()
        .arg("run")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--base-url"))
        .stdout(predicate::str::contains("--timeout"))
        .stdout(predicate::str::contains("--scenario"))
        .stdout(predicate::str::contains("--headless"))
        .stdout(predicate::str::contains("--chrome-path"))
        .stdout(predicate::str::contains("https://localhost:4403"));
}

#[test]
fn test_run_rejects_unmatched_scenario() {
    fiton()
        .arg("run")
        .arg("-s")
        .arg("checkout-*")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No scenarios match: checkout-*"));
}

#[test]
fn test_default_command_rejects_unmatched_scenario() {
    fiton()
        .arg("--scenario")
        .arg("nope")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No scenarios match"));
}

#[test]
fn test_run_rejects_invalid_base_url() {
    fiton()
        .arg("run")
        .arg("--base-url")
        .arg("ftp://localhost")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn test_run_reads_base_url_from_env() {
    fiton()
        .env("FITON_BASE_URL", "not a url")
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn test_run_reports_missing_chrome() {
    fiton()
        .arg("run")
        .arg("--chrome-path")
        .arg("/nonexistent/chrome")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Chrome not found"));
}

#[test]
fn test_run_rejects_invalid_timeout() {
    fiton()
        .arg("run")
        .arg("--timeout")
        .arg("soon")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
