//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

/// Run from an empty directory so no stray `.env` is picked up
fn expensectl(dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("expensectl").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("DATABASE_URL")
        .env_remove("EXPENSES_BIND")
        .env_remove("LOG_FORMAT")
        .env_remove("HANDLER_SECRET_CODE")
        .env_remove("DATABASE_MAX_CONNECTIONS");
    cmd
}

#[test]
fn test_top_level_help_lists_commands() {
    let dir = tempfile::tempdir().unwrap();
    expensectl(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("migrate"));
}

#[test]
fn test_serve_help() {
    let dir = tempfile::tempdir().unwrap();
    expensectl(&dir)
        .args(["serve", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--ephemeral"))
        .stdout(predicate::str::contains("--handler-secret"));
}

#[test]
fn test_migrate_requires_database_url() {
    let dir = tempfile::tempdir().unwrap();
    expensectl(&dir)
        .arg("migrate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("DATABASE_URL not set"));
}

#[test]
fn test_serve_rejects_bad_bind_env() {
    let dir = tempfile::tempdir().unwrap();
    expensectl(&dir)
        .env("EXPENSES_BIND", "not-an-address")
        .args(["serve", "--ephemeral"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("EXPENSES_BIND"));
}

#[test]
fn test_ephemeral_conflicts_with_database_url() {
    let dir = tempfile::tempdir().unwrap();
    expensectl(&dir)
        .args(["serve", "--ephemeral", "--database-url", "postgres://localhost/x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_max_connections_must_be_positive() {
    let dir = tempfile::tempdir().unwrap();
    expensectl(&dir)
        .args(["serve", "--ephemeral", "--max-connections", "0"])
        .assert()
        .failure();
}
