//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

fn oncall() -> Command {
    let mut cmd = Command::cargo_bin("oncall").unwrap();
    // Keep a developer's .env out of the picture
    cmd.current_dir(std::env::temp_dir());
    cmd.env_remove("DATABASE_URL").env_remove("ONCALL_BIND");
    cmd
}

#[test]
fn test_help_lists_subcommands() {
    oncall()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("migrate"));
}

#[test]
fn test_serve_help() {
    oncall()
        .arg("serve")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--allow-origin"))
        .stdout(predicate::str::contains("--enable-setup"))
        .stdout(predicate::str::contains("--max-connections"));
}

#[test]
fn test_migrate_help() {
    oncall()
        .arg("migrate")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--no-seed"));
}

#[test]
fn test_migrate_without_database_url_fails() {
    oncall()
        .arg("migrate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("DATABASE_URL not set"));
}

#[test]
fn test_serve_rejects_bad_bind_address() {
    oncall()
        .arg("serve")
        .arg("--bind")
        .arg("not-an-address")
        .assert()
        .failure();
}

#[test]
fn test_unknown_subcommand_fails() {
    oncall().arg("rota").assert().failure();
}
