//! Integration tests for the PassVault CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`.
//! The master password is supplied through `PASSVAULT_PASSWORD`, so no
//! test needs a terminal; entry passwords are passed inline or on stdin.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

const MASTER: &str = "Str0ng!Pass";

/// Helper: get a Command pointing at the passvault binary.
fn passvault() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("passvault").expect("binary should exist")
}

/// Helper: a command running inside `dir` with the master password set.
fn unlocked(dir: &TempDir) -> Command {
    let mut cmd = passvault();
    cmd.current_dir(dir.path()).env("PASSVAULT_PASSWORD", MASTER);
    cmd
}

/// Helper: a temp dir with an initialized vault.
fn initialized() -> TempDir {
    let tmp = TempDir::new().unwrap();
    unlocked(&tmp).arg("init").assert().success();
    tmp
}

// ---------------------------------------------------------------------------
// Help and usage
// ---------------------------------------------------------------------------

#[test]
fn help_flag_shows_usage() {
    passvault()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Local password manager protected by a master password",
        ))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("edit"))
        .stdout(predicate::str::contains("delete"))
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("export"))
        .stdout(predicate::str::contains("audit"));
}

#[test]
fn version_flag_shows_version() {
    passvault()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("passvault"));
}

#[test]
fn no_args_shows_help() {
    passvault()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

// ---------------------------------------------------------------------------
// generate (no vault needed)
// ---------------------------------------------------------------------------

#[test]
fn generate_prints_password_of_requested_length() {
    let tmp = TempDir::new().unwrap();
    let output = passvault()
        .args(["generate", "--length", "20"])
        .current_dir(tmp.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.trim_end().chars().count(), 20);
}

#[test]
fn generate_uses_configured_default_length() {
    let tmp = TempDir::new().unwrap();
    tmp.child(".passvault.toml")
        .write_str("generated_length = 16\n")
        .unwrap();

    let output = passvault()
        .arg("generate")
        .current_dir(tmp.path())
        .output()
        .unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.trim_end().chars().count(), 16);
}

#[test]
fn generate_rejects_too_short_length() {
    let tmp = TempDir::new().unwrap();
    passvault()
        .args(["generate", "--length", "3"])
        .current_dir(tmp.path())
        .assert()
        .failure();
}

// ---------------------------------------------------------------------------
// init
// ---------------------------------------------------------------------------

#[test]
fn init_writes_master_record() {
    let tmp = initialized();
    tmp.child(".passvault/master.hash")
        .assert("AJFWnBRZxg2dA0lXGu3w66QHVXldp2IytQ4OIX552hg=");
}

#[test]
fn init_rejects_weak_password() {
    let tmp = TempDir::new().unwrap();
    passvault()
        .arg("init")
        .current_dir(tmp.path())
        .env("PASSVAULT_PASSWORD", "weakpass")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Password rejected"));

    tmp.child(".passvault/master.hash")
        .assert(predicate::path::missing());
}

#[test]
fn init_twice_fails() {
    let tmp = initialized();
    unlocked(&tmp)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already configured"));
}

#[test]
fn init_respects_data_dir_flag() {
    let tmp = TempDir::new().unwrap();
    unlocked(&tmp)
        .args(["init", "--data-dir", "secrets"])
        .assert()
        .success();
    tmp.child("secrets/master.hash").assert(predicate::path::exists());
}

#[test]
fn list_before_init_fails() {
    let tmp = TempDir::new().unwrap();
    unlocked(&tmp)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("passvault init"));
}

// ---------------------------------------------------------------------------
// Entry management
// ---------------------------------------------------------------------------

#[test]
fn add_then_show_reveals_password() {
    let tmp = initialized();
    unlocked(&tmp)
        .args(["add", "GitHub", "dev@x.com", "hunter2"])
        .assert()
        .success();

    unlocked(&tmp)
        .args(["show", "1"])
        .assert()
        .success()
        .stdout("hunter2\n");

    // Stored encrypted on disk.
    tmp.child(".passvault/passwords.json")
        .assert(predicate::str::contains("8oqv5Ig/34czWLZgL1iE9w=="))
        .assert(predicate::str::contains("hunter2").not());
}

#[test]
fn add_reads_password_from_stdin() {
    let tmp = initialized();
    unlocked(&tmp)
        .args(["add", "Mail", "me"])
        .write_stdin("s3cret value\n")
        .assert()
        .success();

    unlocked(&tmp)
        .args(["show", "1"])
        .assert()
        .success()
        .stdout("s3cret value\n");
}

#[test]
fn add_rejects_empty_fields() {
    let tmp = initialized();
    unlocked(&tmp)
        .args(["add", "", "dev", "hunter2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("platform must not be empty"));
    unlocked(&tmp)
        .args(["add", "GitHub", "", "hunter2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("login must not be empty"));
    unlocked(&tmp)
        .args(["add", "GitHub", "dev"])
        .write_stdin("\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("password must not be empty"));

    tmp.child(".passvault/passwords.json")
        .assert(predicate::path::missing());
}

#[test]
fn edit_rejects_empty_login() {
    let tmp = initialized();
    unlocked(&tmp)
        .args(["add", "GitHub", "dev", "hunter2"])
        .assert()
        .success();

    unlocked(&tmp)
        .args(["edit", "1", "--login", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("login must not be empty"));
    unlocked(&tmp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("dev"));
}

#[test]
fn add_leaves_unreadable_entry_file_alone() {
    let tmp = initialized();
    let original = "[{\"platform\": \"GitHub\", \"login\": \"dev\", \"password\": \"x\"},]";
    tmp.child(".passvault/passwords.json")
        .write_str(original)
        .unwrap();

    unlocked(&tmp)
        .args(["add", "Bank", "c", "pw"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not load entries"))
        .stderr(predicate::str::contains("refusing to overwrite"));

    tmp.child(".passvault/passwords.json").assert(original);
}

#[test]
fn list_shows_platform_and_login_but_not_password() {
    let tmp = initialized();
    unlocked(&tmp)
        .args(["add", "GitHub", "dev@x.com", "hunter2"])
        .assert()
        .success();

    unlocked(&tmp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("GitHub"))
        .stdout(predicate::str::contains("dev@x.com"))
        .stdout(predicate::str::contains("hunter2").not());
}

#[test]
fn wrong_master_password_is_rejected() {
    let tmp = initialized();
    passvault()
        .arg("list")
        .current_dir(tmp.path())
        .env("PASSVAULT_PASSWORD", "Wr0ng!Pass")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid master password"));
}

#[test]
fn show_out_of_range_fails() {
    let tmp = initialized();
    unlocked(&tmp)
        .args(["show", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Entry #5 not found"));
}

#[test]
fn edit_changes_login_and_keeps_password() {
    let tmp = initialized();
    unlocked(&tmp)
        .args(["add", "GitHub", "dev", "hunter2"])
        .assert()
        .success();

    unlocked(&tmp)
        .args(["edit", "1", "--login", "ops"])
        .assert()
        .success();

    unlocked(&tmp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("ops"));
    unlocked(&tmp)
        .args(["show", "1"])
        .assert()
        .stdout("hunter2\n");
}

#[test]
fn edit_without_changes_fails() {
    let tmp = initialized();
    unlocked(&tmp)
        .args(["edit", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to change"));
}

#[test]
fn delete_with_force_removes_entry() {
    let tmp = initialized();
    unlocked(&tmp)
        .args(["add", "GitHub", "dev", "hunter2"])
        .assert()
        .success();
    unlocked(&tmp)
        .args(["add", "Mail", "me", "m4il!Pass"])
        .assert()
        .success();

    unlocked(&tmp)
        .args(["delete", "1", "--force"])
        .assert()
        .success();

    unlocked(&tmp)
        .args(["show", "1"])
        .assert()
        .success()
        .stdout("m4il!Pass\n");
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

#[test]
fn export_csv_writes_plaintext_file() {
    let tmp = initialized();
    unlocked(&tmp)
        .args(["add", "GitHub", "dev@x.com", "hunter2"])
        .assert()
        .success();

    unlocked(&tmp)
        .args(["export", "--format", "csv", "--output", "out.csv"])
        .assert()
        .success()
        .stderr(predicate::str::contains("plain text"));

    tmp.child("out.csv")
        .assert("Platform,Login,Password\nGitHub,dev@x.com,hunter2\n");
}

#[test]
fn export_json_to_stdout_stays_encrypted() {
    let tmp = initialized();
    unlocked(&tmp)
        .args(["add", "GitHub", "dev@x.com", "hunter2"])
        .assert()
        .success();

    unlocked(&tmp)
        .arg("export")
        .assert()
        .success()
        .stdout(predicate::str::contains("8oqv5Ig/34czWLZgL1iE9w=="))
        .stdout(predicate::str::contains("hunter2").not());
}

#[test]
fn export_refuses_to_overwrite_entry_file() {
    let tmp = initialized();
    unlocked(&tmp)
        .args(["export", "--output", ".passvault/passwords.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("refusing"));
}

#[test]
fn export_rejects_unknown_format() {
    let tmp = initialized();
    unlocked(&tmp)
        .args(["export", "--format", "xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown export format"));
}

// ---------------------------------------------------------------------------
// Audit log
// ---------------------------------------------------------------------------

#[cfg(feature = "audit-log")]
#[test]
fn audit_records_operations_without_secrets() {
    let tmp = initialized();
    unlocked(&tmp)
        .args(["add", "GitHub", "dev", "hunter2"])
        .assert()
        .success();
    passvault()
        .arg("list")
        .current_dir(tmp.path())
        .env("PASSVAULT_PASSWORD", "Wr0ng!Pass")
        .assert()
        .failure();

    passvault()
        .arg("audit")
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("setup"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("GitHub"))
        .stdout(predicate::str::contains("login-failed"))
        .stdout(predicate::str::contains("hunter2").not());
}

#[test]
fn audit_without_vault_reports_nothing() {
    let tmp = TempDir::new().unwrap();
    passvault()
        .arg("audit")
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No audit entries"));
}
