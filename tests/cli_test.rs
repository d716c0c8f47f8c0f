use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn wallet(data_dir: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin!("wallet"));
    cmd.arg("--data-dir").arg(data_dir);
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().expect("Failed to execute command");
    assert!(output.status.success(), "{output:?}");
    String::from_utf8(output.stdout).unwrap().trim().to_string()
}

#[test]
fn test_cli_end_to_end() {
    let dir = tempdir().unwrap();

    let id = stdout_of(wallet(dir.path()).args(["register", "+992000000001"]));
    assert_eq!(id, "1");

    wallet(dir.path())
        .args(["deposit", "1", "5000"])
        .assert()
        .success();
    let first = stdout_of(wallet(dir.path()).args(["pay", "1", "3000", "auto"]));
    stdout_of(wallet(dir.path()).args(["pay", "1", "1000", "food"]));

    wallet(dir.path())
        .args(["sum", "--workers", "2"])
        .assert()
        .success()
        .stdout("4000\n");

    wallet(dir.path())
        .args(["sum", "--progress"])
        .assert()
        .success()
        .stdout("4000\n");

    wallet(dir.path()).args(["reject", first.as_str()]).assert().success();

    let accounts = fs::read_to_string(dir.path().join("accounts.dump")).unwrap();
    assert_eq!(accounts, "1;+992000000001;4000");
    let payments = fs::read_to_string(dir.path().join("payments.dump")).unwrap();
    assert!(payments.contains(&format!("{first};1;3000;auto;FAIL")));
}

#[test]
fn test_cli_filter_prints_json_lines() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("accounts.dump"), "1;+992000000001;0").unwrap();
    fs::write(
        dir.path().join("payments.dump"),
        "a;1;10;auto;OK\nb;2;20;food;OK\nc;1;30;food;INPROGRESS",
    )
    .unwrap();

    let output = stdout_of(wallet(dir.path()).args(["filter", "1", "--workers", "3"]));
    assert_eq!(output.lines().count(), 2);
    assert!(output.contains(r#""id":"a""#));
    assert!(output.contains(r#""id":"c""#));
    assert!(!output.contains(r#""id":"b""#));
}

#[test]
fn test_cli_filter_without_matches_fails() {
    let dir = tempdir().unwrap();

    wallet(dir.path())
        .args(["filter", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("account not found"));
}

#[test]
fn test_cli_rejects_malformed_dump() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("payments.dump"), "a;1;10;auto").unwrap();

    wallet(dir.path())
        .args(["sum"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("decode error"));
}

#[test]
fn test_cli_not_enough_balance() {
    let dir = tempdir().unwrap();
    stdout_of(wallet(dir.path()).args(["register", "+992000000001"]));

    wallet(dir.path())
        .args(["pay", "1", "10", "auto"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not enough balance"));
    assert!(!dir.path().join("payments.dump").exists());
}

#[test]
fn test_cli_compact_export_and_history() {
    let dir = tempdir().unwrap();
    stdout_of(wallet(dir.path()).args(["register", "+992000000001"]));
    wallet(dir.path())
        .args(["deposit", "1", "100"])
        .assert()
        .success();
    for _ in 0..3 {
        stdout_of(wallet(dir.path()).args(["pay", "1", "10", "auto"]));
    }

    let compact = dir.path().join("accounts.txt");
    wallet(dir.path())
        .arg("export-compact")
        .arg(&compact)
        .assert()
        .success();
    assert_eq!(fs::read_to_string(&compact).unwrap(), "1;+992000000001;70");

    let backup = dir.path().join("backup");
    wallet(dir.path())
        .args(["history", "1", "--records", "2", "--out"])
        .arg(&backup)
        .assert()
        .success();
    assert!(backup.join("payments1.dump").exists());
    assert!(backup.join("payments2.dump").exists());
}

#[test]
fn test_cli_deposit_overflow_keeps_data_dir_usable() {
    let dir = tempdir().unwrap();
    stdout_of(wallet(dir.path()).args(["register", "+992000000001"]));
    let max = i64::MAX.to_string();

    wallet(dir.path())
        .args(["deposit", "1", max.as_str()])
        .assert()
        .success();
    wallet(dir.path())
        .args(["deposit", "1", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("amount out of range"));

    let accounts = fs::read_to_string(dir.path().join("accounts.dump")).unwrap();
    assert_eq!(accounts, format!("1;+992000000001;{max}"));
}

#[test]
fn test_cli_separator_in_category_keeps_data_dir_usable() {
    let dir = tempdir().unwrap();
    stdout_of(wallet(dir.path()).args(["register", "+992000000001"]));
    wallet(dir.path()).args(["deposit", "1", "100"]).assert().success();

    wallet(dir.path())
        .args(["pay", "1", "10", "food;drinks"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("reserved separator"));

    let id = stdout_of(wallet(dir.path()).args(["pay", "1", "10", "food"]));
    assert!(!id.is_empty());
}
