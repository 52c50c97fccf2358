use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_cli_batch_all_files_answered() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("one.txt"), "A => B\n=A\n?B\n").unwrap();
    fs::create_dir(temp_dir.path().join("nested")).unwrap();
    fs::write(
        temp_dir.path().join("nested").join("two.txt"),
        "A <=> B\n=B\n?A\n",
    )
    .unwrap();
    fs::write(temp_dir.path().join("notes.md"), "not a rule file").unwrap();

    let mut cmd = Command::cargo_bin("deduce").unwrap();
    cmd.arg("batch").arg(temp_dir.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("one.txt"))
        .stdout(predicate::str::contains("two.txt"))
        .stdout(predicate::str::contains("notes.md").not())
        .stdout(predicate::str::contains("2 files, 2 answered, 0 failed"));
}

#[test]
fn test_cli_batch_reports_failures() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("good.txt"), "A => B\n=A\n?B\n").unwrap();
    fs::write(
        temp_dir.path().join("bad.txt"),
        "A => C\nB => !C\n=AB\n?C\n",
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("deduce").unwrap();
    cmd.arg("batch").arg(temp_dir.path());

    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("2 files, 1 answered, 1 failed"))
        .stderr(predicate::str::contains("1 of 2 files failed"));
}

#[test]
fn test_cli_batch_custom_extension() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("rules.es"), "A => B\n=A\n?B\n").unwrap();
    fs::write(temp_dir.path().join("ignored.txt"), "garbage").unwrap();

    let mut cmd = Command::cargo_bin("deduce").unwrap();
    cmd.arg("batch").arg(temp_dir.path()).arg("--ext").arg("es");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("B=true"))
        .stdout(predicate::str::contains("1 files, 1 answered, 0 failed"));
}
