use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_cli_show_program() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("show.txt");
    fs::write(&file, "A+B=>C # conjunction\nC <=> D\n=A\n?D\n").unwrap();

    let mut cmd = Command::cargo_bin("deduce").unwrap();
    cmd.arg("show").arg(&file);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("rules (2):"))
        .stdout(predicate::str::contains("  - A + B => C"))
        .stdout(predicate::str::contains("  - C <=> D"))
        .stdout(predicate::str::contains("facts: =A"))
        .stdout(predicate::str::contains("queries: ?D"))
        .stdout(predicate::str::contains("Produced by"));
}

#[test]
fn test_cli_show_invalid_program() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("empty.txt");
    fs::write(&file, "# nothing here\n").unwrap();

    let mut cmd = Command::cargo_bin("deduce").unwrap();
    cmd.arg("show").arg(&file);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Empty input"));
}
