use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_rules(temp_dir: &TempDir, name: &str, code: &str) -> PathBuf {
    let path = temp_dir.path().join(name);
    fs::write(&path, code).unwrap();
    path
}

#[test]
fn test_cli_run_simple_program() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_rules(
        &temp_dir,
        "simple.txt",
        r#"
A => B
B + C => D
=AC
?BD
"#,
    );

    let mut cmd = Command::cargo_bin("deduce").unwrap();
    cmd.arg("run").arg(&file);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Query"))
        .stdout(predicate::str::contains("B"))
        .stdout(predicate::str::contains("D"))
        .stdout(predicate::str::contains("true"));
}

#[test]
fn test_cli_run_raw_output() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_rules(&temp_dir, "raw.txt", "A + B => C\n=A\n?CZ\n");

    let mut cmd = Command::cargo_bin("deduce").unwrap();
    cmd.arg("run").arg(&file).arg("--raw");

    cmd.assert()
        .success()
        .stdout(predicate::str::diff("C=false\nZ=undetermined\n"));
}

#[test]
fn test_cli_run_with_fact_override() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_rules(&temp_dir, "override.txt", "A + B => C\n=A\n?C\n");

    let mut cmd = Command::cargo_bin("deduce").unwrap();
    cmd.arg("run").arg(&file).arg("-f").arg("AB").arg("--raw");

    cmd.assert().success().stdout(predicate::str::diff("C=true\n"));
}

#[test]
fn test_cli_run_with_query_override() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_rules(&temp_dir, "queries.txt", "A => B\nB => C\n=A\n?C\n");

    let mut cmd = Command::cargo_bin("deduce").unwrap();
    cmd.arg("run")
        .arg(&file)
        .arg("--queries")
        .arg("BA")
        .arg("--raw");

    cmd.assert()
        .success()
        .stdout(predicate::str::diff("B=true\nA=true\n"));
}

#[test]
fn test_cli_run_invalid_fact_override() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_rules(&temp_dir, "bad_override.txt", "A => B\n=A\n?B\n");

    let mut cmd = Command::cargo_bin("deduce").unwrap();
    cmd.arg("run").arg(&file).arg("-f").arg("a1");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid symbol list"));
}

#[test]
fn test_cli_run_json_output() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_rules(&temp_dir, "json.txt", "A <=> B\n=A\n?B\n");

    let mut cmd = Command::cargo_bin("deduce").unwrap();
    cmd.arg("run").arg(&file).arg("--json");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(r#""queries""#))
        .stdout(predicate::str::contains(r#""value": "true""#))
        .stdout(predicate::str::contains(r#""type": "settled""#));
}

#[test]
fn test_cli_run_explain() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_rules(&temp_dir, "explain.txt", "A + B => C\n=A\n?C\n");

    let mut cmd = Command::cargo_bin("deduce").unwrap();
    cmd.arg("run").arg(&file).arg("--explain");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("nothing proves B, so it is false"))
        .stdout(predicate::str::contains("C is false"));
}

#[test]
fn test_cli_run_contradiction() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_rules(&temp_dir, "contradiction.txt", "A => C\nB => !C\n=AB\n?C\n");

    let mut cmd = Command::cargo_bin("deduce").unwrap();
    cmd.arg("run").arg(&file);

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Contradiction"))
        .stderr(predicate::str::contains("B => !C"))
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_cli_run_parse_error() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_rules(&temp_dir, "broken.txt", "A => B\nA + => C\n?C\n");

    let mut cmd = Command::cargo_bin("deduce").unwrap();
    cmd.arg("run").arg(&file);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Parse error"))
        .stderr(predicate::str::contains("broken.txt"));
}

#[test]
fn test_cli_run_duplicate_fact() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_rules(&temp_dir, "dup.txt", "A => B\n=AA\n?B\n");

    let mut cmd = Command::cargo_bin("deduce").unwrap();
    cmd.arg("run").arg(&file);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Duplicate fact: 'A'"));
}

#[test]
fn test_cli_run_duplicate_fact_override() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_rules(&temp_dir, "dup_override.txt", "A => B\n=A\n?B\n");

    let mut cmd = Command::cargo_bin("deduce").unwrap();
    cmd.arg("run").arg(&file).arg("-f").arg("AA");

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Duplicate fact: 'A'"))
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_cli_run_deeply_nested_rule() {
    let temp_dir = TempDir::new().unwrap();
    let code = format!("{}A{} => B\n?B\n", "(".repeat(1000), ")".repeat(1000));
    let file = write_rules(&temp_dir, "deep.txt", &code);

    let mut cmd = Command::cargo_bin("deduce").unwrap();
    cmd.arg("run").arg(&file);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Resource limit exceeded: max_expression_depth"));
}

#[test]
fn test_cli_run_missing_file() {
    let temp_dir = TempDir::new().unwrap();

    let mut cmd = Command::cargo_bin("deduce").unwrap();
    cmd.arg("run").arg(temp_dir.path().join("nope.txt"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}
