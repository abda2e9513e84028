use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

mod common;

#[test]
fn test_malformed_csv_handling() {
    let file = common::debts_file(&[
        // Valid debt
        "a,,100,0,50",
        // Text in amount field
        "b,,lots,5,10",
        // Non-numeric rate
        "c,,100,high,10",
        // Valid debt again
        "d,,200,0,100",
    ]);

    let mut cmd = Command::new(cargo_bin!("debtplan"));
    cmd.arg(file.path())
        .args(["--start", "2026-01-15"])
        .arg("plan");

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Error reading debt"))
        .stdout(predicate::str::contains("a,2,2026-03-15,50,50,0,0"))
        .stdout(predicate::str::contains("d,2,2026-03-15,100,100,0,0"))
        .stdout(predicate::str::contains("b,").not());
}

#[test]
fn test_negative_values_are_rejected() {
    let file = common::debts_file(&["a,,-100,5,10"]);

    let mut cmd = Command::new(cargo_bin!("debtplan"));
    cmd.arg(file.path()).arg("plan");

    cmd.assert().failure().stderr(predicate::str::contains(
        "Invalid input for debt a: remaining amount must not be negative",
    ));
}

#[test]
fn test_missing_minimum_without_rule_is_rejected() {
    let file = common::debts_file(&["a,,100,5,"]);

    let mut cmd = Command::new(cargo_bin!("debtplan"));
    cmd.arg(file.path()).arg("plan");

    cmd.assert().failure().stderr(predicate::str::contains(
        "Invalid input for debt a: minimum payment is required",
    ));
}

#[test]
fn test_duplicate_ids_keep_last_record() {
    let file = common::debts_file(&["a,,100,0,50", "a,,300,0,100"]);

    let mut cmd = Command::new(cargo_bin!("debtplan"));
    cmd.arg(file.path())
        .args(["--start", "2026-01-15"])
        .arg("plan");

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Duplicate debt id a"))
        .stdout(predicate::str::contains("a,3,2026-04-15,100,100,0,0"));
}

#[test]
fn test_paid_off_debt_produces_no_rows() {
    let file = common::debts_file(&["done,,0,12,50", "open,,100,0,100"]);

    let mut cmd = Command::new(cargo_bin!("debtplan"));
    cmd.arg(file.path())
        .args(["--start", "2026-01-15"])
        .args(["strategy", "--budget", "100"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("open,1,2026-02-15,100,100,0,0"))
        .stdout(predicate::str::contains("done,").not());
}
