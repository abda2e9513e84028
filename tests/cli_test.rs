use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_cli_plan_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!());
    cmd.arg("tests/fixtures/debts.csv")
        .args(["--start", "2026-01-15"])
        .args(["plan", "--debt", "card"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "debt_id,month,date,payment,principal,interest,balance",
        ))
        // 2% monthly interest on 2000 is 40, leaving 20 of principal
        .stdout(predicate::str::contains("card,1,2026-02-15,60,20,40,1980"))
        .stdout(predicate::str::contains("car,").not());

    Ok(())
}

#[test]
fn test_cli_plan_all_debts_with_extra() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!());
    cmd.arg("tests/fixtures/debts.csv")
        .args(["--start", "2026-01-15"])
        .args(["plan", "--extra", "40"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("card,1,2026-02-15,100,60,40,1940"))
        .stdout(predicate::str::contains("car,1,2026-02-15,190,165,25,4835"))
        .stdout(predicate::str::contains("store,1,2026-02-15,65,57.5,7.5,442.5"));

    Ok(())
}

#[test]
fn test_cli_plan_json_amounts_match_csv() {
    let mut cmd = Command::new(cargo_bin!("debtplan"));
    cmd.arg("tests/fixtures/debts.csv")
        .args(["--start", "2026-01-15", "--format", "json"])
        .args(["plan", "--debt", "card"]);

    let output = cmd.output().unwrap();
    assert!(output.status.success());

    let plans: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let first = &plans[0]["entries"][0];
    assert_eq!(first["payment"], "60");
    assert_eq!(first["principal"], "20");
    assert_eq!(first["interest"], "40");
    assert_eq!(first["remaining_balance"], "1980");
}

#[test]
fn test_cli_unknown_debt() {
    let mut cmd = Command::new(cargo_bin!("debtplan"));
    cmd.arg("tests/fixtures/debts.csv")
        .args(["plan", "--debt", "boat"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("No debt with id boat"));
}

#[test]
fn test_cli_missing_input_file() {
    let mut cmd = Command::new(cargo_bin!("debtplan"));
    cmd.arg("tests/fixtures/does_not_exist.csv").args(["plan"]);

    cmd.assert().failure();
}
