use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn lajan(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("lajan").expect("bin");
    cmd.env("LAJAN_DATA_DIR", dir.path())
        .env("NO_COLOR", "1")
        .env_remove("LAJAN_LOG");
    cmd
}

/// Initialized data dir holding "Janvye" (January 2025) with alimentation
/// budgeted at 15,000 and 16,000 spent
fn setup() -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    lajan(&dir).arg("init").assert().success();
    lajan(&dir)
        .args(["budget", "create", "Janvye", "--period", "2025-01"])
        .assert()
        .success();
    lajan(&dir)
        .args(["budget", "set", "Janvye", "alimentation", "15000"])
        .assert()
        .success();
    lajan(&dir)
        .args(["budget", "spend", "Janvye", "alimentation", "16000"])
        .assert()
        .success();
    dir
}

#[test]
fn init_reports_location() {
    let dir = TempDir::new().expect("tempdir");
    lajan(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized Lajan"));

    lajan(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already initialized"));
}

#[test]
fn categories_lists_catalogue() {
    let dir = TempDir::new().expect("tempdir");
    lajan(&dir)
        .arg("categories")
        .assert()
        .success()
        .stdout(predicate::str::contains("alimentation"))
        .stdout(predicate::str::contains("sol"));
}

#[test]
fn show_flags_exceeded_category() {
    let dir = setup();
    lajan(&dir)
        .args(["budget", "show", "janvye"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Budget: Janvye"))
        .stdout(predicate::str::contains("Exceeded"));
}

#[test]
fn show_json_is_parseable() {
    let dir = setup();
    let output = lajan(&dir)
        .args(["budget", "show", "Janvye", "--json"])
        .output()
        .expect("run");
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["name"], "Janvye");
    assert_eq!(value["currency"], "HTG");
}

#[test]
fn refund_lowers_spending() {
    let dir = setup();
    lajan(&dir)
        .args(["budget", "spend", "Janvye", "alimentation", "-2000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Refunded"));
}

#[test]
fn alerts_for_named_budget() {
    let dir = setup();
    lajan(&dir)
        .args(["analyze", "alerts", "Janvye"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exceeded"))
        .stdout(predicate::str::contains("Alimentation"));
}

#[test]
fn simulate_previews_without_saving() {
    let dir = setup();
    let output = lajan(&dir)
        .args(["analyze", "simulate", "Janvye", "alimentation", "20000", "--json"])
        .output()
        .expect("run");
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["currentStatus"], "exceeded");
    // 16,000 of 20,000 is 80%
    assert_eq!(value["newStatus"], "warning");
    assert_eq!(value["newUtilization"], 80);

    lajan(&dir)
        .args(["budget", "show", "Janvye"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exceeded"));
}

#[test]
fn unknown_budget_fails() {
    let dir = setup();
    lajan(&dir)
        .args(["budget", "show", "Fevriye"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Budget not found"));
}

#[test]
fn malformed_amounts_fail_cleanly() {
    let dir = setup();
    for amount in ["1.5é", "1.-5", "90000000000000000"] {
        lajan(&dir)
            .args(["budget", "set", "Janvye", "alimentation", amount])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Validation error"))
            .stderr(predicate::str::contains("panicked").not());
    }

    lajan(&dir)
        .args(["budget", "spend", "Janvye", "alimentation", "--5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation error"));

    lajan(&dir)
        .args(["analyze", "simulate", "Janvye", "alimentation", "1.5é"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation error"));

    // Unchanged by the rejected input
    let output = lajan(&dir)
        .args(["budget", "show", "Janvye", "--json"])
        .output()
        .expect("run");
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["categories"]["alimentation"], 1_500_000);
}

#[test]
fn duplicate_name_rejected() {
    let dir = setup();
    lajan(&dir)
        .args(["budget", "create", "JANVYE", "--period", "2025-02"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn delete_requires_confirmation() {
    let dir = setup();
    lajan(&dir)
        .args(["budget", "delete", "Janvye"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));

    lajan(&dir)
        .args(["budget", "delete", "Janvye", "--yes"])
        .assert()
        .success();

    lajan(&dir)
        .args(["budget", "show", "Janvye"])
        .assert()
        .failure();
}

#[test]
fn archived_budget_rejects_spending() {
    let dir = setup();
    lajan(&dir)
        .args(["budget", "archive", "Janvye"])
        .assert()
        .success();
    lajan(&dir)
        .args(["budget", "spend", "Janvye", "alimentation", "100"])
        .assert()
        .failure();
}

#[test]
fn export_all_json_to_stdout() {
    let dir = setup();
    let output = lajan(&dir)
        .args(["export", "all", "--pretty"])
        .output()
        .expect("run");
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["schema_version"], "1.0.0");
    assert_eq!(value["budgets"].as_array().map(Vec::len), Some(1));
}

#[test]
fn export_categories_csv_to_file() {
    let dir = setup();
    let target = dir.path().join("janvye.csv");
    lajan(&dir)
        .args(["export", "categories", "Janvye"])
        .arg(&target)
        .assert()
        .success();

    let csv = std::fs::read_to_string(&target).expect("csv");
    assert!(csv.lines().count() >= 2);
    assert!(csv.contains("alimentation"));
}

#[test]
fn audit_records_changes() {
    let dir = setup();
    lajan(&dir)
        .arg("audit")
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE"))
        .stdout(predicate::str::contains("UPDATE"));
}

#[test]
fn config_set_changes_defaults() {
    let dir = TempDir::new().expect("tempdir");
    lajan(&dir).arg("init").assert().success();
    lajan(&dir)
        .args(["config", "set", "--currency", "USD", "--period", "weekly"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Default currency: USD"));

    lajan(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("weekly"));
}
