use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const BRIDGE: &str = r#"{"project_type": "bridges", "length": 100, "lanes": 2}"#;

#[test]
fn test_cli_types_lists_builtin_projects() {
    let mut cmd = Command::cargo_bin("takeoff").unwrap();
    cmd.arg("types");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("bridges"))
        .stdout(predicate::str::contains("railways"))
        .stdout(predicate::str::contains("length (feet)"));
}

#[test]
fn test_cli_show_with_overrides() {
    let mut cmd = Command::cargo_bin("takeoff").unwrap();
    cmd.arg("show").arg("bridges").arg("length=100").arg("lanes=2");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("surface_area"))
        .stdout(predicate::str::contains("4_800"))
        .stdout(predicate::str::contains("forced"));
}

#[test]
fn test_cli_show_from_description() {
    let mut cmd = Command::cargo_bin("takeoff").unwrap();
    cmd.arg("show")
        .arg("bridges")
        .arg("--describe")
        .arg("a 1,200 ft bridge with 4 lanes");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("115_200"));
}

#[test]
fn test_cli_show_unknown_type() {
    let mut cmd = Command::cargo_bin("takeoff").unwrap();
    cmd.arg("show").arg("tunnels");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Unknown project type 'tunnels'"));
}

#[test]
fn test_cli_show_unknown_parameter() {
    let mut cmd = Command::cargo_bin("takeoff").unwrap();
    cmd.arg("show").arg("bridges").arg("depth=3");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Unknown parameter 'depth'"));
}

#[test]
fn test_cli_run_raw_json() {
    let temp_dir = TempDir::new().unwrap();
    let payload = temp_dir.path().join("bridge.json");
    fs::write(&payload, BRIDGE).unwrap();

    let mut cmd = Command::cargo_bin("takeoff").unwrap();
    cmd.arg("run").arg(&payload).arg("--raw");

    let output = cmd.assert().success().get_output().stdout.clone();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["surface_area"], 4800);
    assert_eq!(json["width"], 48);
    assert_eq!(json["project_type"], "bridges");
}

#[test]
fn test_cli_run_from_stdin() {
    let mut cmd = Command::cargo_bin("takeoff").unwrap();
    cmd.arg("run").arg("-").write_stdin(BRIDGE);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Project: bridges"));
}

#[test]
fn test_cli_run_missing_required_parameter() {
    let mut cmd = Command::cargo_bin("takeoff").unwrap();
    cmd.arg("run")
        .arg("-")
        .write_stdin(r#"{"project_type": "bridges", "length": 100}"#);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid payload"))
        .stderr(predicate::str::contains(
            "'lanes' required for bridges. Add lanes in lanes.",
        ));
}

#[test]
fn test_cli_co2_estimate() {
    let mut cmd = Command::cargo_bin("takeoff").unwrap();
    cmd.arg("co2").arg("-").write_stdin(BRIDGE);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("bridges: 130.68 tons CO2"));
}

#[test]
fn test_cli_batch_reports_failures() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("bridge.json"), BRIDGE).unwrap();
    fs::write(
        temp_dir.path().join("broken.json"),
        r#"{"project_type": "tunnels"}"#,
    )
    .unwrap();
    fs::write(temp_dir.path().join("notes.txt"), "not a payload").unwrap();

    let mut cmd = Command::cargo_bin("takeoff").unwrap();
    cmd.arg("batch").arg("--dir").arg(temp_dir.path());

    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("Batch contains 2 payloads, 1 failed"))
        .stdout(predicate::str::contains("130.68"))
        .stderr(predicate::str::contains("1 of 2 payloads failed"));
}

#[test]
fn test_cli_eval_adhoc_rules() {
    let mut cmd = Command::cargo_bin("takeoff").unwrap();
    cmd.arg("eval")
        .arg("--rule")
        .arg("area = width * length")
        .arg("area")
        .arg("width=4")
        .arg("length=10");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("area = 40"));
}

#[test]
fn test_cli_eval_parse_error() {
    let mut cmd = Command::cargo_bin("takeoff").unwrap();
    cmd.arg("eval").arg("--rule").arg("area = width *").arg("area");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Parse error"));
}
