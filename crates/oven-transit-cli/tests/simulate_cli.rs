use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::str::contains;
use tempfile::tempdir;

fn cli(dir: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("oven-transit");
    cmd.env("RUST_LOG", "error")
        .env("LANG", "C")
        .env_remove("LC_ALL")
        .env_remove("OVEN_TRANSIT_ANCHOR_FILE")
        .arg("--no-color")
        .arg("--anchor-file")
        .arg(dir.join("anchor_overrides.json"));
    cmd
}

const SPEEDS: [&str; 6] = ["--f1", "4000", "--f2", "5000", "--f3", "9000"];

#[test]
fn runs_reference_to_completion() {
    let temp = tempdir().expect("temp dir");
    cli(temp.path())
        .arg("simulate")
        .args(SPEEDS)
        .args(["--tick", "60"])
        .assert()
        .success()
        .stdout(contains("belt 2 reached its transit time"))
        .stdout(contains("product exits in"))
        .stdout(contains("all belts completed"))
        .stdout(contains("100.0%"))
        .stdout(contains("done"));
}

#[test]
fn json_report_includes_gaps_and_pause() {
    let temp = tempdir().expect("temp dir");
    let output = cli(temp.path())
        .arg("simulate")
        .args(SPEEDS)
        .args([
            "--tick",
            "10",
            "--gap",
            "1:600:900",
            "--pause-at",
            "1000:1500",
            "--format",
            "json",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).expect("valid JSON");
    assert_eq!(report["state"], "completed");
    assert_eq!(report["truncated"], false);
    assert_eq!(report["held_s"][0], 300.0);
    let gaps = report["belts"][0]["gaps"].as_array().expect("gap list");
    assert_eq!(gaps.len(), 1);
    assert_eq!(gaps[0]["open"], false);
    let sim = report["simulation_clock_s"].as_f64().expect("clock");
    let driver = report["driver_clock_s"].as_f64().expect("driver clock");
    assert!((driver - sim - 500.0).abs() < 1e-6);
}

#[test]
fn max_ticks_stops_early() {
    let temp = tempdir().expect("temp dir");
    cli(temp.path())
        .arg("simulate")
        .args(SPEEDS)
        .args(["--tick", "1", "--max-ticks", "3", "--gap", "2:1:2"])
        .assert()
        .success()
        .stdout(contains("stopped after 3 ticks (running)"))
        .stdout(contains("belt 2 held by feed stops for 1.0 s"));
}

#[test]
fn rejects_malformed_gap() {
    let temp = tempdir().expect("temp dir");
    cli(temp.path())
        .arg("simulate")
        .args(SPEEDS)
        .args(["--gap", "2:30:10"])
        .assert()
        .failure()
        .stderr(contains("must close after it opens"));
}

#[test]
fn rejects_csv_format() {
    let temp = tempdir().expect("temp dir");
    cli(temp.path())
        .arg("simulate")
        .args(SPEEDS)
        .args(["--format", "csv"])
        .assert()
        .failure()
        .stderr(contains("text or json"));
}
