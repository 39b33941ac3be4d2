use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::str::contains;
use tempfile::tempdir;

fn cli(anchor_dir: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("oven-transit");
    cmd.env("RUST_LOG", "error")
        .env_remove("OVEN_TRANSIT_ANCHOR_FILE")
        .arg("--no-color")
        .arg("--anchor-file")
        .arg(anchor_dir.join("anchor_overrides.json"));
    cmd
}

fn reference_args(cmd: &mut Command) -> &mut Command {
    cmd.args(["calc", "--f1", "4000", "--f2", "5000", "--f3", "9000", "--h0", "2"])
}

#[test]
fn prints_reference_times() {
    let temp = tempdir().expect("temp dir");
    let mut cmd = cli(temp.path());
    reference_args(&mut cmd);

    cmd.assert()
        .success()
        .stdout(contains("40.00 Hz"))
        .stdout(contains("1:03:40"))
        .stdout(contains("35:42"))
        .stdout(contains("109:21"))
        .stdout(contains("3:28:43"))
        .stdout(contains("3h 28min 43s"))
        .stdout(contains("+173.6 %"))
        .stdout(contains("accumulating"));
}

#[test]
fn json_output_carries_raw_seconds() {
    let temp = tempdir().expect("temp dir");
    let mut cmd = cli(temp.path());
    reference_args(&mut cmd).args(["--format", "json"]);

    let output = cmd.assert().success().get_output().stdout.clone();
    let json: serde_json::Value = serde_json::from_slice(&output).expect("valid JSON");
    assert_eq!(json["speeds_hz"][1], 50.0);
    let t1 = json["times"]["seconds"][0].as_f64().expect("t1");
    assert!((t1 - 3820.44).abs() < 0.01);
    assert_eq!(json["display"]["total"], "3:28:43");
}

#[test]
fn csv_output_uses_semicolons() {
    let temp = tempdir().expect("temp dir");
    let mut cmd = cli(temp.path());
    reference_args(&mut cmd).args(["--format", "csv"]);

    cmd.assert()
        .success()
        .stdout(contains("f1_hz;40\n"))
        .stdout(contains("h0_cm;2\n"))
        .stdout(contains("delta23_pct;"));
}

#[test]
fn thickness_is_skipped_without_h0() {
    let temp = tempdir().expect("temp dir");
    let mut cmd = cli(temp.path());
    cmd.args(["calc", "--f1", "40", "--f2", "50", "--f3", "90"]);

    cmd.assert()
        .success()
        .stdout(contains("1:03:40"))
        .stdout(contains("not computed"));
}

#[test]
fn rejects_zero_speed() {
    let temp = tempdir().expect("temp dir");
    let mut cmd = cli(temp.path());
    cmd.args(["calc", "--f1", "40", "--f2", "0", "--f3", "90"]);

    cmd.assert()
        .failure()
        .stderr(contains("speed must be greater than zero"));
}

#[test]
fn rejects_unparsable_speed() {
    let temp = tempdir().expect("temp dir");
    let mut cmd = cli(temp.path());
    cmd.args(["calc", "--f1", "fast", "--f2", "50", "--f3", "90"]);

    cmd.assert().failure().stderr(contains("invalid speed"));
}

#[test]
fn breakdown_lists_belt_three_cells() {
    let temp = tempdir().expect("temp dir");
    let mut cmd = cli(temp.path());
    cmd.args([
        "breakdown", "--f1", "40", "--f2", "50", "--f3", "90", "--belt", "3",
    ]);

    cmd.assert()
        .success()
        .stdout(contains("belt 3"))
        .stdout(contains("cell 7"))
        .stdout(contains("cell 8"))
        .stdout(contains("1:49:21"));
}
