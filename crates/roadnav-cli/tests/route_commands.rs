use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../docs/fixtures/sample_city.json")
        .canonicalize()
        .expect("fixture dataset present")
}

fn cli() -> Command {
    let mut cmd = cargo_bin_cmd!("roadnav-cli");
    cmd.env("RUST_LOG", "error").env_remove("ROADNAV_DATASET");
    cmd
}

fn prepare_command() -> Command {
    let mut cmd = cli();
    cmd.arg("--dataset").arg(fixture_path());
    cmd
}

#[test]
fn distance_route_merges_same_named_roads() {
    let mut cmd = prepare_command();
    cmd.args(["route", "--from", "1", "--to", "4"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "Journey from 1 (Bowen Street / Lambton Quay) to 4 (Lambton Quay / Willis Street):",
        ))
        .stdout(predicate::str::contains(" - Lambton Quay: 3.000 km"))
        .stdout(predicate::str::contains("Total distance: 3.000 km"));
}

#[test]
fn match_roads_by_id_splits_legs() {
    let mut cmd = prepare_command();
    cmd.args(["route", "--from", "1", "--to", "4", "--match-roads", "id"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(" - Lambton Quay: 1.000 km"))
        .stdout(predicate::str::contains(" - Lambton Quay: 2.000 km"));
}

#[test]
fn time_mode_reports_minutes() {
    let mut cmd = prepare_command();
    cmd.args(["route", "--from", "8", "--to", "1", "--mode", "time"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(" - The Terrace: 3.200 km, 2.400 minutes"))
        .stdout(predicate::str::contains(" - Bowen Street: 1.000 km, 1.500 minutes"))
        .stdout(predicate::str::contains("Total time: 3.900 minutes"));
}

#[test]
fn dataset_can_come_from_environment() {
    let mut cmd = cli();
    cmd.env("ROADNAV_DATASET", fixture_path())
        .args(["route", "--from", "8", "--to", "1"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(" - Willis Street: 1.000 km"))
        .stdout(predicate::str::contains("Total distance: 4.000 km"));
}

#[test]
fn missing_dataset_names_the_environment_variable() {
    let mut cmd = cli();
    cmd.args(["route", "--from", "1", "--to", "4"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("ROADNAV_DATASET"));
}

#[test]
fn unreachable_goal_is_a_normal_outcome() {
    let mut cmd = prepare_command();
    cmd.args(["route", "--from", "1", "--to", "9"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("No path found."));
}

#[test]
fn unknown_intersection_fails_with_context() {
    let mut cmd = prepare_command();
    cmd.args(["route", "--from", "1", "--to", "99"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to route from 1 to 99"))
        .stderr(predicate::str::contains("unknown intersection: 99"));
}

#[test]
fn identical_endpoints_are_rejected() {
    let mut cmd = prepare_command();
    cmd.args(["route", "--from", "3", "--to", "3"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("same intersection"));
}

#[test]
fn invalid_road_class_weight_is_rejected() {
    let mut cmd = prepare_command();
    cmd.args([
        "route",
        "--from",
        "1",
        "--to",
        "8",
        "--mode",
        "time",
        "--road-class-weight",
        "0.5",
    ]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid cost configuration"));
}

#[test]
fn json_output_is_machine_readable() {
    let mut cmd = prepare_command();
    cmd.args(["--format", "json", "route", "--from", "1", "--to", "8"])
        .arg("--show-explored");

    let output = cmd.assert().success().get_output().stdout.clone();
    let value: serde_json::Value = serde_json::from_slice(&output).expect("valid JSON");

    assert_eq!(value["found"], true);
    assert_eq!(value["mode"], "distance");
    assert_eq!(value["legs"].as_array().map(Vec::len), Some(2));
    assert_eq!(value["legs"][0]["road"]["name"], "Bowen Street");
    assert_eq!(value["explored_nodes"][0], 1);
}

#[test]
fn show_explored_lists_settled_intersections() {
    let mut cmd = prepare_command();
    cmd.args(["route", "--from", "1", "--to", "9", "--show-explored"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Explored 8 intersections: 1,"));
}

#[test]
fn node_command_prints_label() {
    let mut cmd = prepare_command();
    cmd.args(["node", "--id", "2"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "2 (Cuba Street / Lambton Quay) at (1.000, 0.000)",
        ));
}

#[test]
fn nearest_command_snaps_within_radius() {
    let mut cmd = prepare_command();
    cmd.args(["nearest", "--x", "2.9", "--y", "0.95"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "Nearest intersection: 8 (The Terrace / Willis Street)",
        ));

    let mut cmd = prepare_command();
    cmd.args(["nearest", "--x", "4.0", "--y", "3.0"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("No intersection within 0.150 km"));
}

#[test]
fn malformed_dataset_reports_path() {
    let temp_dir = tempdir().expect("create temp dir");
    let path = temp_dir.path().join("broken.json");
    fs::write(&path, "{\"nodes\": [").expect("write dataset");

    let mut cmd = cli();
    cmd.arg("--dataset")
        .arg(&path)
        .args(["route", "--from", "1", "--to", "2"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to load dataset"))
        .stderr(predicate::str::contains("broken.json"));
}
