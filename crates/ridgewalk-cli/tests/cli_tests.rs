//! Integration tests for the `ridgewalk` binary.
//!
//! These tests use `assert_cmd` to verify:
//! - text, minimal and JSON output
//! - exit codes for found, exhausted and failed searches
//! - error reporting for unreadable or malformed maps

use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::{tempdir, TempDir};

fn fixture_map(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../docs/fixtures/maps")
        .join(name)
        .canonicalize()
        .expect("fixture map present")
}

fn cli() -> Command {
    let mut cmd = cargo_bin_cmd!("ridgewalk");
    cmd.env("RUST_LOG", "error");
    cmd
}

fn write_map(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("map.txt");
    fs::write(&path, contents).expect("write map");
    (dir, path)
}

#[test]
fn a_star_prints_solution_and_cost() {
    cli()
        .arg("a-star")
        .arg(fixture_map("valley.txt"))
        .args(["--energy", "200"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Search from (0, 0) to (5, 4) (algorithm: a-star; energy budget: 200):",
        ))
        .stdout(predicate::str::contains(
            "Solution: ['N', 'N', 'N', 'N', 'E', 'E', 'E', 'E', 'E']",
        ))
        .stdout(predicate::str::contains("Cost: 18"))
        .stdout(predicate::str::contains("Explored ("));
}

#[test]
fn bidirectional_minimal_display_prints_only_solution() {
    cli()
        .args(["bidirectional", "--minimal-display"])
        .arg(fixture_map("flat_row.txt"))
        .assert()
        .success()
        .stdout("Solution: ['E', 'E', 'E', 'E']\n");
}

#[test]
fn algorithm_aliases_are_accepted() {
    for alias in ["astar", "bbfs"] {
        cli()
            .arg(alias)
            .arg(fixture_map("flat_row.txt"))
            .arg("--minimal-display")
            .assert()
            .success();
    }
}

#[test]
fn exhausted_budget_exits_with_no_path_code() {
    let (_dir, map) = write_map("5\n0\n");
    cli()
        .arg("a-star")
        .arg(&map)
        .args(["--energy", "10"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Solution: None"))
        .stderr(predicate::str::contains(
            "No path found from (0, 0) to (0, 1) within energy budget 10.",
        ));
}

#[test]
fn larger_budget_climbs_the_slope() {
    let (_dir, map) = write_map("5\n0\n");
    cli()
        .arg("a-star")
        .arg(&map)
        .args(["--energy", "30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Solution: ['N']"))
        .stdout(predicate::str::contains("Cost: 26"));
}

#[test]
fn explicit_goal_overrides_far_corner() {
    cli()
        .arg("a-star")
        .arg(fixture_map("flat_row.txt"))
        .args(["--start-x", "1", "--end-x", "3", "--minimal-display"])
        .assert()
        .success()
        .stdout("Solution: ['E', 'E']\n");
}

#[test]
fn json_output_is_structured() {
    let output = cli()
        .arg("a-star")
        .arg(fixture_map("valley.txt"))
        .args(["--energy", "200", "--format", "json"])
        .output()
        .expect("run ridgewalk");
    assert!(output.status.success());

    let value: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(value["algorithm"], "a-star");
    assert_eq!(value["status"], "found");
    assert_eq!(value["path"]["cost"], 18);
    assert_eq!(value["goal"]["x"], 5);
    assert_eq!(value["goal"]["y"], 4);
    assert!(value["explored"].as_array().is_some_and(|cells| !cells.is_empty()));
}

#[test]
fn json_minimal_display_drops_diagnostics() {
    let output = cli()
        .args(["bidirectional", "--format", "json", "--minimal-display"])
        .arg(fixture_map("flat_row.txt"))
        .output()
        .expect("run ridgewalk");
    assert!(output.status.success());

    let value: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(value["path"]["moves"], serde_json::json!(["E", "E", "E", "E"]));
    assert_eq!(value["explored"], serde_json::json!([]));
    assert_eq!(value["frontier"], serde_json::json!([]));
}

#[test]
fn iteration_cap_reports_status() {
    cli()
        .arg("a-star")
        .arg(fixture_map("valley.txt"))
        .args(["--energy", "200", "--max-iterations", "1"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Status: stopped at iteration limit"))
        .stdout(predicate::str::contains("Iterations: 1"));
}

#[test]
fn missing_map_reports_error() {
    let dir = tempdir().expect("create temp dir");
    cli()
        .arg("a-star")
        .arg(dir.path().join("missing.txt"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error: failed to load elevation map"));
}

#[test]
fn ragged_map_reports_line() {
    let (_dir, map) = write_map("1 2\n3\n");
    cli()
        .arg("a-star")
        .arg(&map)
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "inconsistent map width on line 2: expected 2 elements, saw 1",
        ));
}

#[test]
fn start_outside_grid_is_an_error() {
    cli()
        .arg("bidirectional")
        .arg(fixture_map("flat_row.txt"))
        .args(["--start-x", "9"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "start position (9, 0) is outside the elevation grid",
        ));
}

#[test]
fn goal_outside_grid_is_an_error() {
    cli()
        .arg("a-star")
        .arg(fixture_map("flat_row.txt"))
        .args(["--end-y", "3"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "goal position (4, 3) is outside the elevation grid",
        ));
}

#[test]
fn unknown_algorithm_is_rejected() {
    cli()
        .arg("dijkstra")
        .arg(fixture_map("flat_row.txt"))
        .assert()
        .failure();
}
