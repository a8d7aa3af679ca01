//! Integration tests for the FLOWSCOPE CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("flowscope").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Edmonds-Karp maximum flow"));
}

#[test]
fn test_sample_report() {
    let mut cmd = Command::cargo_bin("flowscope").unwrap();
    cmd.arg("sample");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Max flow: 19"))
        .stdout(predicate::str::contains("S -> A (10)"))
        .stdout(predicate::str::contains("B -> D (9)"));
}

#[test]
fn test_sample_json() {
    let output = Command::cargo_bin("flowscope")
        .unwrap()
        .args(["sample", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["max_flow"], 19);
    assert_eq!(json["steps"]["snapshots"].as_array().unwrap().len(), 5);
}

#[test]
fn test_run_on_exported_document() {
    let dir = tempdir().unwrap();
    let graph_path = dir.path().join("network.json");

    let exported = Command::cargo_bin("flowscope")
        .unwrap()
        .arg("export-sample")
        .output()
        .unwrap();
    assert!(exported.status.success());
    fs::write(&graph_path, &exported.stdout).unwrap();

    let mut cmd = Command::cargo_bin("flowscope").unwrap();
    cmd.arg("run")
        .arg("--graph")
        .arg(graph_path.to_str().unwrap())
        .arg("--source")
        .arg("A")
        .arg("--sink")
        .arg("T");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Edmonds-Karp: A -> T"))
        .stdout(predicate::str::contains("Max flow: 14"));
}

#[test]
fn test_config_file_is_applied() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.json");
    fs::write(&config_path, r#"{"coincident_endpoints": "reject"}"#).unwrap();

    let graph_path = dir.path().join("network.json");
    fs::write(
        &graph_path,
        r#"{"nodes":[{"id":"S"},{"id":"T"}],"edges":[{"source":"S","destination":"T","capacity":3}]}"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("flowscope").unwrap();
    cmd.args(["--config", config_path.to_str().unwrap()])
        .args(["run", "--graph", graph_path.to_str().unwrap(), "-s", "S", "-t", "S"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Source and sink are the same node: S"));
}

#[test]
fn test_unknown_endpoint_fails() {
    let dir = tempdir().unwrap();
    let graph_path = dir.path().join("network.json");
    fs::write(&graph_path, r#"{"nodes":[{"id":"S"},{"id":"T"}]}"#).unwrap();

    let mut cmd = Command::cargo_bin("flowscope").unwrap();
    cmd.args(["run", "--graph", graph_path.to_str().unwrap(), "-s", "S", "-t", "X"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Endpoint not found: X"));
}

#[test]
fn test_invalid_document_fails() {
    let dir = tempdir().unwrap();
    let graph_path = dir.path().join("network.json");
    fs::write(
        &graph_path,
        r#"{"nodes":[{"id":"S"},{"id":"S"}]}"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("flowscope").unwrap();
    cmd.args(["run", "--graph", graph_path.to_str().unwrap(), "-s", "S", "-t", "S"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Duplicate node: S"));
}
