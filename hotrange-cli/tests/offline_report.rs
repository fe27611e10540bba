mod common;
use common::*;

use assert_cmd::prelude::*;
use predicates::str::contains;

#[test]
fn ranks_snapshot_file_hottest_first() {
    let output = cli()
        .args(["--snapshot-file", &raft_status(), "--skip-resolve"])
        .output()
        .expect("run hotrange");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();

    let header = stdout.lines().next().unwrap();
    for column in ["RANK", "RANGE ID", "QPS", "NODES", "LEASEHOLDER", "SCHEMA OBJECT"] {
        assert!(header.contains(column), "missing column {column}");
    }
    assert_eq!(
        table_range_ids(&stdout),
        vec!["37", "52", "61", "1", "70", "53"]
    );
    assert!(stdout.contains("412.750000"));
    assert!(stdout.contains("<skipped>"));
}

#[test]
fn numtop_limits_rows() {
    let output = cli()
        .args(["-f", &raft_status(), "--skip-resolve", "-n", "2"])
        .output()
        .expect("run hotrange");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(table_range_ids(&stdout), vec!["37", "52"]);
}

#[test]
fn numtop_larger_than_snapshot_is_not_an_error() {
    let output = cli()
        .args(["-f", &raft_status(), "--skip-resolve", "-n", "500"])
        .output()
        .expect("run hotrange");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(table_range_ids(&stdout).len(), 6);
}

#[test]
fn json_output_carries_leaseholder_details() {
    let output = cli()
        .args(["-f", &raft_status(), "--skip-resolve", "--output", "json"])
        .output()
        .expect("run hotrange");

    assert!(output.status.success());
    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows = rows.as_array().unwrap();

    assert_eq!(rows.len(), 6);
    assert_eq!(rows[1]["rangeId"], "52");
    assert_eq!(rows[1]["queriesPerSecond"], 231.0);
    assert_eq!(rows[1]["leaseholderNodeId"], 2);
    assert_eq!(rows[1]["nodeIds"], serde_json::json!([1, 2, 3]));

    // first replica has no lease record, load came from node 1
    assert_eq!(rows[4]["rangeId"], "70");
    assert!(rows[4]["leaseholderNodeId"].is_null());
    assert_eq!(rows[4]["qpsSourceNodeId"], 1);

    // no replica names itself leaseholder
    assert_eq!(rows[5]["rangeId"], "53");
    assert_eq!(rows[5]["queriesPerSecond"], 0.0);
    assert_eq!(rows[5]["schemaObject"]["status"], "skipped");
}

#[test]
fn malformed_snapshot_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, r#"{"nodes": []}"#).unwrap();

    cli()
        .args(["-f", path.to_str().unwrap(), "--skip-resolve"])
        .assert()
        .failure()
        .stderr(contains("Malformed snapshot"));
}

#[test]
fn missing_snapshot_file_fails() {
    cli()
        .args(["-f", "/nonexistent/ranges.json", "--skip-resolve"])
        .assert()
        .failure()
        .stderr(contains("Failed to read snapshot file"));
}

#[test]
fn unreachable_catalog_fails_without_report() {
    cli()
        .args([
            "-f",
            &raft_status(),
            "--host",
            "127.0.0.1",
            "--dbport",
            "1",
        ])
        .assert()
        .failure()
        .stdout(predicates::str::is_empty())
        .stderr(contains("Failed to connect to catalog"));
}
