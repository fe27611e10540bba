mod common;
use common::*;

use assert_cmd::prelude::*;
use predicates::str::contains;

#[test]
fn reads_settings_from_yaml() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("hotrange.yaml");
    std::fs::write(
        &config,
        format!(
            "snapshot:\n  file: {}\nreport:\n  top_n: 3\n  skip_resolve: true\n",
            raft_status()
        ),
    )
    .unwrap();

    let output = cli()
        .args(["--config-file", config.to_str().unwrap()])
        .output()
        .expect("run hotrange");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(table_range_ids(&stdout), vec!["37", "52", "61"]);
}

#[test]
fn flags_override_yaml() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("hotrange.yaml");
    std::fs::write(
        &config,
        format!(
            "snapshot:\n  file: {}\nreport:\n  top_n: 3\n  skip_resolve: true\n",
            raft_status()
        ),
    )
    .unwrap();

    let output = cli()
        .args(["-c", config.to_str().unwrap(), "--numtop", "1"])
        .output()
        .expect("run hotrange");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(table_range_ids(&stdout), vec!["37"]);
}

#[test]
fn invalid_yaml_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("hotrange.yaml");
    std::fs::write(&config, "report:\n  top_n: lots\n").unwrap();

    cli()
        .args(["-c", config.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(contains("Failed to parse config file"));
}

#[test]
fn zero_numtop_rejected() {
    cli()
        .args(["-f", &raft_status(), "--skip-resolve", "-n", "0"])
        .assert()
        .failure()
        .stderr(contains("top_n must be at least 1"));
}

#[test]
fn log_dir_receives_log_file() {
    let dir = tempfile::tempdir().unwrap();

    cli()
        .env("RUST_LOG", "info")
        .args([
            "-f",
            &raft_status(),
            "--skip-resolve",
            "--logdir",
            dir.path().to_str().unwrap(),
        ])
        .assert()
        .success();

    let general = dir.path().join("logs").join("hotrange").join("GENERAL");
    let files: Vec<_> = std::fs::read_dir(&general)
        .expect("log directory created")
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(files.len(), 1);

    let name = files[0].file_name().unwrap().to_str().unwrap().to_string();
    assert!(name.starts_with("general_") && name.ends_with(".log"));
    let content = std::fs::read_to_string(&files[0]).unwrap();
    assert!(content.contains("ranked ranges by queries per second"));
}
