use assert_cmd::prelude::*;
use std::path::PathBuf;
use std::process::Command;

pub fn cli() -> Command {
    let mut cmd = Command::cargo_bin("hotrange").expect("binary exists");
    cmd.env("RUST_LOG", "error");
    cmd.env_remove("HOTRANGE_PASSWORD");
    cmd
}

pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn raft_status() -> String {
    fixture("raft_status.json").display().to_string()
}

/// Range ids of the data rows of a table report, in output order.
pub fn table_range_ids(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .skip(1)
        .filter_map(|line| line.split_whitespace().nth(1))
        .map(str::to_string)
        .collect()
}
