//! Integration tests for `cld inspect`.
#![allow(clippy::expect_used)]

use std::path::PathBuf;
use std::process::{Command, Output};

/// Path to the compiled `cld` binary.
fn cld_bin() -> PathBuf {
    let mut path = std::env::current_exe().expect("current exe");
    // current_exe is .../deps/<test>-<hash>; the binary lives one level up.
    path.pop();
    if path.ends_with("deps") {
        path.pop();
    }
    path.push("cld");
    path
}

/// Path to a shared fixture file in the workspace-level tests/fixtures.
fn fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("../../tests/fixtures");
    path.push(name);
    path.to_str().expect("utf-8 path").to_owned()
}

fn cld(args: &[&str]) -> Output {
    Command::new(cld_bin())
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("CLD_MAX_FILE_SIZE")
        .output()
        .expect("run cld")
}

#[test]
fn inspect_human_shows_counts() {
    let out = cld(&["inspect", &fixture("american_revolution.chains.json")]);
    assert!(out.status.success(), "exit code: {:?}", out.status.code());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("title:      American Revolution"), "stdout: {stdout}");
    assert!(stdout.contains("shape:      causal_chains"), "stdout: {stdout}");
    assert!(stdout.contains("variables:  4"), "stdout: {stdout}");
    assert!(stdout.contains("edges:      7"), "stdout: {stdout}");
    assert!(stdout.contains("loops:      4"), "stdout: {stdout}");
}

#[test]
fn inspect_json_is_one_object() {
    let out = cld(&["inspect", "--format", "json", &fixture("road_rage.relationships.json")]);
    assert!(out.status.success(), "exit code: {:?}", out.status.code());
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).expect("json");
    assert_eq!(value["shape"], "relationships");
    assert_eq!(value["variable_count"], 8);
    assert_eq!(value["loop_count"], 1);
    assert!(value["out_degrees"].is_object());
}

#[test]
fn inspect_acyclic_reports_zero_loops() {
    let out = cld(&["inspect", "-f", "json", &fixture("acyclic.relationships.json")]);
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).expect("json");
    assert_eq!(value["loop_count"], 0);
    assert_eq!(value["edge_count"], 4);
    assert_eq!(value["out_degrees"]["sales"], 0);
    assert_eq!(value["out_degrees"]["production"], 2);
    assert_eq!(value["in_degrees"]["sales"], 2);
    assert_eq!(value["in_degrees"]["raw materials"], 0);
}
