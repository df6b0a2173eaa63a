//! Integration tests for `cld variables`.
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
fn variables_are_sorted_and_normalised() {
    let out = cld(&["variables", &fixture("american_revolution.chains.json")]);
    assert!(out.status.success(), "exit code: {:?}", out.status.code());
    assert_eq!(
        String::from_utf8_lossy(&out.stdout),
        "clashes\nresistance\ntax burden\ntensions\n"
    );
}

#[test]
fn variables_json_is_a_sorted_array() {
    let out = cld(&["variables", "-f", "json", &fixture("acyclic.relationships.json")]);
    assert!(out.status.success(), "exit code: {:?}", out.status.code());
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).expect("json");
    assert_eq!(
        value,
        serde_json::json!(["inventory", "production", "raw materials", "sales"])
    );
}

#[test]
fn road_rage_has_eight_variables() {
    let out = cld(&["variables", &fixture("road_rage.relationships.json")]);
    assert!(out.status.success(), "exit code: {:?}", out.status.code());
    assert_eq!(String::from_utf8_lossy(&out.stdout).lines().count(), 8);
}
