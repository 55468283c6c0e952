//! CLI Integration Tests
//!
//! These tests verify that the CLI commands work correctly end-to-end.
//! They test the actual binary behavior, not just the library.
//!
//! Run with:
//! ```bash
//! cargo test --test cli_integration
//! ```

use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

/// Run memhash and return (stdout, stderr, success)
fn run_memhash(args: &[&str]) -> (String, String, bool) {
    let output = Command::new(env!("CARGO_BIN_EXE_memhash"))
        .args(args)
        .output()
        .expect("Failed to execute memhash");

    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.success(),
    )
}

fn parse_json(stdout: &str) -> serde_json::Value {
    serde_json::from_str(stdout.trim()).expect("stdout should be JSON")
}

fn write_graph(dir: &Path, json: &str) -> String {
    let path = dir.join("graph.json");
    std::fs::write(&path, json).unwrap();
    path.to_str().unwrap().to_string()
}

const DIAMOND: &str = r#"{"vertices": [
    {"label": "a", "edges": [1, 2]},
    {"label": "b", "edges": [3]},
    {"label": "c", "edges": [3]},
    {"label": "d"}
]}"#;

const TWO_ISLANDS: &str = r#"{"vertices": [
    {"label": "a", "edges": [1]},
    {"label": "b", "edges": [0]},
    {"label": "c", "edges": [3]},
    {"label": "d"}
]}"#;

// ============================================================================
// Hash Command Tests
// ============================================================================

#[test]
fn test_cli_hash_reports_every_vertex() {
    let dir = tempdir().unwrap();
    let path = write_graph(dir.path(), DIAMOND);

    let (stdout, stderr, success) = run_memhash(&["hash", &path]);
    assert!(success, "hash should succeed: {}", stderr);

    let json = parse_json(&stdout);
    assert_eq!(json["vertices"], 4);
    assert_eq!(json["consistent"], true);

    let pass = &json["passes"][0];
    assert_eq!(pass["order"], "forward");
    assert_eq!(pass["digests"].as_array().unwrap().len(), 4);
    assert_eq!(pass["memoized"], 4);
    assert!(pass["total_bytes"].as_u64().unwrap() > 0);
}

#[cfg(not(feature = "compact-digest"))]
#[test]
fn test_cli_hash_trace_digests() {
    let dir = tempdir().unwrap();
    let path = write_graph(dir.path(), DIAMOND);

    let (stdout, _stderr, success) = run_memhash(&["hash", &path]);
    assert!(success);

    let json = parse_json(&stdout);
    let digests = &json["passes"][0]["digests"];
    assert_eq!(digests[0]["label"], "a");
    assert_eq!(digests[0]["digest"], "Va/Vb/VdEE/Vc/VdEEE");
    assert_eq!(digests[3]["digest"], "VdE");
}

#[test]
fn test_cli_hash_both_orders_agree() {
    let dir = tempdir().unwrap();
    let path = write_graph(dir.path(), TWO_ISLANDS);

    let (stdout, stderr, success) = run_memhash(&["hash", &path, "--order", "both"]);
    assert!(success, "both orders should agree: {}", stderr);

    let json = parse_json(&stdout);
    assert_eq!(json["consistent"], true);
    assert_eq!(json["passes"][0]["order"], "forward");
    assert_eq!(json["passes"][1]["order"], "reverse");
    assert_eq!(
        json["passes"][0]["digests"], json["passes"][1]["digests"],
        "sorted digests should match across orders"
    );

    // Only the acyclic island is memoized.
    let memoized: Vec<_> = json["passes"][1]["digests"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["memoized"].as_bool().unwrap())
        .collect();
    assert_eq!(memoized, vec![false, false, true, true]);
}

#[test]
fn test_cli_hash_text_format() {
    let dir = tempdir().unwrap();
    let path = write_graph(dir.path(), DIAMOND);

    let (stdout, _stderr, success) = run_memhash(&["-f", "text", "hash", &path]);
    assert!(success);
    assert!(stdout.lines().count() > 1, "text output should be pretty-printed");
    parse_json(&stdout);
}

#[test]
fn test_cli_hash_rejects_dangling_edge() {
    let dir = tempdir().unwrap();
    let path = write_graph(dir.path(), r#"{"vertices": [{"label": "a", "edges": [9]}]}"#);

    let (_stdout, stderr, success) = run_memhash(&["hash", &path]);
    assert!(!success, "dangling edge should fail");
    assert!(stderr.contains("Unknown vertex"), "got: {}", stderr);
}

#[test]
fn test_cli_hash_missing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nope.json");

    let (_stdout, stderr, success) = run_memhash(&["hash", path.to_str().unwrap()]);
    assert!(!success);
    assert!(stderr.contains("IO error"), "got: {}", stderr);
}

// ============================================================================
// Dissect Command Tests
// ============================================================================

#[test]
fn test_cli_dissect_json() {
    let (stdout, stderr, success) =
        run_memhash(&["dissect", "Va/Vb/VdEE/Vc/VdEEE", "Vb/VdEE"]);
    assert!(success, "dissect should succeed: {}", stderr);

    let json = parse_json(&stdout);
    assert_eq!(json["count"], 4);
    assert_eq!(json["edges"][0]["from"], "a");
    assert_eq!(json["edges"][0]["to"], "b");
    assert!(json["dot"].as_str().unwrap().starts_with("digraph G {"));
}

#[test]
fn test_cli_dissect_text_is_dot() {
    let (stdout, _stderr, success) =
        run_memhash(&["-f", "text", "dissect", "Va/Vb/R1EE", "--suffix", "1"]);
    assert!(success);
    assert_eq!(stdout, "digraph G {\n    a1 -> b1;\n    b1 -> a1;\n}\n");
}

#[test]
fn test_cli_dissect_malformed() {
    let (_stdout, stderr, success) = run_memhash(&["dissect", "Va/Vb"]);
    assert!(!success);
    assert!(stderr.contains("unterminated vertex"), "got: {}", stderr);
}

// ============================================================================
// Demo Command Tests
// ============================================================================

#[test]
fn test_cli_demo() {
    let (stdout, stderr, success) = run_memhash(&["demo"]);
    assert!(success, "demo should succeed: {}", stderr);

    let json = parse_json(&stdout);
    let digests = json["digests"].as_array().unwrap();
    assert_eq!(digests.len(), 4);
    // a and b form a loop; c and d do not
    assert_eq!(json["memoized"], 2);
}

#[test]
fn test_cli_help_lists_commands() {
    let (stdout, _stderr, success) = run_memhash(&["--help"]);
    assert!(success);
    for command in ["hash", "dissect", "demo"] {
        assert!(stdout.contains(command), "help should mention {}", command);
    }
}
