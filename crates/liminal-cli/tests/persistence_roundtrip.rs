// liminal-cli/tests/persistence_roundtrip.rs
// ============================================================================
// Module: CLI Persistence Round-Trip
// Description: Exercises the compiled binary's snapshot persistence across
//   separate invocations, the way a user restarting the CLI would.
// Purpose: Confirm `create` then `status` observes the same record once the
//   first process has exited and a second one starts cold.
// ============================================================================

//! Spawns the compiled `liminal` binary twice against an isolated persistence
//! directory, confirming a record created by one invocation is visible to
//! the next.

#![allow(clippy::unwrap_used, reason = "Test-only output and panic-based assertions are permitted.")]

use std::process::Command;

use tempfile::TempDir;

/// Runs the `liminal` binary with `args`, writing snapshots under `persist_dir`.
fn run_cli(persist_dir: &std::path::Path, args: &[&str]) -> serde_json::Value {
    let binary = env!("CARGO_BIN_EXE_liminal");
    let output = Command::new(binary)
        .args(args)
        .env("LIMINAL_PERSIST_PATH", persist_dir)
        .output()
        .expect("liminal binary must spawn");
    assert!(output.status.success(), "cli exited non-zero: {}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).expect("cli stdout must be a json envelope")
}

#[test]
fn a_record_created_by_one_invocation_survives_a_cold_restart() {
    let persist_dir = TempDir::new().expect("temp persistence directory");

    let created = run_cli(
        persist_dir.path(),
        &[
            "create",
            "--context",
            "ctx_roundtrip",
            "--program-id",
            "prog_1",
            "--instruction-data",
            "deadbeef",
            "--origin",
            "https://example.test",
        ],
    );
    assert!(created["ok"].as_bool().unwrap(), "create must succeed: {created}");
    let tx_id = created["data"]["id"].as_str().expect("created record carries an id").to_string();

    // A fresh process, as if the CLI had been restarted, must still see the
    // record the first invocation persisted.
    let status = run_cli(persist_dir.path(), &["status", "--context", "ctx_roundtrip"]);
    assert!(status["ok"].as_bool().unwrap(), "status must succeed: {status}");
    let records = status["data"].as_array().expect("status returns an array");
    assert!(records.iter().any(|record| record["id"] == tx_id), "restarted cli must observe the previously created record");
}
