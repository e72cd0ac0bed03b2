// crates/form-gate-cli/src/main_tests.rs
// ============================================================================
// Module: CLI Main Helpers Tests
// Description: Unit tests for the inspect/defaults command paths.
// Purpose: Ensure file loading fails closed and reports render as expected.
// Dependencies: form-gate-cli main helpers, tempfile
// ============================================================================

//! ## Overview
//! Exercises the command dispatcher directly with temporary schema and model
//! files, capturing output in memory.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;

use tempfile::TempDir;

use super::CliError;
use super::Command;
use super::run;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Writes `contents` into a named file under `dir` and returns its path.
fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

/// Runs a command and returns captured stdout as a string.
fn run_capture(command: &Command) -> Result<String, CliError> {
    let mut out = Vec::new();
    run(command, &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

/// Schema used by the inspect tests.
const INSPECT_SCHEMA: &str = r#"{
  "type": "object",
  "properties": {
    "auth_action": {
      "type": "object",
      "properties": {
        "action_type": {"type": "string"},
        "redirect": {"type": "string", "hide": "action_type !== redirect"},
        "error": {"type": "string", "hide": "action_type !== error"}
      }
    }
  }
}"#;

// ============================================================================
// SECTION: Inspect Tests
// ============================================================================

#[test]
fn inspect_reports_visibility_text() {
    let dir = TempDir::new().unwrap();
    let schema = write_file(&dir, "schema.json", INSPECT_SCHEMA);
    let model =
        write_file(&dir, "model.json", r#"{"auth_action": {"action_type": "redirect"}}"#);

    let output = run_capture(&Command::Inspect {
        schema,
        model,
        json: false,
    })
    .unwrap();

    assert!(output.contains("auth_action.redirect: visible"));
    assert!(output.contains("auth_action.error: hidden"));
    assert!(output.contains("auth_action.action_type: visible"));
}

#[test]
fn inspect_reports_visibility_json() {
    let dir = TempDir::new().unwrap();
    let schema = write_file(&dir, "schema.json", INSPECT_SCHEMA);
    let model = write_file(&dir, "model.json", r#"{"auth_action": {"action_type": "error"}}"#);

    let output = run_capture(&Command::Inspect {
        schema,
        model,
        json: true,
    })
    .unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["auth_action.redirect"], serde_json::Value::Bool(true));
    assert_eq!(parsed["auth_action.error"], serde_json::Value::Bool(false));
}

#[test]
fn inspect_rejects_missing_schema_file() {
    let dir = TempDir::new().unwrap();
    let model = write_file(&dir, "model.json", "{}");

    let result = run_capture(&Command::Inspect {
        schema: dir.path().join("absent.json"),
        model,
        json: false,
    });

    match result {
        Err(CliError::Read {
            ..
        }) => {}
        other => panic!("expected read error, got {other:?}"),
    }
}

#[test]
fn inspect_rejects_invalid_model_json() {
    let dir = TempDir::new().unwrap();
    let schema = write_file(&dir, "schema.json", INSPECT_SCHEMA);
    let model = write_file(&dir, "model.json", "not json");

    let result = run_capture(&Command::Inspect {
        schema,
        model,
        json: false,
    });

    match result {
        Err(CliError::Model {
            ..
        }) => {}
        other => panic!("expected model error, got {other:?}"),
    }
}

// ============================================================================
// SECTION: Defaults Tests
// ============================================================================

#[test]
fn defaults_seeds_declared_values() {
    let dir = TempDir::new().unwrap();
    let schema = write_file(
        &dir,
        "schema.json",
        r#"{
          "type": "object",
          "properties": {
            "name": {"type": "string", "default": "anonymous"},
            "tags": {"type": "array", "items": {"type": "string"}},
            "nested": {"type": "object", "properties": {"flag": {"type": "boolean"}}}
          }
        }"#,
    );

    let output = run_capture(&Command::Defaults {
        schema,
    })
    .unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["name"], serde_json::Value::String("anonymous".to_string()));
    assert_eq!(parsed["tags"], serde_json::Value::Array(Vec::new()));
    assert_eq!(parsed["nested"]["flag"], serde_json::Value::Null);
}
