// crates/form-gate-cli/src/main.rs
// ============================================================================
// Module: Form Gate CLI Entry Point
// Description: Inspection commands for schema-driven form conditions.
// Purpose: Run the extract/compile/install pipeline against schema and model
//          files and report visibility decisions offline.
// Dependencies: clap, form-gate-core, serde_json, thiserror
// ============================================================================

//! ## Overview
//! The Form Gate CLI runs the conditional-field pipeline outside the
//! rendering layer: `inspect` loads a schema and a model, compiles the field
//! tree, installs extracted conditions, and prints one visibility decision
//! per field; `defaults` prints the model a schema would seed. Inputs are
//! untrusted files; parse failures map to structured errors and a non-zero
//! exit code.

// ============================================================================
// SECTION: Modules
// ============================================================================

#[cfg(test)]
mod main_tests;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::Subcommand;
use form_gate_core::ExpressionError;
use form_gate_core::FieldTreeError;
use form_gate_core::SchemaNode;
use form_gate_core::compile_schema;
use form_gate_core::default_value;
use form_gate_core::extract_expressions;
use form_gate_core::install_expressions;
use form_gate_core::populate_from_model;
use form_gate_core::visibility_report;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Command Line Definition
// ============================================================================

/// Top-level command line arguments.
#[derive(Debug, Parser)]
#[command(name = "form-gate", version, about = "Inspect conditional form fields")]
struct Cli {
    /// Selected subcommand.
    #[command(subcommand)]
    command: Command,
}

/// Supported subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// Report the visibility decision for every field of a form.
    Inspect {
        /// Path to the schema JSON file.
        #[arg(long)]
        schema: PathBuf,
        /// Path to the model JSON file.
        #[arg(long)]
        model: PathBuf,
        /// Emit the report as a JSON object instead of text lines.
        #[arg(long)]
        json: bool,
    },
    /// Print the default model a schema seeds.
    Defaults {
        /// Path to the schema JSON file.
        #[arg(long)]
        schema: PathBuf,
    },
}

// ============================================================================
// SECTION: CLI Errors
// ============================================================================

/// Errors surfaced to the CLI user.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
enum CliError {
    /// An input file could not be read.
    #[error("failed to read {path}: {reason}")]
    Read {
        /// Offending file path.
        path: String,
        /// Underlying I/O failure.
        reason: String,
    },
    /// The schema file did not contain a valid schema.
    #[error("invalid schema in {path}: {reason}")]
    Schema {
        /// Offending file path.
        path: String,
        /// Underlying parse failure.
        reason: String,
    },
    /// The model file did not contain valid JSON.
    #[error("invalid model in {path}: {reason}")]
    Model {
        /// Offending file path.
        path: String,
        /// Underlying parse failure.
        reason: String,
    },
    /// An installed condition string was malformed.
    #[error("expression failure: {0}")]
    Expression(#[from] ExpressionError),
    /// The field tree rejected a structural operation.
    #[error("field tree failure: {0}")]
    FieldTree(#[from] FieldTreeError),
    /// Output could not be written.
    #[error("failed to write output: {0}")]
    Output(String),
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

fn main() -> ExitCode {
    match run(&Cli::parse().command, &mut io::stdout()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let mut stderr = io::stderr();
            let _ = writeln!(&mut stderr, "error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Dispatches a parsed command, writing output to `out`.
fn run(command: &Command, out: &mut dyn Write) -> Result<(), CliError> {
    match command {
        Command::Inspect {
            schema,
            model,
            json,
        } => command_inspect(schema, model, *json, out),
        Command::Defaults {
            schema,
        } => command_defaults(schema, out),
    }
}

// ============================================================================
// SECTION: Commands
// ============================================================================

/// Runs the full pipeline and prints the visibility report.
fn command_inspect(
    schema_path: &Path,
    model_path: &Path,
    json: bool,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let schema = load_schema(schema_path)?;
    let model = load_model(model_path)?;

    let table = extract_expressions(&schema);
    let mut tree = compile_schema(&schema);
    populate_from_model(&mut tree, &schema, &model)?;
    let root = tree.root();
    install_expressions(&table, &mut tree, root);

    let report = visibility_report(&tree, &model)?;
    if json {
        write_json(&report, out)
    } else {
        write_text(&report, out)
    }
}

/// Prints the default model seeded by a schema.
fn command_defaults(schema_path: &Path, out: &mut dyn Write) -> Result<(), CliError> {
    let schema = load_schema(schema_path)?;
    let defaults = default_value(&schema);
    let rendered = serde_json::to_string_pretty(&defaults)
        .map_err(|err| CliError::Output(err.to_string()))?;
    writeln!(out, "{rendered}").map_err(|err| CliError::Output(err.to_string()))
}

// ============================================================================
// SECTION: Input Loading
// ============================================================================

/// Reads and parses a schema file.
fn load_schema(path: &Path) -> Result<SchemaNode, CliError> {
    let text = fs::read_to_string(path).map_err(|err| CliError::Read {
        path: path.display().to_string(),
        reason: err.to_string(),
    })?;
    text.parse().map_err(|err: form_gate_core::SchemaError| CliError::Schema {
        path: path.display().to_string(),
        reason: err.to_string(),
    })
}

/// Reads and parses a model file.
fn load_model(path: &Path) -> Result<Value, CliError> {
    let text = fs::read_to_string(path).map_err(|err| CliError::Read {
        path: path.display().to_string(),
        reason: err.to_string(),
    })?;
    serde_json::from_str(&text).map_err(|err| CliError::Model {
        path: path.display().to_string(),
        reason: err.to_string(),
    })
}

// ============================================================================
// SECTION: Output Rendering
// ============================================================================

/// Writes the report as `path: visible|hidden` lines.
fn write_text(report: &BTreeMap<String, bool>, out: &mut dyn Write) -> Result<(), CliError> {
    for (path, hidden) in report {
        let state = if *hidden { "hidden" } else { "visible" };
        writeln!(out, "{path}: {state}").map_err(|err| CliError::Output(err.to_string()))?;
    }
    Ok(())
}

/// Writes the report as a pretty-printed JSON object.
fn write_json(report: &BTreeMap<String, bool>, out: &mut dyn Write) -> Result<(), CliError> {
    let rendered =
        serde_json::to_string_pretty(report).map_err(|err| CliError::Output(err.to_string()))?;
    writeln!(out, "{rendered}").map_err(|err| CliError::Output(err.to_string()))
}
