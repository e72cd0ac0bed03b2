// crates/form-gate-core/src/runtime/visibility.rs
// ============================================================================
// Module: Visibility Reporting
// Description: Batched evaluation of installed hide conditions.
// Purpose: Produce a per-path hidden/visible map for inspection tooling.
// Dependencies: crate::core, crate::runtime::eval
// ============================================================================

//! ## Overview
//! The interactive rendering layer evaluates installed conditions reactively
//! on every model change; this module is the batch equivalent used by tests
//! and the CLI: one walk, one `path -> hidden` map. Fields without a `hide`
//! condition report as visible. Malformed conditions propagate — they are
//! authoring errors, not runtime states.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde_json::Value;

use crate::core::field::FieldNodeId;
use crate::core::field::FieldTree;
use crate::core::schema::HIDE_TRIGGER;
use crate::runtime::eval::Condition;
use crate::runtime::eval::ExpressionError;

// ============================================================================
// SECTION: Reporting
// ============================================================================

/// Evaluates every installed `hide` condition against the model.
///
/// Returns a map from dotted field path to the hidden decision for every
/// field below the root (fields without a condition report `false`).
///
/// # Errors
/// Returns [`ExpressionError`] when any installed condition is malformed.
pub fn visibility_report(
    tree: &FieldTree,
    model: &Value,
) -> Result<BTreeMap<String, bool>, ExpressionError> {
    let mut report = BTreeMap::new();
    collect(tree, tree.root(), model, &mut report)?;
    Ok(report)
}

/// Records decisions for the children of `node`, depth first.
fn collect(
    tree: &FieldTree,
    node: FieldNodeId,
    model: &Value,
    report: &mut BTreeMap<String, bool>,
) -> Result<(), ExpressionError> {
    for &child in tree.children(node) {
        let hidden = match tree.node(child).expression(HIDE_TRIGGER) {
            Some(condition) => Condition::parse(condition)?.evaluate(tree, child, model),
            None => false,
        };
        report.insert(tree.path(child), hidden);
        collect(tree, child, model, report)?;
    }
    Ok(())
}
