// crates/form-gate-core/tests/common/mod.rs
// ============================================================================
// Module: Core Test Helpers
// Description: Shared schema/tree construction helpers for integration tests.
// Purpose: Keep individual test files focused on behavior under test.
// Dependencies: form-gate-core, serde_json
// ============================================================================

//! Shared helpers for core integration tests.

use form_gate_core::FieldNodeId;
use form_gate_core::FieldTree;
use form_gate_core::SchemaNode;
use serde_json::Value;

/// Builds a schema from a JSON value, panicking on shape errors.
pub fn schema_from(value: Value) -> SchemaNode {
    SchemaNode::from_value(value).unwrap()
}

/// Resolves a field node by dotted path, panicking when absent.
pub fn field_at(tree: &FieldTree, path: &str) -> FieldNodeId {
    let mut current = tree.root();
    for segment in path.split('.') {
        let child = tree
            .children(current)
            .iter()
            .copied()
            .find(|&id| tree.node(id).key().map(ToString::to_string).as_deref() == Some(segment));
        current = child.unwrap_or_else(|| panic!("no field at segment {segment} of {path}"));
    }
    current
}
