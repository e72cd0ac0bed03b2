// crates/form-gate-core/src/runtime/extract.rs
// ============================================================================
// Module: Path Expression Extractor
// Description: Schema walk producing the path-indexed expression table.
// Purpose: Collect every condition trigger declared in the schema under its
//          canonical dotted path.
// Dependencies: crate::core::schema
// ============================================================================

//! ## Overview
//! Extraction walks the schema once, starting at the empty root path, and
//! records `path -> {trigger: condition}` for every trigger key found
//! directly on a node. `properties` edges append a dotted segment; `items`
//! edges deliberately append nothing — the collapsing rule that makes array
//! element conditions addressable through the array field's own path, since
//! the field tree keys array entries by runtime index rather than by schema
//! vocabulary.
//!
//! Extraction is pure and idempotent: the same schema always yields an
//! equal table.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use crate::core::schema::SchemaNode;

// ============================================================================
// SECTION: Expression Table
// ============================================================================

/// Mapping from canonical dotted schema path to trigger conditions.
///
/// # Invariants
/// - The empty path denotes the schema root.
/// - Every recorded path is reachable from the root by `properties`/`items`
///   edges, with `items` edges contributing no segment.
/// - Read-only after extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpressionTable {
    /// Path to trigger-name-to-condition entries.
    entries: BTreeMap<String, BTreeMap<String, String>>,
}

impl ExpressionTable {
    /// Records a condition for a trigger at a path (last writer wins per
    /// trigger).
    pub fn insert(&mut self, path: &str, trigger: &str, condition: &str) {
        self.entries
            .entry(path.to_string())
            .or_default()
            .insert(trigger.to_string(), condition.to_string());
    }

    /// Returns the trigger conditions recorded at a path, if any.
    #[must_use]
    pub fn triggers_at(&self, path: &str) -> Option<&BTreeMap<String, String>> {
        self.entries.get(path)
    }

    /// Returns the number of paths with at least one recorded trigger.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no conditions were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(path, triggers)` entries in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeMap<String, String>)> {
        self.entries.iter().map(|(path, triggers)| (path.as_str(), triggers))
    }
}

// ============================================================================
// SECTION: Path Helpers
// ============================================================================

/// Joins a dotted path with a child segment (empty base yields the segment).
pub(crate) fn join_path(base: &str, segment: &str) -> String {
    if base.is_empty() { segment.to_string() } else { format!("{base}.{segment}") }
}

// ============================================================================
// SECTION: Extraction
// ============================================================================

/// Walks the schema and builds the expression table.
#[must_use]
pub fn extract_expressions(schema: &SchemaNode) -> ExpressionTable {
    let mut table = ExpressionTable::default();
    collect(schema, "", &mut table);
    table
}

/// Records triggers at `path` and recurses into child nodes.
fn collect(node: &SchemaNode, path: &str, table: &mut ExpressionTable) {
    for (trigger, condition) in node.triggers() {
        table.insert(path, trigger, condition);
    }

    if let Some(properties) = &node.properties {
        for (name, child) in properties {
            collect(child, &join_path(path, name), table);
        }
    }

    // Array element conditions collapse onto the array's own path.
    if let Some(items) = &node.items {
        collect(items, path, table);
    }
}
