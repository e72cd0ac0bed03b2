// crates/form-gate-core/src/runtime/install.rs
// ============================================================================
// Module: Expression Installer
// Description: Path alignment and condition installation over the field tree.
// Purpose: Attach extracted conditions to the field nodes whose canonical
//          path matches a table entry, and re-anchor after array mutation.
// Dependencies: crate::core::field, crate::runtime::extract
// ============================================================================

//! ## Overview
//! Installation walks the field tree carrying the canonical path built from
//! field keys. Array entries are keyed by runtime index, which the schema
//! knows nothing about, so children of an array node inherit the array's own
//! path instead of appending their index — the field-tree side of the
//! collapsing rule in [`crate::runtime::extract`].
//!
//! Fields whose path has no table entry are left untouched, so externally
//! installed expressions survive a pass. Because collapsed paths cannot be
//! patched incrementally, [`rebind_array`] re-runs the whole pass from the
//! nearest keyless ancestor whenever an array grows or shrinks; the
//! redundant work is bounded by the tree size and keeps every entry (old and
//! new) correctly bound.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::field::FieldKind;
use crate::core::field::FieldNodeId;
use crate::core::field::FieldTree;
use crate::runtime::extract::ExpressionTable;
use crate::runtime::extract::join_path;

// ============================================================================
// SECTION: Installation
// ============================================================================

/// Installs table conditions onto every matching field under `root`.
///
/// `root` itself is treated as the path origin (empty path); its key, if
/// any, does not contribute a segment.
pub fn install_expressions(table: &ExpressionTable, tree: &mut FieldTree, root: FieldNodeId) {
    install_into(table, tree, root, "");
}

/// Walks the children of `node`, aligning paths and copying conditions.
fn install_into(table: &ExpressionTable, tree: &mut FieldTree, node: FieldNodeId, path: &str) {
    let parent_is_array = tree.node(node).kind() == FieldKind::Array;
    let children: Vec<FieldNodeId> = tree.children(node).to_vec();

    for child in children {
        let field_path = join_path(path, &tree.node(child).segment());
        // Array entries use their full path for matching but pass the
        // array's own path down, as that is what the schema represents.
        let sub_path = if parent_is_array { path.to_string() } else { field_path.clone() };

        if let Some(triggers) = table.triggers_at(&field_path) {
            for (trigger, condition) in triggers {
                tree.node_mut(child).insert_expression(trigger, condition);
            }
        }

        install_into(table, tree, child, &sub_path);
    }
}

// ============================================================================
// SECTION: Array Rebinding
// ============================================================================

/// Re-installs expressions after an array field's entries changed.
///
/// Ascends from the field's parent while the ancestor has a key and re-runs
/// [`install_expressions`] rooted at the first keyless ancestor (a group
/// boundary, typically the tree root). A keyed ancestor without a parent is
/// used as the anchor itself.
pub fn rebind_array(table: &ExpressionTable, tree: &mut FieldTree, field: FieldNodeId) {
    let mut anchor = tree.node(field).parent().unwrap_or(field);
    loop {
        let node = tree.node(anchor);
        if node.key().is_none() {
            break;
        }
        match node.parent() {
            Some(parent) => anchor = parent,
            None => break,
        }
    }
    install_expressions(table, tree, anchor);
}
