// crates/form-gate-core/src/runtime/compile.rs
// ============================================================================
// Module: Schema Field Compiler
// Description: Schema-to-field-tree compilation and array entry management.
// Purpose: Build the initial field tree from a schema, grow and shrink array
//          entries at runtime, and seed default model values.
// Dependencies: crate::core::{field, schema}, serde_json
// ============================================================================

//! ## Overview
//! Compilation mirrors the schema as a field tree: object properties become
//! keyed children (in name order), arrays become [`FieldKind::Array`] nodes
//! compiled *empty* — entries exist only at runtime and are added with
//! [`add_array_entry`], keyed by their dense index. [`remove_array_entry`]
//! detaches an entry's subtree and re-keys trailing entries so indices stay
//! dense.
//!
//! [`default_value`] seeds the model side of a freshly added entry: objects
//! recurse into their properties, arrays start empty, leaves take their
//! declared `default` or null. Growing the model itself is the caller's
//! job; the tree only mirrors structure.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Map;
use serde_json::Value;

use crate::core::field::FieldKey;
use crate::core::field::FieldKind;
use crate::core::field::FieldNodeId;
use crate::core::field::FieldTree;
use crate::core::field::FieldTreeError;
use crate::core::schema::SchemaNode;

// ============================================================================
// SECTION: Compilation
// ============================================================================

/// Compiles a schema into its initial field tree.
///
/// The root is a keyless group; array fields start without entries.
#[must_use]
pub fn compile_schema(schema: &SchemaNode) -> FieldTree {
    let mut tree = FieldTree::new();
    let root = tree.root();
    compile_children(schema, &mut tree, root);
    tree
}

/// Returns the field kind a schema node compiles to.
fn field_kind(schema: &SchemaNode) -> FieldKind {
    if schema.items.is_some() || schema.schema_type.as_deref() == Some("array") {
        FieldKind::Array
    } else if schema.properties.is_some() || schema.schema_type.as_deref() == Some("object") {
        FieldKind::Object
    } else {
        FieldKind::Leaf
    }
}

/// Compiles the object properties of `schema` as children of `parent`.
fn compile_children(schema: &SchemaNode, tree: &mut FieldTree, parent: FieldNodeId) {
    if let Some(properties) = &schema.properties {
        for (name, child) in properties {
            let kind = field_kind(child);
            let id = tree.push_child(parent, Some(FieldKey::Property(name.clone())), kind);
            // Array children are grown at runtime, not compiled.
            if kind != FieldKind::Array {
                compile_children(child, tree, id);
            }
        }
    }
}

// ============================================================================
// SECTION: Array Entry Management
// ============================================================================

/// Adds one entry to an array field, compiled from the element schema.
///
/// The new entry is keyed by the next dense index. Callers are expected to
/// re-run expression installation afterwards (see
/// [`crate::runtime::install::rebind_array`]).
///
/// # Errors
/// Returns [`FieldTreeError::NotAnArray`] when `array` is not an
/// array-kind node.
pub fn add_array_entry(
    tree: &mut FieldTree,
    array: FieldNodeId,
    element_schema: &SchemaNode,
) -> Result<FieldNodeId, FieldTreeError> {
    if tree.node(array).kind() != FieldKind::Array {
        return Err(FieldTreeError::NotAnArray);
    }
    let index = tree.children(array).len();
    let kind = field_kind(element_schema);
    let entry = tree.push_child(array, Some(FieldKey::Index(index)), kind);
    if kind != FieldKind::Array {
        compile_children(element_schema, tree, entry);
    }
    Ok(entry)
}

/// Removes the entry at `index` from an array field.
///
/// The entry's subtree is detached and unlinked; trailing entries are
/// re-keyed so indices stay dense. Callers are expected to re-run
/// expression installation afterwards.
///
/// # Errors
/// Returns [`FieldTreeError::NotAnArray`] for non-array nodes and
/// [`FieldTreeError::EntryOutOfRange`] for indices past the current entry
/// count.
pub fn remove_array_entry(
    tree: &mut FieldTree,
    array: FieldNodeId,
    index: usize,
) -> Result<(), FieldTreeError> {
    if tree.node(array).kind() != FieldKind::Array {
        return Err(FieldTreeError::NotAnArray);
    }
    let len = tree.children(array).len();
    if index >= len {
        return Err(FieldTreeError::EntryOutOfRange {
            index,
            len,
        });
    }

    tree.detach_child(array, index);
    let trailing: Vec<FieldNodeId> = tree.children(array).iter().copied().skip(index).collect();
    for (offset, entry) in trailing.into_iter().enumerate() {
        tree.node_mut(entry).key = Some(FieldKey::Index(index + offset));
    }
    Ok(())
}

// ============================================================================
// SECTION: Initial Population
// ============================================================================

/// Grows array entries so the tree mirrors an existing model.
///
/// Freshly compiled trees have empty arrays; loading a persisted model
/// requires one entry per model element before expressions can be
/// installed. Walks the tree and model in lockstep, adding entries for
/// every array value found. Model values with no matching schema shape are
/// skipped.
///
/// # Errors
/// Returns [`FieldTreeError`] when the tree and schema disagree about a
/// node's array-ness.
pub fn populate_from_model(
    tree: &mut FieldTree,
    schema: &SchemaNode,
    model: &Value,
) -> Result<(), FieldTreeError> {
    let root = tree.root();
    populate_node(tree, root, schema, model)
}

/// Recursively grows array entries below `node` to match `value`.
fn populate_node(
    tree: &mut FieldTree,
    node: FieldNodeId,
    schema: &SchemaNode,
    value: &Value,
) -> Result<(), FieldTreeError> {
    if tree.node(node).kind() == FieldKind::Array {
        let Some(items) = &schema.items else {
            return Ok(());
        };
        if let Some(elements) = value.as_array() {
            for element in elements {
                let entry = add_array_entry(tree, node, items)?;
                populate_node(tree, entry, items, element)?;
            }
        }
        return Ok(());
    }

    let children: Vec<FieldNodeId> = tree.children(node).to_vec();
    for child in children {
        let Some(FieldKey::Property(name)) = tree.node(child).key().cloned() else {
            continue;
        };
        let Some(child_schema) = schema.properties.as_ref().and_then(|props| props.get(&name))
        else {
            continue;
        };
        let child_value = value.get(name.as_str()).unwrap_or(&Value::Null);
        populate_node(tree, child, child_schema, child_value)?;
    }
    Ok(())
}

// ============================================================================
// SECTION: Default Seeding
// ============================================================================

/// Computes the default model value a schema node seeds.
///
/// Objects recurse into their properties, arrays start empty, leaves take
/// their declared `default` or null.
#[must_use]
pub fn default_value(schema: &SchemaNode) -> Value {
    match field_kind(schema) {
        FieldKind::Array => Value::Array(Vec::new()),
        FieldKind::Object => {
            let mut model = Map::new();
            if let Some(properties) = &schema.properties {
                for (name, child) in properties {
                    model.insert(name.clone(), default_value(child));
                }
            }
            Value::Object(model)
        }
        FieldKind::Leaf => schema.default.clone().unwrap_or(Value::Null),
    }
}
