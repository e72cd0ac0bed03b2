// crates/form-gate-core/tests/arrays.rs
// ============================================================================
// Module: Array Growth and Rebinding Tests
// Description: Validate array entry population, mutation, and re-anchoring.
// Purpose: Ensure every entry (old and new) carries its collapsed-path
//          conditions after the tree changes shape.
// Dependencies: form-gate-core, serde_json
// ============================================================================

//! Array entry management and expression rebinding tests.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only panic-based assertions are permitted."
)]

mod common;

use common::field_at;
use common::schema_from;
use form_gate_core::FieldKey;
use form_gate_core::FieldTreeError;
use form_gate_core::HIDE_TRIGGER;
use form_gate_core::SchemaNode;
use form_gate_core::add_array_entry;
use form_gate_core::compile_schema;
use form_gate_core::extract_expressions;
use form_gate_core::install_expressions;
use form_gate_core::populate_from_model;
use form_gate_core::rebind_array;
use form_gate_core::remove_array_entry;
use form_gate_core::visibility_report;
use serde_json::json;

/// Schema with an array `p` whose elements declare a condition on `dep`.
fn array_schema() -> SchemaNode {
    schema_from(json!({
        "properties": {
            "p": {
                "type": "array",
                "items": {
                    "properties": {
                        "action": {},
                        "dep": {"hide": "action !== x"}
                    }
                }
            }
        }
    }))
}

#[test]
fn populate_grows_one_entry_per_model_element() {
    let schema = array_schema();
    let model = json!({"p": [{"action": "x"}, {"action": "y"}]});

    let mut tree = compile_schema(&schema);
    populate_from_model(&mut tree, &schema, &model).unwrap();

    let p = field_at(&tree, "p");
    assert_eq!(tree.children(p).len(), 2);
    assert_eq!(tree.node(field_at(&tree, "p.1")).key(), Some(&FieldKey::Index(1)));
}

#[test]
fn installed_conditions_cover_every_entry() {
    let schema = array_schema();
    let model = json!({"p": [{"action": "x"}, {"action": "y"}]});

    let mut tree = compile_schema(&schema);
    populate_from_model(&mut tree, &schema, &model).unwrap();
    let table = extract_expressions(&schema);
    let root = tree.root();
    install_expressions(&table, &mut tree, root);

    for path in ["p.0.dep", "p.1.dep"] {
        let dep = field_at(&tree, path);
        assert_eq!(tree.node(dep).expression(HIDE_TRIGGER), Some("action !== x"));
    }
}

#[test]
fn entries_evaluate_against_their_own_model_object() {
    let schema = array_schema();
    let model = json!({"p": [{"action": "x"}, {"action": "y"}]});

    let mut tree = compile_schema(&schema);
    populate_from_model(&mut tree, &schema, &model).unwrap();
    let table = extract_expressions(&schema);
    let root = tree.root();
    install_expressions(&table, &mut tree, root);

    let report = visibility_report(&tree, &model).unwrap();
    assert_eq!(report.get("p.0.dep"), Some(&false));
    assert_eq!(report.get("p.1.dep"), Some(&true));
}

#[test]
fn rebind_covers_old_and_newly_added_entries() {
    let schema = array_schema();
    let model = json!({"p": [{"action": "x"}]});

    let mut tree = compile_schema(&schema);
    populate_from_model(&mut tree, &schema, &model).unwrap();
    let table = extract_expressions(&schema);
    let root = tree.root();
    install_expressions(&table, &mut tree, root);

    // The renderer adds a second entry at runtime.
    let p = field_at(&tree, "p");
    let items = schema.properties.as_ref().unwrap()["p"].items.as_ref().unwrap();
    let entry = add_array_entry(&mut tree, p, items).unwrap();
    rebind_array(&table, &mut tree, entry);

    for path in ["p.0.dep", "p.1.dep"] {
        let dep = field_at(&tree, path);
        assert_eq!(tree.node(dep).expression(HIDE_TRIGGER), Some("action !== x"));
    }
}

#[test]
fn remove_rekeys_trailing_entries_and_unlinks_the_subtree() {
    let schema = array_schema();
    let model = json!({"p": [{"action": "a0"}, {"action": "a1"}, {"action": "a2"}]});

    let mut tree = compile_schema(&schema);
    populate_from_model(&mut tree, &schema, &model).unwrap();

    let p = field_at(&tree, "p");
    let removed = field_at(&tree, "p.1");
    remove_array_entry(&mut tree, p, 1).unwrap();

    assert_eq!(tree.children(p).len(), 2);
    let keys: Vec<_> = tree
        .children(p)
        .iter()
        .map(|&entry| tree.node(entry).key().cloned())
        .collect();
    assert_eq!(keys, vec![Some(FieldKey::Index(0)), Some(FieldKey::Index(1))]);

    // The detached entry no longer points back into the tree.
    assert_eq!(tree.node(removed).parent(), None);
    assert!(tree.node(removed).expressions().is_empty());
}

#[test]
fn array_operations_reject_wrong_targets() {
    let schema = array_schema();
    let mut tree = compile_schema(&schema);
    let root = tree.root();

    let items = schema.properties.as_ref().unwrap()["p"].items.as_ref().unwrap();
    assert_eq!(add_array_entry(&mut tree, root, items), Err(FieldTreeError::NotAnArray));

    let p = field_at(&tree, "p");
    assert_eq!(
        remove_array_entry(&mut tree, p, 0),
        Err(FieldTreeError::EntryOutOfRange {
            index: 0,
            len: 0,
        })
    );
}
