// crates/form-gate-core/src/core/mod.rs
// ============================================================================
// Module: Form Gate Core Data Model
// Description: Schema and field-tree data structures.
// Purpose: Group the immutable schema model and the mutable runtime field tree.
// Dependencies: crate::core::{field, schema}
// ============================================================================

//! ## Overview
//! The data model splits into two halves: [`schema`] holds the immutable,
//! serde-deserialized configuration description, and [`field`] holds the
//! arena-indexed runtime tree the rendering layer mutates as the form grows.

pub mod field;
pub mod schema;

pub use field::FieldKey;
pub use field::FieldKind;
pub use field::FieldNode;
pub use field::FieldNodeId;
pub use field::FieldTree;
pub use field::FieldTreeError;
pub use schema::HIDE_TRIGGER;
pub use schema::SchemaError;
pub use schema::SchemaNode;
