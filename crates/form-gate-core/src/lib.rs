// crates/form-gate-core/src/lib.rs
// ============================================================================
// Module: Form Gate Core Library
// Description: Conditional field expression engine for schema-driven forms.
// Purpose: Extract declarative conditions from a schema, align them onto a
//          runtime field tree, and evaluate them against a live model.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Form Gate Core turns `hide` conditions embedded in a JSON-Schema-like
//! configuration description into visibility decisions for a rendered form.
//! The pipeline is:
//!
//! 1. [`extract_expressions`] walks the schema once and builds an
//!    [`ExpressionTable`] keyed by canonical dotted path.
//! 2. [`compile_schema`] produces the runtime [`FieldTree`] mirroring the
//!    schema (array entries are grown later with [`add_array_entry`]).
//! 3. [`install_expressions`] aligns table entries onto field nodes;
//!    [`rebind_array`] re-runs installation from a stable ancestor after an
//!    array grows or shrinks.
//! 4. [`evaluate`] resolves a single `===`/`!==` comparison against the live
//!    model whenever the rendering layer needs a visibility decision.
//!
//! Invariants:
//! - Array element paths collapse onto the array field's own path; path
//!   identity is index-insensitive.
//! - The evaluator never executes dynamic code; the grammar is a single
//!   binary comparison with `parent`-relative path navigation.
//!
//! Security posture: schema and model values are untrusted input; the
//! evaluator is deliberately restricted so hostile condition strings cannot
//! execute code or escape the model tree.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::field::FieldKey;
pub use crate::core::field::FieldKind;
pub use crate::core::field::FieldNode;
pub use crate::core::field::FieldNodeId;
pub use crate::core::field::FieldTree;
pub use crate::core::field::FieldTreeError;
pub use crate::core::schema::HIDE_TRIGGER;
pub use crate::core::schema::SchemaError;
pub use crate::core::schema::SchemaNode;
pub use crate::runtime::compile::add_array_entry;
pub use crate::runtime::compile::compile_schema;
pub use crate::runtime::compile::default_value;
pub use crate::runtime::compile::populate_from_model;
pub use crate::runtime::compile::remove_array_entry;
pub use crate::runtime::eval::Comparison;
pub use crate::runtime::eval::Condition;
pub use crate::runtime::eval::ExpressionError;
pub use crate::runtime::eval::evaluate;
pub use crate::runtime::extract::ExpressionTable;
pub use crate::runtime::extract::extract_expressions;
pub use crate::runtime::install::install_expressions;
pub use crate::runtime::install::rebind_array;
pub use crate::runtime::visibility::visibility_report;
