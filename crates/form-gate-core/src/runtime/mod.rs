// crates/form-gate-core/src/runtime/mod.rs
// ============================================================================
// Module: Form Gate Runtime
// Description: Extraction, installation, evaluation, and compilation passes.
// Purpose: Group the bounded tree walks that run during form construction
//          and whenever the rendering layer needs a visibility decision.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Runtime passes are pure, synchronous tree walks: [`extract`] runs once
//! per schema, [`compile`] builds and grows the field tree, [`install`]
//! aligns table entries onto field nodes, [`eval`] resolves individual
//! conditions against the model, and [`visibility`] batches evaluation into
//! a per-path report.

pub mod compile;
pub mod eval;
pub mod extract;
pub mod install;
pub mod visibility;

pub use compile::add_array_entry;
pub use compile::compile_schema;
pub use compile::default_value;
pub use compile::populate_from_model;
pub use compile::remove_array_entry;
pub use eval::Comparison;
pub use eval::Condition;
pub use eval::ExpressionError;
pub use eval::evaluate;
pub use extract::ExpressionTable;
pub use extract::extract_expressions;
pub use install::install_expressions;
pub use install::rebind_array;
pub use visibility::visibility_report;
