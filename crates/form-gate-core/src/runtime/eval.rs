// crates/form-gate-core/src/runtime/eval.rs
// ============================================================================
// Module: Safe Expression Evaluator
// Description: Restricted interpreter for single equality comparisons.
// Purpose: Resolve dotted, parent-relative condition paths against the live
//          model without any dynamic code execution.
// Dependencies: crate::core::field, serde_json, thiserror
// ============================================================================

//! ## Overview
//! The rendering environment forbids dynamic code evaluation, so conditions
//! are interpreted by a hand-rolled evaluator with an intentionally minimal
//! grammar:
//!
//! ```text
//! <path> ('===' | '!==') <literal>
//! ```
//!
//! `<path>` is one or more dot-separated identifiers, optionally prefixed by
//! literal `parent` segments that ascend the field tree one level each.
//! `<literal>` is an unquoted string compared by exact string equality after
//! trimming. Any other shape is a malformed-expression error and propagates
//! to the evaluation caller rather than defaulting to a visibility value.
//!
//! Value resolution starts at the model scope of the context field's parent
//! (the nearest enclosing group/object, not the field's own value) and
//! descends by plain member lookup. Absent values compare unequal to any
//! literal, so `hide when x === y` with missing `x` means "not hidden".
//!
//! A `parent` segment requested at the root is consumed without ascending;
//! this mirrors the long-standing behavior of the original form layer and
//! may mask authoring errors, but changing it silently would change the
//! meaning of deployed condition strings.
//!
//! If richer operators are ever needed, extend [`Condition`] and its parser;
//! do not reintroduce a general evaluation facility.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;
use thiserror::Error;

use crate::core::field::FieldNodeId;
use crate::core::field::FieldTree;

// ============================================================================
// SECTION: Expression Errors
// ============================================================================

/// Errors raised while parsing a condition string.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpressionError {
    /// The condition did not split into exactly two operands around a
    /// single `===` or `!==` operator.
    #[error("invalid expression: {expression}")]
    Malformed {
        /// The offending condition string.
        expression: String,
    },
}

// ============================================================================
// SECTION: Condition AST
// ============================================================================

/// Comparison kind of a condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// Strict equality (`===`).
    Equals,
    /// Strict inequality (`!==`).
    NotEquals,
}

/// Parsed form of a single-comparison condition.
///
/// # Invariants
/// - `segments` is non-empty (a bare operator still yields one, possibly
///   empty, left segment; empty segments simply never resolve).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    /// Dot-separated path segments of the left operand (trimmed).
    segments: Vec<String>,
    /// Comparison kind.
    comparison: Comparison,
    /// Literal right operand (trimmed, compared as a string).
    literal: String,
}

impl Condition {
    /// Parses a condition string into its AST.
    ///
    /// The equality operator is detected first; a condition containing
    /// `===` splits on it, anything else must split on `!==`.
    ///
    /// # Errors
    /// Returns [`ExpressionError::Malformed`] when the split does not yield
    /// exactly two operands.
    pub fn parse(condition: &str) -> Result<Self, ExpressionError> {
        let (comparison, operator) = if condition.contains("===") {
            (Comparison::Equals, "===")
        } else {
            (Comparison::NotEquals, "!==")
        };

        let mut split = condition.split(operator);
        let (Some(left), Some(right), None) = (split.next(), split.next(), split.next()) else {
            return Err(ExpressionError::Malformed {
                expression: condition.to_string(),
            });
        };

        Ok(Self {
            segments: left.trim().split('.').map(|segment| segment.trim().to_string()).collect(),
            comparison,
            literal: right.trim().to_string(),
        })
    }

    /// Returns the comparison kind.
    #[must_use]
    pub const fn comparison(&self) -> Comparison {
        self.comparison
    }

    /// Evaluates the condition against the model, relative to a field.
    ///
    /// Leading `parent` segments ascend the field tree; the remaining
    /// segments descend the model starting at the scope of the reached
    /// field's parent. Absent and non-string values compare unequal.
    #[must_use]
    pub fn evaluate(&self, tree: &FieldTree, field: FieldNodeId, model: &Value) -> bool {
        let mut current = field;
        let mut remaining = self.segments.as_slice();
        while let Some((first, rest)) = remaining.split_first() {
            if first != "parent" {
                break;
            }
            if let Some(parent) = tree.node(current).parent() {
                current = parent;
            }
            remaining = rest;
        }

        let mut value = tree.node(current).parent().and_then(|parent| tree.model_scope(model, parent));
        for segment in remaining {
            value = value.and_then(|scope| scope.get(segment.as_str()));
        }

        let matches = match value {
            Some(Value::String(text)) => *text == self.literal,
            _ => false,
        };
        matches == (self.comparison == Comparison::Equals)
    }
}

// ============================================================================
// SECTION: Evaluation Entry Point
// ============================================================================

/// Parses and evaluates a raw condition string in one step.
///
/// This is the call the rendering layer makes whenever it needs an
/// up-to-date visibility decision for a field.
///
/// # Errors
/// Returns [`ExpressionError::Malformed`] for conditions that do not match
/// the supported grammar.
pub fn evaluate(
    condition: &str,
    tree: &FieldTree,
    field: FieldNodeId,
    model: &Value,
) -> Result<bool, ExpressionError> {
    Ok(Condition::parse(condition)?.evaluate(tree, field, model))
}
