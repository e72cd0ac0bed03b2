// crates/form-gate-core/src/core/schema.rs
// ============================================================================
// Module: Form Gate Schema Model
// Description: JSON-Schema-like configuration shape with condition triggers.
// Purpose: Deserialize and traverse the immutable schema that drives the form.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! A [`SchemaNode`] is one node of the declarative configuration-shape
//! description: optional `properties` (object members), an optional `items`
//! node (array element shape), an optional `default` value, and zero or more
//! condition trigger keys. Only the `hide` trigger is recognized today;
//! adding a trigger means adding one field here plus one arm in
//! [`SchemaNode::triggers`] — nothing downstream changes structurally.
//!
//! Schema values are loaded once per editing session and treated as
//! immutable afterwards. Unknown keys (titles, descriptions, validation
//! vocabulary) are ignored on deserialization; this crate does not validate
//! schema well-formedness.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Trigger Vocabulary
// ============================================================================

/// Trigger name for visibility conditions (`hide`).
pub const HIDE_TRIGGER: &str = "hide";

// ============================================================================
// SECTION: Schema Errors
// ============================================================================

/// Errors raised while loading a schema.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Schema JSON failed to parse or did not match the expected shape.
    #[error("schema parse failure: {0}")]
    Parse(String),
}

// ============================================================================
// SECTION: Schema Node
// ============================================================================

/// One node of the configuration-shape description.
///
/// # Invariants
/// - Immutable once loaded; owned by the schema-loading caller.
/// - `properties` order is irrelevant; entries are kept sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaNode {
    /// Declared schema type tag (`object`, `array`, `string`, ...).
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,
    /// Named child nodes for object-shaped values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, SchemaNode>>,
    /// Element shape for array-shaped values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaNode>>,
    /// Declared default value for leaf fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Visibility condition attached to this node (the `hide` trigger).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hide: Option<String>,
}

impl std::str::FromStr for SchemaNode {
    type Err = SchemaError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(input).map_err(|err| SchemaError::Parse(err.to_string()))
    }
}

impl SchemaNode {
    /// Deserializes a schema from an already-parsed JSON value.
    ///
    /// # Errors
    /// Returns [`SchemaError::Parse`] when the value does not match the
    /// schema shape.
    pub fn from_value(value: Value) -> Result<Self, SchemaError> {
        serde_json::from_value(value).map_err(|err| SchemaError::Parse(err.to_string()))
    }

    /// Returns the condition triggers declared directly on this node.
    ///
    /// Each entry pairs a trigger name with its raw condition string. The
    /// iterator is the single place new trigger keys get wired in.
    pub fn triggers(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.hide.as_deref().map(|condition| (HIDE_TRIGGER, condition)).into_iter()
    }
}
