// crates/form-gate-core/src/core/field.rs
// ============================================================================
// Module: Form Gate Field Tree
// Description: Arena-indexed runtime field tree with installed expressions.
// Purpose: Mirror the schema as renderer-facing field nodes that carry
//          visibility conditions and support dynamic array growth.
// Dependencies: serde_json, thiserror
// ============================================================================

//! ## Overview
//! The field tree is the runtime counterpart of the schema: one node per
//! rendered field, keyed by property name or (for array entries) by runtime
//! index. Nodes live in a flat arena and reference their parent and children
//! by [`FieldNodeId`], so the parent back-reference is a plain index rather
//! than a cyclic object reference.
//!
//! Invariants:
//! - Children are ordered; array entry keys are dense indices starting at 0.
//! - Detached subtrees are fully unlinked (parent cleared, child lists and
//!   expressions emptied); their arena slots stay allocated but are no
//!   longer reachable from the root.
//! - `expressions` maps trigger names to raw condition strings; the
//!   evaluator parses them at evaluation time so authoring errors surface to
//!   the evaluation caller.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Field Tree Errors
// ============================================================================

/// Errors raised by structural field-tree operations.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldTreeError {
    /// An array operation targeted a non-array field.
    #[error("field is not an array")]
    NotAnArray,
    /// An array entry index was outside the current entry range.
    #[error("array entry index {index} out of range (len {len})")]
    EntryOutOfRange {
        /// Requested entry index.
        index: usize,
        /// Current number of entries.
        len: usize,
    },
}

// ============================================================================
// SECTION: Node Identity and Keys
// ============================================================================

/// Opaque arena index identifying a field node within its tree.
///
/// # Invariants
/// - Only valid for the [`FieldTree`] that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldNodeId(usize);

impl FieldNodeId {
    /// Returns the raw arena index.
    const fn index(self) -> usize {
        self.0
    }
}

/// Key of a field node within its parent.
///
/// Object members carry their property name; array entries carry their
/// runtime index. Wrapper/group nodes have no key at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKey {
    /// Named object member.
    Property(String),
    /// Array entry at a runtime index.
    Index(usize),
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Property(name) => f.write_str(name),
            Self::Index(index) => index.fmt(f),
        }
    }
}

/// Path segment used for fields that have no key.
///
/// `?` is not a valid identifier in the condition grammar, so an anonymous
/// segment can never collide with a real schema path. Pinned by test.
pub(crate) const ANONYMOUS_SEGMENT: &str = "?";

/// Shape tag of a field node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Object-shaped field with named children (also used for groups).
    Object,
    /// Array-shaped field whose children are runtime entries.
    Array,
    /// Leaf field bound directly to a model value.
    Leaf,
}

// ============================================================================
// SECTION: Field Node
// ============================================================================

/// One node of the runtime field tree.
///
/// # Invariants
/// - `parent` is `None` only for the root and for detached nodes.
/// - `children` ids always point into the owning tree's arena.
#[derive(Debug, Clone)]
pub struct FieldNode {
    /// Key within the parent, if any.
    pub(crate) key: Option<FieldKey>,
    /// Shape tag.
    pub(crate) kind: FieldKind,
    /// Parent node index (non-owning back-reference).
    pub(crate) parent: Option<FieldNodeId>,
    /// Ordered child node indices.
    pub(crate) children: Vec<FieldNodeId>,
    /// Installed expressions: trigger name to raw condition string.
    pub(crate) expressions: BTreeMap<String, String>,
}

impl FieldNode {
    /// Returns the node's key within its parent, if any.
    #[must_use]
    pub const fn key(&self) -> Option<&FieldKey> {
        self.key.as_ref()
    }

    /// Returns the node's shape tag.
    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Returns the parent node id, if any.
    #[must_use]
    pub const fn parent(&self) -> Option<FieldNodeId> {
        self.parent
    }

    /// Returns the installed expressions (trigger name to condition).
    #[must_use]
    pub const fn expressions(&self) -> &BTreeMap<String, String> {
        &self.expressions
    }

    /// Returns the condition installed for a trigger, if any.
    #[must_use]
    pub fn expression(&self, trigger: &str) -> Option<&str> {
        self.expressions.get(trigger).map(String::as_str)
    }

    /// Installs (or replaces) the condition for a trigger.
    pub fn insert_expression(&mut self, trigger: &str, condition: &str) {
        self.expressions.insert(trigger.to_string(), condition.to_string());
    }

    /// Returns the node's path segment (anonymous for keyless nodes).
    pub(crate) fn segment(&self) -> String {
        self.key.as_ref().map_or_else(|| ANONYMOUS_SEGMENT.to_string(), ToString::to_string)
    }
}

// ============================================================================
// SECTION: Field Tree
// ============================================================================

/// Arena-owned field tree rooted at a keyless group node.
///
/// # Invariants
/// - The root exists for the lifetime of the tree and has no key.
/// - Node ids are stable; removal detaches nodes without reusing slots.
#[derive(Debug, Clone)]
pub struct FieldTree {
    /// Flat node arena.
    pub(crate) nodes: Vec<FieldNode>,
    /// Root node id.
    root: FieldNodeId,
}

impl Default for FieldTree {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldTree {
    /// Creates a tree containing only the keyless root group.
    #[must_use]
    pub fn new() -> Self {
        let root = FieldNode {
            key: None,
            kind: FieldKind::Object,
            parent: None,
            children: Vec::new(),
            expressions: BTreeMap::new(),
        };
        Self {
            nodes: vec![root],
            root: FieldNodeId(0),
        }
    }

    /// Returns the root node id.
    #[must_use]
    pub const fn root(&self) -> FieldNodeId {
        self.root
    }

    /// Returns a shared reference to a node.
    #[must_use]
    pub fn node(&self, id: FieldNodeId) -> &FieldNode {
        debug_assert!(id.index() < self.nodes.len(), "field node id out of bounds");
        &self.nodes[id.index()]
    }

    /// Returns a mutable reference to a node.
    pub fn node_mut(&mut self, id: FieldNodeId) -> &mut FieldNode {
        debug_assert!(id.index() < self.nodes.len(), "field node id out of bounds");
        &mut self.nodes[id.index()]
    }

    /// Returns the ordered children of a node.
    #[must_use]
    pub fn children(&self, id: FieldNodeId) -> &[FieldNodeId] {
        &self.node(id).children
    }

    /// Appends a new child node under `parent` and returns its id.
    pub fn push_child(
        &mut self,
        parent: FieldNodeId,
        key: Option<FieldKey>,
        kind: FieldKind,
    ) -> FieldNodeId {
        let id = FieldNodeId(self.nodes.len());
        self.nodes.push(FieldNode {
            key,
            kind,
            parent: Some(parent),
            children: Vec::new(),
            expressions: BTreeMap::new(),
        });
        self.node_mut(parent).children.push(id);
        id
    }

    /// Returns the dotted path of a node from the root.
    ///
    /// The root contributes no segment; keyless intermediate nodes
    /// contribute the anonymous segment.
    #[must_use]
    pub fn path(&self, id: FieldNodeId) -> String {
        let mut segments = Vec::new();
        let mut current = id;
        while current != self.root {
            let node = self.node(current);
            segments.push(node.segment());
            match node.parent {
                Some(parent) => current = parent,
                None => break,
            }
        }
        segments.reverse();
        segments.join(".")
    }

    /// Resolves the model value a node's key addresses.
    ///
    /// Walks from the model root, descending through the keys of every
    /// ancestor (root first) and finally the node's own key. Keyless nodes
    /// are transparent: they share their parent's model scope. Returns
    /// `None` when any step is absent or shaped differently than its key
    /// expects.
    #[must_use]
    pub fn model_scope<'model>(
        &self,
        model: &'model Value,
        id: FieldNodeId,
    ) -> Option<&'model Value> {
        let mut chain = Vec::new();
        let mut current = id;
        loop {
            let node = self.node(current);
            if let Some(key) = &node.key {
                chain.push(key);
            }
            match node.parent {
                Some(parent) => current = parent,
                None => break,
            }
        }

        let mut value = model;
        for key in chain.iter().rev() {
            value = match key {
                FieldKey::Property(name) => value.get(name.as_str())?,
                FieldKey::Index(index) => value.get(*index)?,
            };
        }
        Some(value)
    }

    /// Detaches the child at `position` under `parent` and unlinks its
    /// entire subtree.
    pub(crate) fn detach_child(&mut self, parent: FieldNodeId, position: usize) {
        if position >= self.node(parent).children.len() {
            return;
        }
        let child = self.node_mut(parent).children.remove(position);
        self.unlink_subtree(child);
    }

    /// Clears parent/child links and expressions for a whole subtree.
    fn unlink_subtree(&mut self, id: FieldNodeId) {
        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            let node = self.node_mut(current);
            node.parent = None;
            node.expressions.clear();
            pending.append(&mut node.children);
        }
    }
}
