//! Tree-mutation contract between the host document and the edit engine.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Opaque handle to a node in the host's document tree.
///
/// Handles stay valid for the lifetime of the document, including across
/// removal — a removed node is detached, not destroyed, so an inverse insert
/// can restore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(usize);

impl NodeId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("node {0} is already attached to a parent")]
    AlreadyAttached(NodeId),

    #[error("node {0} has no parent")]
    Detached(NodeId),

    #[error("reference node {0} is not a child of the parent")]
    BadReference(NodeId),

    #[error("inserting {0} here would create a cycle")]
    WouldCycle(NodeId),
}

/// The host-provided tree-mutation primitive.
///
/// Every structural change the edit engine makes goes through these methods;
/// the engine performs exactly one call per edit and captures the prior state
/// (parent, sibling position, attribute/text value) via the queries.
pub trait DocumentTree {
    fn contains(&self, node: NodeId) -> bool;

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// The child immediately after `node` under its parent, if any.
    fn next_sibling(&self, node: NodeId) -> Option<NodeId>;

    /// Insert `node` as a child of `parent`, before `reference`
    /// (`None` appends). `node` must be detached.
    fn insert_child(
        &mut self,
        parent: NodeId,
        node: NodeId,
        reference: Option<NodeId>,
    ) -> Result<(), TreeError>;

    /// Detach `node` from its current parent.
    fn remove_child(&mut self, node: NodeId) -> Result<(), TreeError>;

    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;

    /// Set or (with `None`) remove an attribute.
    fn set_attribute(
        &mut self,
        node: NodeId,
        name: &str,
        value: Option<&str>,
    ) -> Result<(), TreeError>;

    fn text_content(&self, node: NodeId) -> Option<String>;

    fn set_text_content(&mut self, node: NodeId, text: &str) -> Result<(), TreeError>;
}
