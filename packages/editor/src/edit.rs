//! # Edit Primitives
//!
//! Atomic operations on the document tree.
//!
//! ## Semantics
//!
//! ### Insert
//! - Places a detached node under `parent`, before `reference` (`None` appends)
//! - Fails if the node already has a parent (no implicit move)
//!
//! ### Remove
//! - Detaches a node from its parent; position is captured for inversion
//! - Fails on a node with no parent — tree membership must be well-defined
//!
//! ### SetAttribute / SetTextContent
//! - Atomic replacement; the prior value is captured at apply time
//!
//! Every edit, once applied, is invertible into exactly one edit of matching
//! shape: Insert and Remove invert each other with the captured position,
//! SetAttribute and SetTextContent restore the captured prior value.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use xmledit_dom::{DocumentTree, NodeId, TreeError};

/// A single structural edit request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Edit {
    /// Insert `node` as a child of `parent`, before `reference` (`None` appends)
    Insert {
        parent: NodeId,
        node: NodeId,
        reference: Option<NodeId>,
    },

    /// Detach `node` from its current parent
    Remove { node: NodeId },

    /// Set an attribute value (`None` removes the attribute)
    SetAttribute {
        node: NodeId,
        name: String,
        value: Option<String>,
    },

    /// Replace the text content of a node (atomic, not a character diff)
    SetTextContent { node: NodeId, text: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstraintError {
    #[error("node {0} is already attached to a parent")]
    AlreadyAttached(NodeId),

    #[error("node {0} has no parent")]
    Detached(NodeId),

    #[error("{0}")]
    Tree(#[from] TreeError),
}

impl Edit {
    /// Apply the edit to the tree, capturing enough prior state (parent,
    /// sibling position, attribute/text value) to construct the inverse.
    ///
    /// Performs exactly one tree mutation and no other side effect.
    pub fn apply<T: DocumentTree>(&self, tree: &mut T) -> Result<AppliedEdit, ConstraintError> {
        let inverse = match self {
            Edit::Insert {
                parent,
                node,
                reference,
            } => {
                if tree.parent(*node).is_some() {
                    return Err(ConstraintError::AlreadyAttached(*node));
                }
                tree.insert_child(*parent, *node, *reference)?;
                Edit::Remove { node: *node }
            }

            Edit::Remove { node } => {
                let parent = tree.parent(*node).ok_or(ConstraintError::Detached(*node))?;
                let reference = tree.next_sibling(*node);
                tree.remove_child(*node)?;
                Edit::Insert {
                    parent,
                    node: *node,
                    reference,
                }
            }

            Edit::SetAttribute { node, name, value } => {
                let prior = tree.attribute(*node, name);
                tree.set_attribute(*node, name, value.as_deref())?;
                Edit::SetAttribute {
                    node: *node,
                    name: name.clone(),
                    value: prior,
                }
            }

            Edit::SetTextContent { node, text } => {
                let prior = tree.text_content(*node).unwrap_or_default();
                tree.set_text_content(*node, text)?;
                Edit::SetTextContent {
                    node: *node,
                    text: prior,
                }
            }
        };

        Ok(AppliedEdit {
            edit: self.clone(),
            inverse,
        })
    }

    /// Human-readable label, used as the default commit title.
    pub(crate) fn describe(&self) -> &'static str {
        match self {
            Edit::Insert { .. } => "Insert node",
            Edit::Remove { .. } => "Remove node",
            Edit::SetAttribute { .. } => "Set attribute",
            Edit::SetTextContent { .. } => "Set text content",
        }
    }
}

/// An edit together with the inverse constructed at apply time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppliedEdit {
    /// The edit as requested
    pub edit: Edit,

    /// The edit that undoes it
    pub inverse: Edit,
}
