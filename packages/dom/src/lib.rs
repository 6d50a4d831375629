//! # xmledit DOM
//!
//! In-memory document tree for the xmledit engine.
//!
//! The editing core never owns node identity — it holds [`NodeId`] handles
//! into a tree supplied by the host. This crate defines that contract
//! ([`DocumentTree`]: the insert/remove/set-attribute/set-text primitives the
//! engine depends on) plus [`XmlDocument`], an arena-backed implementation
//! used by tests and single-process hosts.
//!
//! ```text
//! host (parse/serialize) → XmlDocument ← xmledit-editor (commits, undo/redo)
//! ```

mod document;
mod tree;

pub use document::XmlDocument;
pub use tree::{DocumentTree, NodeId, TreeError};
