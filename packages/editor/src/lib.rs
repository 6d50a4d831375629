//! # xmledit Editor
//!
//! Transactional edit engine for structured configuration documents.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ host: parse, render, validate               │
//! └─────────────────────────────────────────────┘
//!                     ↓ edits / log / issues
//! ┌─────────────────────────────────────────────┐
//! │ editor: commits + history + journal         │
//! │  - Apply edit batches atomically            │
//! │  - Record every commit as undoable/redoable │
//! │  - Aggregate logs and validator issues      │
//! │  - Notify observers after every change      │
//! └─────────────────────────────────────────────┘
//!                     ↓ tree-mutation primitives
//! ┌─────────────────────────────────────────────┐
//! │ xmledit-dom: DocumentTree                   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core principles
//!
//! 1. **Commits are atomic**: a batch either applies fully or rolls back to
//!    a bit-identical tree
//! 2. **Every edit is invertible**: the inverse is captured at apply time
//! 3. **History is linear**: a new commit after an undo discards the undone
//!    branch
//! 4. **Aggregation is best-effort**: log and issue ingestion never fails
//!
//! ## Usage
//!
//! ```rust
//! use xmledit_dom::{DocumentTree, XmlDocument};
//! use xmledit_editor::{CommitOptions, Edit, EditorSession};
//!
//! let mut doc = XmlDocument::new("Substation");
//! let root = doc.root();
//! let bay = doc.create_element("Bay");
//! let mut session = EditorSession::new();
//!
//! session.commit(
//!     &mut doc,
//!     Edit::Insert { parent: root, node: bay, reference: None },
//!     CommitOptions::titled("Insert bay"),
//! )?;
//!
//! session.undo(&mut doc)?;
//! assert_eq!(doc.parent(bay), None);
//! session.redo(&mut doc)?;
//! assert_eq!(doc.parent(bay), Some(root));
//! # Ok::<(), xmledit_editor::EditorError>(())
//! ```

mod commit;
mod edit;
mod errors;
mod events;
mod history;
mod journal;
mod session;

pub use commit::{Commit, CommitOptions, EditBatch};
pub use edit::{AppliedEdit, ConstraintError, Edit};
pub use errors::EditorError;
pub use events::SessionEvent;
pub use history::{History, HistoryEntry, DEFAULT_MAX_LEVELS};
pub use journal::{
    Issue, IssueReport, Journal, LogEntry, LogKind, Notice, Notices, Severity,
    DEFAULT_MAX_LOG_ENTRIES,
};
pub use session::EditorSession;

// Re-export the tree contract for convenience
pub use xmledit_dom::{DocumentTree, NodeId, TreeError};
