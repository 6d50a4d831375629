//! Error types for the editor

use thiserror::Error;

use crate::edit::ConstraintError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    #[error("edit violates tree constraints: {0}")]
    Constraint(#[from] ConstraintError),

    #[error("commit failed at edit {index}, batch rolled back: {source}")]
    CommitFailed {
        index: usize,
        source: ConstraintError,
    },

    #[error("a commit requires at least one edit")]
    EmptyCommit,
}
