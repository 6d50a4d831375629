//! # Commits
//!
//! A commit is an atomic, invertible batch of tree edits with a title and
//! timestamp. Either all edits in the batch apply or none do: a failure
//! mid-batch rolls back the already-applied prefix in reverse order and
//! leaves the tree exactly as it was before the call.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use xmledit_dom::DocumentTree;

use crate::edit::{AppliedEdit, ConstraintError, Edit};
use crate::errors::EditorError;

/// Options for [`crate::EditorSession::commit`].
#[derive(Debug, Clone, Default)]
pub struct CommitOptions {
    /// History title; defaults to a label derived from the first edit.
    pub title: Option<String>,
}

impl CommitOptions {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
        }
    }
}

/// A single edit or an ordered sequence of edits to commit as one unit.
#[derive(Debug, Clone)]
pub struct EditBatch(Vec<Edit>);

impl EditBatch {
    pub(crate) fn into_edits(self) -> Vec<Edit> {
        self.0
    }
}

impl From<Edit> for EditBatch {
    fn from(edit: Edit) -> Self {
        Self(vec![edit])
    }
}

impl From<Vec<Edit>> for EditBatch {
    fn from(edits: Vec<Edit>) -> Self {
        Self(edits)
    }
}

/// An applied, invertible batch of edits. Immutable once pushed to history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Commit {
    edits: Vec<AppliedEdit>,
    title: String,
    /// Wall-clock creation time, milliseconds since the epoch
    timestamp: i64,
}

impl Commit {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn edits(&self) -> &[AppliedEdit] {
        &self.edits
    }

    /// Apply a batch atomically and build the commit recording it.
    ///
    /// On failure every previously applied edit is inverted in reverse order
    /// before the error is returned; nothing is recorded.
    pub(crate) fn apply_batch<T: DocumentTree>(
        tree: &mut T,
        batch: EditBatch,
        options: CommitOptions,
    ) -> Result<Commit, EditorError> {
        let edits = batch.into_edits();
        if edits.is_empty() {
            return Err(EditorError::EmptyCommit);
        }

        let title = options
            .title
            .unwrap_or_else(|| edits[0].describe().to_string());

        let mut applied: Vec<AppliedEdit> = Vec::with_capacity(edits.len());
        for (index, edit) in edits.iter().enumerate() {
            match edit.apply(tree) {
                Ok(done) => applied.push(done),
                Err(source) => {
                    warn!(
                        "commit '{}' failed at edit {}: {}; rolling back",
                        title, index, source
                    );
                    rollback(tree, &applied);
                    return Err(EditorError::CommitFailed { index, source });
                }
            }
        }

        Ok(Commit {
            edits: applied,
            title,
            timestamp: Utc::now().timestamp_millis(),
        })
    }

    /// Apply the inverses in reverse order (undo).
    pub(crate) fn revert<T: DocumentTree>(&self, tree: &mut T) -> Result<(), ConstraintError> {
        for done in self.edits.iter().rev() {
            done.inverse.apply(tree)?;
        }
        Ok(())
    }

    /// Re-apply the original edits in order (redo).
    pub(crate) fn reapply<T: DocumentTree>(&self, tree: &mut T) -> Result<(), ConstraintError> {
        for done in &self.edits {
            done.edit.apply(tree)?;
        }
        Ok(())
    }
}

/// Invert an applied prefix, most recent first. The inverses target state the
/// batch itself produced, so a failure here means the host tree broke the
/// primitive contract mid-batch.
fn rollback<T: DocumentTree>(tree: &mut T, applied: &[AppliedEdit]) {
    for done in applied.iter().rev() {
        if let Err(err) = done.inverse.apply(tree) {
            error!("rollback failed to invert {:?}: {}", done.edit, err);
        }
    }
}
