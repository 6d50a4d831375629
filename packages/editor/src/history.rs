//! # History Stack
//!
//! Bounded, branch-discarding undo/redo bookkeeping over commits.
//!
//! Entries are kept in a single ordered list partitioned by a cursor:
//! entries below the cursor are active (applied), entries at or beyond it
//! are undone but retained for redo and display. Pushing a new commit while
//! the cursor sits below the tip discards the undone suffix — redo is only
//! available for commits undone immediately before the next new commit.

use serde::Serialize;

use crate::commit::Commit;

/// Default maximum number of retained commits.
pub const DEFAULT_MAX_LEVELS: usize = 100;

/// Display snapshot of one history entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub title: String,
    pub timestamp: i64,
    pub edit_count: usize,
    pub is_active: bool,
}

/// Linear commit history with an active cursor.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Commit>,
    cursor: usize,
    /// Maximum retained entries (0 = unlimited)
    max_levels: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self::with_max_levels(DEFAULT_MAX_LEVELS)
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: 0,
            max_levels,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Boundary between active (applied) and undone entries.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_active(&self, index: usize) -> bool {
        index < self.cursor
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor < self.entries.len()
    }

    pub fn entries(&self) -> &[Commit] {
        &self.entries
    }

    /// Append a commit, discarding any undone suffix first.
    pub fn push(&mut self, commit: Commit) {
        self.entries.truncate(self.cursor);
        self.entries.push(commit);

        if self.max_levels > 0 && self.entries.len() > self.max_levels {
            self.entries.remove(0);
        }
        self.cursor = self.entries.len();
    }

    /// The commit an undo would revert, without moving the cursor.
    pub(crate) fn undo_target(&self) -> Option<&Commit> {
        self.cursor.checked_sub(1).map(|i| &self.entries[i])
    }

    /// The commit a redo would re-apply, without moving the cursor.
    pub(crate) fn redo_target(&self) -> Option<&Commit> {
        self.entries.get(self.cursor)
    }

    pub(crate) fn step_back(&mut self) {
        debug_assert!(self.cursor > 0);
        self.cursor -= 1;
    }

    pub(crate) fn step_forward(&mut self) {
        debug_assert!(self.cursor < self.entries.len());
        self.cursor += 1;
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }

    /// Ordered entries annotated with their active state.
    pub fn snapshot(&self) -> Vec<HistoryEntry> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, commit)| HistoryEntry {
                title: commit.title().to_string(),
                timestamp: commit.timestamp(),
                edit_count: commit.edits().len(),
                is_active: self.is_active(index),
            })
            .collect()
    }
}
