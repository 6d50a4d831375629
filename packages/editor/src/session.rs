//! # Editor Session
//!
//! Owns the commit history and the journal, and wires them to the
//! notification bus. Collaborators (log viewers, diagnostics panels,
//! validators) receive the session by injection; there is no ambient global
//! state.
//!
//! The document tree is passed to `commit`/`undo`/`redo` by the caller, the
//! single owner of the mutable structure. All operations run synchronously
//! to completion; notifications fire strictly after the mutation they
//! describe, one per operation.

use std::collections::HashMap;

use tracing::{debug, info};
use xmledit_dom::DocumentTree;

use crate::commit::{Commit, CommitOptions, EditBatch};
use crate::errors::EditorError;
use crate::events::{Listeners, SessionEvent};
use crate::history::{History, HistoryEntry};
use crate::journal::{Issue, IssueReport, Journal, LogEntry, LogKind, Notices, Severity};

/// A single editing session over one document tree.
pub struct EditorSession {
    history: History,
    journal: Journal,
    listeners: Listeners,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorSession {
    pub fn new() -> Self {
        Self {
            history: History::new(),
            journal: Journal::new(),
            listeners: Listeners::new(),
        }
    }

    pub fn with_limits(max_history: usize, max_log_entries: usize) -> Self {
        Self {
            history: History::with_max_levels(max_history),
            journal: Journal::with_max_entries(max_log_entries),
            listeners: Listeners::new(),
        }
    }

    /// Apply an edit (or batch of edits) atomically and record it as an
    /// undoable commit.
    ///
    /// On failure the tree is left exactly as before the call and nothing is
    /// pushed to history.
    pub fn commit<T: DocumentTree>(
        &mut self,
        tree: &mut T,
        edits: impl Into<EditBatch>,
        options: CommitOptions,
    ) -> Result<Commit, EditorError> {
        let commit = Commit::apply_batch(tree, edits.into(), options)?;
        info!(
            "commit '{}' applied ({} edit(s))",
            commit.title(),
            commit.edits().len()
        );
        self.history.push(commit.clone());
        self.emit_history_changed();
        Ok(commit)
    }

    /// Revert the most recent active commit. Returns the now-inactive commit,
    /// or `None` when there is nothing to undo.
    pub fn undo<T: DocumentTree>(&mut self, tree: &mut T) -> Result<Option<Commit>, EditorError> {
        let Some(commit) = self.history.undo_target().cloned() else {
            return Ok(None);
        };
        commit.revert(tree)?;
        self.history.step_back();
        debug!("undo '{}'", commit.title());
        self.emit_history_changed();
        Ok(Some(commit))
    }

    /// Re-apply the most recently undone commit. Returns it, or `None` when
    /// the cursor is at the tip.
    pub fn redo<T: DocumentTree>(&mut self, tree: &mut T) -> Result<Option<Commit>, EditorError> {
        let Some(commit) = self.history.redo_target().cloned() else {
            return Ok(None);
        };
        commit.reapply(tree)?;
        self.history.step_forward();
        debug!("redo '{}'", commit.title());
        self.emit_history_changed();
        Ok(Some(commit))
    }

    /// Ingest a log event. A `Reset` entry clears the log, the diagnoses and
    /// the commit history.
    pub fn log(&mut self, entry: LogEntry) {
        let is_reset = entry.kind == LogKind::Reset;
        self.journal.record(entry);
        if is_reset {
            info!("session reset: history and journal cleared");
            self.history.clear();
            self.emit_history_changed();
        }
        self.emit_journal_changed();
    }

    /// Ingest a validator report, replacing that validator's issues.
    pub fn report_issues(&mut self, report: IssueReport) {
        self.journal.report(report);
        self.emit_journal_changed();
    }

    /// Host-driven close of a notification surface.
    pub fn acknowledge(&mut self, severity: Severity) {
        self.journal.acknowledge(severity);
    }

    /// Register an observer; returns the id to pass to [`unobserve`].
    ///
    /// [`unobserve`]: EditorSession::unobserve
    pub fn observe<F>(&mut self, listener: F) -> u64
    where
        F: FnMut(&SessionEvent) + 'static,
    {
        self.listeners.observe(listener)
    }

    pub fn unobserve(&mut self, listener_id: u64) -> bool {
        self.listeners.unobserve(listener_id)
    }

    pub fn history(&self) -> Vec<HistoryEntry> {
        self.history.snapshot()
    }

    pub fn cursor(&self) -> usize {
        self.history.cursor()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn log_entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.journal.entries()
    }

    pub fn diagnoses(&self) -> &HashMap<String, Vec<Issue>> {
        self.journal.diagnoses()
    }

    pub fn issues_for(&self, validator_id: &str) -> Option<&[Issue]> {
        self.journal.issues_for(validator_id)
    }

    pub fn notices(&self) -> Notices {
        self.journal.notices()
    }

    fn emit_history_changed(&mut self) {
        let event = SessionEvent::HistoryChanged {
            history: self.history.snapshot(),
            cursor: self.history.cursor(),
        };
        self.listeners.emit(&event);
    }

    fn emit_journal_changed(&mut self) {
        let event = SessionEvent::JournalChanged {
            log: self.journal.entries().cloned().collect(),
            diagnoses: self.journal.diagnoses().clone(),
        };
        self.listeners.emit(&event);
    }
}
