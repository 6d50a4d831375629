//! # Journal
//!
//! Log and diagnostics aggregation for the editor session.
//!
//! The journal is a best-effort aggregation layer, not a validator: log and
//! issue ingestion never fails, and malformed or empty fields are stored
//! as-is. Validators report issues keyed by their id; each report wholesale
//! replaces that validator's previous issues and leaves every other
//! validator's untouched.

use std::collections::{HashMap, VecDeque};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default number of retained log entries.
pub const DEFAULT_MAX_LOG_ENTRIES: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    Info,
    Warning,
    Error,
    /// Clears the log, the history and the diagnoses
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub kind: LogKind,
    pub title: String,
    pub message: Option<String>,
    /// Milliseconds since the epoch
    pub timestamp: i64,
}

impl LogEntry {
    pub fn new(kind: LogKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: None,
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn info(title: impl Into<String>) -> Self {
        Self::new(LogKind::Info, title)
    }

    pub fn warning(title: impl Into<String>) -> Self {
        Self::new(LogKind::Warning, title)
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self::new(LogKind::Error, title)
    }

    pub fn reset() -> Self {
        Self::new(LogKind::Reset, "Reset")
    }
}

/// One finding from a validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub title: String,
    pub description: Option<String>,
}

impl Issue {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A validator's full set of current findings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueReport {
    pub validator_id: String,
    pub issues: Vec<Issue>,
}

/// Two-state notification machine for one display surface.
///
/// The only in-core transition is Closed → Open; closing is the host
/// collaborator's concern (see [`Journal::acknowledge`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Notice {
    #[default]
    Closed,
    Open,
}

impl Notice {
    pub fn is_open(self) -> bool {
        self == Notice::Open
    }

    fn raise(&mut self) {
        *self = Notice::Open;
    }
}

/// Which notice a host acknowledgment targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
    Diagnostic,
}

/// One notice per display surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Notices {
    pub info: Notice,
    pub warning: Notice,
    pub error: Notice,
    pub diagnostic: Notice,
}

/// Bounded log plus per-validator diagnoses.
#[derive(Debug, Clone)]
pub struct Journal {
    log: VecDeque<LogEntry>,
    diagnoses: HashMap<String, Vec<Issue>>,
    notices: Notices,
    /// Maximum retained log entries (0 = unlimited)
    max_log_entries: usize,
}

impl Default for Journal {
    fn default() -> Self {
        Self::new()
    }
}

impl Journal {
    pub fn new() -> Self {
        Self::with_max_entries(DEFAULT_MAX_LOG_ENTRIES)
    }

    pub fn with_max_entries(max_log_entries: usize) -> Self {
        Self {
            log: VecDeque::new(),
            diagnoses: HashMap::new(),
            notices: Notices::default(),
            max_log_entries,
        }
    }

    /// Ingest a log entry. A `Reset` entry clears the log and the diagnoses;
    /// anything else is appended (evicting the oldest past the bound) and
    /// raises the matching notice.
    pub fn record(&mut self, entry: LogEntry) {
        if entry.kind == LogKind::Reset {
            debug!("journal reset");
            self.log.clear();
            self.diagnoses.clear();
            return;
        }

        match entry.kind {
            LogKind::Info => self.notices.info.raise(),
            LogKind::Warning => self.notices.warning.raise(),
            LogKind::Error => self.notices.error.raise(),
            LogKind::Reset => unreachable!(),
        }

        if self.max_log_entries > 0 && self.log.len() == self.max_log_entries {
            self.log.pop_front();
        }
        self.log.push_back(entry);
    }

    /// Ingest a validator report: replace that validator's issues wholesale.
    /// Never fails; an empty validator id is a valid key.
    pub fn report(&mut self, report: IssueReport) {
        debug!(
            "issue report from '{}': {} issue(s)",
            report.validator_id,
            report.issues.len()
        );
        self.notices.diagnostic.raise();
        self.diagnoses.insert(report.validator_id, report.issues);
    }

    /// Host-driven close of a notice. The core never closes notices itself.
    pub fn acknowledge(&mut self, severity: Severity) {
        let notice = match severity {
            Severity::Info => &mut self.notices.info,
            Severity::Warning => &mut self.notices.warning,
            Severity::Error => &mut self.notices.error,
            Severity::Diagnostic => &mut self.notices.diagnostic,
        };
        *notice = Notice::Closed;
    }

    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.log.iter()
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    pub fn diagnoses(&self) -> &HashMap<String, Vec<Issue>> {
        &self.diagnoses
    }

    pub fn issues_for(&self, validator_id: &str) -> Option<&[Issue]> {
        self.diagnoses.get(validator_id).map(Vec::as_slice)
    }

    pub fn notices(&self) -> Notices {
        self.notices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_out_empty() {
        let journal = Journal::new();
        assert!(journal.is_empty());
        assert!(journal.diagnoses().is_empty());
        assert!(!journal.notices().info.is_open());
    }

    #[test]
    fn log_entries_raise_their_notice() {
        let mut journal = Journal::new();

        journal.record(LogEntry::info("test info"));
        assert!(journal.notices().info.is_open());
        assert!(!journal.notices().warning.is_open());

        journal.record(LogEntry::warning("test warning"));
        assert!(journal.notices().warning.is_open());

        journal.record(LogEntry::error("test error"));
        assert!(journal.notices().error.is_open());

        assert_eq!(journal.len(), 3);
    }

    #[test]
    fn issue_report_raises_diagnostic_notice() {
        let mut journal = Journal::new();
        assert!(!journal.notices().diagnostic.is_open());

        journal.report(IssueReport {
            validator_id: "val".to_string(),
            issues: vec![Issue::new("test issue")],
        });

        assert!(journal.notices().diagnostic.is_open());
    }

    #[test]
    fn reports_replace_per_validator() {
        let mut journal = Journal::new();
        let schema = "/src/validators/ValidateSchema.js";
        let templates = "/src/validators/ValidateTemplates.js";

        journal.report(IssueReport {
            validator_id: schema.to_string(),
            issues: vec![Issue::new("test run 1")],
        });
        journal.report(IssueReport {
            validator_id: templates.to_string(),
            issues: vec![Issue::new("test run 3")],
        });

        // The second validator does not disturb the first.
        assert_eq!(journal.issues_for(schema).unwrap()[0].title, "test run 1");
        assert_eq!(
            journal.issues_for(templates).unwrap()[0].title,
            "test run 3"
        );

        // A new report from the first replaces its issues wholesale.
        journal.report(IssueReport {
            validator_id: schema.to_string(),
            issues: vec![Issue::new("test run 2")],
        });
        assert_eq!(journal.issues_for(schema).unwrap().len(), 1);
        assert_eq!(journal.issues_for(schema).unwrap()[0].title, "test run 2");
        assert_eq!(
            journal.issues_for(templates).unwrap()[0].title,
            "test run 3"
        );
    }

    #[test]
    fn empty_validator_id_is_a_valid_key() {
        let mut journal = Journal::new();
        journal.report(IssueReport {
            validator_id: String::new(),
            issues: vec![Issue::new("anonymous")],
        });
        assert_eq!(journal.issues_for("").unwrap().len(), 1);
    }

    #[test]
    fn reset_clears_log_and_diagnoses() {
        let mut journal = Journal::new();
        journal.record(LogEntry::info("before"));
        journal.report(IssueReport {
            validator_id: "val".to_string(),
            issues: vec![Issue::new("issue")],
        });

        journal.record(LogEntry::reset());

        assert!(journal.is_empty());
        assert!(journal.diagnoses().is_empty());
        // Notices stay raised until the host acknowledges them.
        assert!(journal.notices().info.is_open());
    }

    #[test]
    fn acknowledge_closes_one_notice() {
        let mut journal = Journal::new();
        journal.record(LogEntry::error("boom"));
        journal.record(LogEntry::info("fyi"));

        journal.acknowledge(Severity::Error);
        assert!(!journal.notices().error.is_open());
        assert!(journal.notices().info.is_open());
    }

    #[test]
    fn log_is_bounded() {
        let mut journal = Journal::with_max_entries(2);
        journal.record(LogEntry::info("one"));
        journal.record(LogEntry::info("two"));
        journal.record(LogEntry::info("three"));

        let titles: Vec<_> = journal.entries().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["two", "three"]);
    }
}
