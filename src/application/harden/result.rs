//! Run Result
//!
//! Result types for a hardening run.

use crate::domain::ports::NodeError;
use crate::domain::value_objects::{RunStatus, RunSummary};

/// Why an option was not run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Not effectively checked when the runner reached it
    Unchecked,
    /// The run was cancelled before the runner reached it
    Cancelled,
}

/// Outcome of one top-level option
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunEntry {
    pub label: String,
    pub status: RunStatus,
    /// Set when `status` is `Failed`
    pub error: Option<NodeError>,
    /// Set when `status` is `Skipped`
    pub skip_reason: Option<SkipReason>,
}

impl RunEntry {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            status: RunStatus::NotStarted,
            error: None,
            skip_reason: None,
        }
    }
}

/// Result of a hardening run
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// One entry per top-level option, in display order
    pub entries: Vec<RunEntry>,
    /// Options were skipped because the run was cancelled
    pub cancelled: bool,
}

impl RunReport {
    pub fn summary(&self) -> RunSummary {
        RunSummary::from_statuses(self.entries.iter().map(|e| e.status))
    }

    pub fn failures(&self) -> impl Iterator<Item = &RunEntry> {
        self.entries
            .iter()
            .filter(|e| e.status == RunStatus::Failed)
    }

    pub fn entry(&self, label: &str) -> Option<&RunEntry> {
        self.entries.iter().find(|e| e.label == label)
    }

    pub fn is_success(&self) -> bool {
        !self.summary().has_failures()
    }

    /// Process exit code: 0 when nothing failed, 1 otherwise
    pub fn exit_code(&self) -> i32 {
        if self.is_success() {
            0
        } else {
            1
        }
    }
}
