//! Run status value objects
//!
//! - `RunStatus`: where one top-level option is in its run lifecycle
//! - `RunSummary`: final counts reported after a run

use serde::{Deserialize, Serialize};

/// Status of one top-level option during a run
///
/// Lifecycle: `NotStarted -> Skipped` or `NotStarted -> Running -> {Succeeded | Failed}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    #[default]
    NotStarted,
    Skipped,
    Running,
    Succeeded,
    Failed,
}

impl RunStatus {
    /// Returns true for `Skipped`, `Succeeded` and `Failed`
    pub fn is_final(&self) -> bool {
        matches!(
            self,
            RunStatus::Skipped | RunStatus::Succeeded | RunStatus::Failed
        )
    }

    /// Whether moving from `self` to `next` follows the lifecycle
    pub fn can_become(&self, next: RunStatus) -> bool {
        matches!(
            (self, next),
            (RunStatus::NotStarted, RunStatus::Skipped)
                | (RunStatus::NotStarted, RunStatus::Running)
                | (RunStatus::Running, RunStatus::Succeeded)
                | (RunStatus::Running, RunStatus::Failed)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::NotStarted => "not_started",
            RunStatus::Skipped => "skipped",
            RunStatus::Running => "running",
            RunStatus::Succeeded => "succeeded",
            RunStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Counts of final statuses after a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RunSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
    pub total: usize,
}

impl RunSummary {
    pub fn from_statuses(statuses: impl IntoIterator<Item = RunStatus>) -> Self {
        let mut summary = Self::default();
        for status in statuses {
            summary.total += 1;
            match status {
                RunStatus::Succeeded => summary.succeeded += 1,
                RunStatus::Failed => summary.failed += 1,
                RunStatus::Skipped => summary.skipped += 1,
                RunStatus::NotStarted | RunStatus::Running => {}
            }
        }
        summary
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}
