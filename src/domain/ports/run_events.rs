//! Run Event Port
//!
//! Observable interface for a hardening run. The runner is the only writer
//! of run status; sinks only read what the events carry.

use crate::domain::value_objects::{RunStatus, RunSummary};

/// Event emitted during a hardening run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    /// Run started over these top-level options, all `NotStarted`
    Started { labels: Vec<String> },

    /// The runner arrived at an option that will be invoked
    NodeStarted { index: usize, label: String },

    /// Progress indicator frame for the running option
    Tick { index: usize, frame: usize },

    /// An option reached its final status
    NodeFinished {
        index: usize,
        label: String,
        status: RunStatus,
        error: Option<String>,
    },

    /// Every option has a final status
    Completed { summary: RunSummary, cancelled: bool },
}

/// Trait for receiving run events
///
/// Implementations can be:
/// - ConsoleSink (binary): live run view in the terminal
/// - JsonEventSink: NDJSON event stream
/// - NoopEventSink: silent operation
pub trait RunEventSink: Send + Sync {
    /// Handle a run event
    fn on_event(&self, event: RunEvent);

    /// Called once after `Completed`; interactive sinks block here until the
    /// operator has seen the summary.
    fn acknowledge(&self) {}

    /// Whether this sink wants `Tick` events
    fn wants_ticks(&self) -> bool {
        true
    }
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl RunEventSink for NoopEventSink {
    fn on_event(&self, _event: RunEvent) {}

    fn wants_ticks(&self) -> bool {
        false
    }
}
