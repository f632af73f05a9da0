//! Hardening Run Use Case
//!
//! Walks the top-level options of a [`SelectionTree`] in display order:
//! 1. An option that is not effectively checked is skipped without calling
//!    anything
//! 2. Otherwise it is marked running, its context is resolved from the
//!    tree, and the registered action is invoked
//! 3. The call's result decides between succeeded and failed
//!
//! A failed option never stops the run. Cancellation is honored at the next
//! option boundary, after which every remaining option is skipped.

use std::sync::Arc;
use std::thread;

use tracing::{debug, info, warn};

use crate::domain::ports::{
    ActionContext, ActionRegistry, NodeError, NoopEventSink, RunEvent, RunEventSink,
};
use crate::domain::selection::{NodeId, SelectionTree};
use crate::domain::value_objects::RunStatus;

use super::options::{Pacing, RunOptions};
use super::result::{RunEntry, RunReport, SkipReason};

/// Sequential hardening driver
///
/// Owns the registry; borrows the tree read-only for the duration of a run.
/// The runner is the only writer of run status.
#[derive(Debug)]
pub struct HardeningRunner {
    registry: ActionRegistry,
}

impl HardeningRunner {
    pub fn new(registry: ActionRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    /// Run without reporting
    pub fn run(&self, tree: &SelectionTree, options: &RunOptions) -> RunReport {
        self.run_with_events(tree, options, Arc::new(NoopEventSink))
    }

    /// Run and report every status change to `sink`
    ///
    /// `sink.acknowledge()` is called after the final summary and before
    /// this returns.
    pub fn run_with_events(
        &self,
        tree: &SelectionTree,
        options: &RunOptions,
        sink: Arc<dyn RunEventSink>,
    ) -> RunReport {
        let ids = tree.top_level_options();
        let mut report = RunReport {
            entries: ids
                .iter()
                .map(|&id| RunEntry::new(tree.node(id).label()))
                .collect(),
            cancelled: false,
        };

        info!(options = ids.len(), "hardening run started");
        sink.on_event(RunEvent::Started {
            labels: report.entries.iter().map(|e| e.label.clone()).collect(),
        });

        for (index, &id) in ids.iter().enumerate() {
            if options.cancel.is_cancelled() {
                report.cancelled = true;
                self.skip_remaining(&mut report, index, &sink);
                break;
            }

            if !tree.effective_checked(id) {
                finish(&mut report, index, RunStatus::Skipped, None, &sink);
                report.entries[index].skip_reason = Some(SkipReason::Unchecked);
                pause(&options.pacing, false);
                continue;
            }

            set_status(&mut report.entries[index], RunStatus::Running);
            sink.on_event(RunEvent::NodeStarted {
                index,
                label: report.entries[index].label.clone(),
            });

            self.animate(index, options, &sink);

            match self.invoke(tree, id) {
                Ok(()) => finish(&mut report, index, RunStatus::Succeeded, None, &sink),
                Err(err) => finish(&mut report, index, RunStatus::Failed, Some(err), &sink),
            }
        }

        let summary = report.summary();
        info!(
            succeeded = summary.succeeded,
            failed = summary.failed,
            skipped = summary.skipped,
            cancelled = report.cancelled,
            "hardening run completed"
        );
        sink.on_event(RunEvent::Completed {
            summary,
            cancelled: report.cancelled,
        });
        sink.acknowledge();

        report
    }

    fn invoke(&self, tree: &SelectionTree, id: NodeId) -> Result<(), NodeError> {
        let ctx = ActionContext::resolve(tree, id)?;
        debug!(label = %ctx.label, choice = ?ctx.choice, selected = ?ctx.selected, "invoking action");
        self.registry.invoke(&ctx)
    }

    fn animate(&self, index: usize, options: &RunOptions, sink: &Arc<dyn RunEventSink>) {
        let pacing = &options.pacing;
        for frame in 0..pacing.spinner_ticks {
            if options.cancel.is_cancelled() {
                break;
            }
            if sink.wants_ticks() {
                sink.on_event(RunEvent::Tick { index, frame });
            }
            pause(pacing, true);
        }
    }

    fn skip_remaining(&self, report: &mut RunReport, from: usize, sink: &Arc<dyn RunEventSink>) {
        warn!(
            remaining = report.entries.len() - from,
            "run cancelled, skipping remaining options"
        );
        for index in from..report.entries.len() {
            finish(report, index, RunStatus::Skipped, None, sink);
            report.entries[index].skip_reason = Some(SkipReason::Cancelled);
        }
    }
}

fn set_status(entry: &mut RunEntry, next: RunStatus) {
    debug_assert!(
        entry.status.can_become(next),
        "invalid transition {} -> {} for '{}'",
        entry.status,
        next,
        entry.label
    );
    debug!(label = %entry.label, status = %next, "status changed");
    entry.status = next;
}

fn finish(
    report: &mut RunReport,
    index: usize,
    status: RunStatus,
    error: Option<NodeError>,
    sink: &Arc<dyn RunEventSink>,
) {
    let entry = &mut report.entries[index];
    set_status(entry, status);

    match (&status, &error) {
        (RunStatus::Failed, Some(err)) => warn!(label = %entry.label, error = %err, "option failed"),
        (RunStatus::Succeeded, _) => info!(label = %entry.label, "option applied"),
        (RunStatus::Skipped, _) => info!(label = %entry.label, "option skipped"),
        _ => {}
    }

    sink.on_event(RunEvent::NodeFinished {
        index,
        label: entry.label.clone(),
        status,
        error: error.as_ref().map(|e| e.to_string()),
    });
    entry.error = error;
}

fn pause(pacing: &Pacing, tick: bool) {
    let wait = if tick { pacing.tick } else { pacing.skip_pause };
    if !wait.is_zero() {
        thread::sleep(wait);
    }
}
