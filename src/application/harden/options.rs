//! Run Options
//!
//! Configuration types for a hardening run.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Timing of the progress indicator
///
/// Actions are synchronous calls, so the runner cannot observe how far along
/// one is. Before each call it shows `spinner_ticks` frames spaced `tick`
/// apart; this is a fixed cosmetic wait, not progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// Interval between indicator frames
    pub tick: Duration,
    /// Frames shown before each action call
    pub spinner_ticks: usize,
    /// Display pause after a skipped option
    pub skip_pause: Duration,
}

impl Pacing {
    /// No waits at all
    pub fn none() -> Self {
        Self {
            tick: Duration::ZERO,
            spinner_ticks: 0,
            skip_pause: Duration::ZERO,
        }
    }

    pub fn from_millis(tick_ms: u64, spinner_ticks: usize, skip_pause_ms: u64) -> Self {
        Self {
            tick: Duration::from_millis(tick_ms),
            spinner_ticks,
            skip_pause: Duration::from_millis(skip_pause_ms),
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self::from_millis(100, 8, 150)
    }
}

/// Shared cancellation flag
///
/// Set from a signal handler or the run view; the runner reads it at every
/// option boundary.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Options for a hardening run
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub pacing: Pacing,
    pub cancel: CancelToken,
}

impl RunOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }
}
