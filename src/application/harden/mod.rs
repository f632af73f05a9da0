//! Harden Module
//!
//! Runs the selected hardening options one after another.
//!
//! ## Structure
//!
//! - `options` - Run configuration (`RunOptions`, `Pacing`, `CancelToken`)
//! - `result` - Per-option outcome and summary (`RunReport`, `RunEntry`)
//! - `use_case` - The sequential driver (`HardeningRunner`)
//!
//! ## Usage
//!
//! ```ignore
//! use archsecure::application::harden::{HardeningRunner, RunOptions};
//!
//! let runner = HardeningRunner::new(registry);
//! let report = runner.run(&tree, &RunOptions::default());
//! std::process::exit(report.exit_code());
//! ```

mod options;
mod result;
mod use_case;

pub use options::{CancelToken, Pacing, RunOptions};
pub use result::{RunEntry, RunReport, SkipReason};
pub use use_case::HardeningRunner;
