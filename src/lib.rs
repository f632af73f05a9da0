//! archsecure - interactive hardening for Arch Linux
//!
//! The operator picks hardening options from a nested terminal menu; the
//! chosen top-level options are then applied one by one, each through an
//! action registered under its label, with per-option progress and a final
//! summary. A failing option never stops the ones after it.

pub mod application;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::{CancelToken, HardeningRunner, Pacing, RunOptions, RunReport};
pub use catalog::Catalog;
pub use config::Config;
pub use domain::navigator::{AbortReason, MenuOutcome, Navigator};
pub use domain::ports::{ActionContext, ActionError, ActionRegistry, HardeningAction, NodeError};
pub use domain::selection::{OptionSpec, SelectionTree};
pub use error::{ArchsecureError, ArchsecureResult};
