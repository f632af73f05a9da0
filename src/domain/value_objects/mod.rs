//! Domain Value Objects

mod run_status;

pub use run_status::{RunStatus, RunSummary};
