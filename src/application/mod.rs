//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (selection tree, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `HardeningRunner` - Applies the selected options in display order

pub mod harden;

pub use harden::{CancelToken, HardeningRunner, Pacing, RunEntry, RunOptions, RunReport, SkipReason};
