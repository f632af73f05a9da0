//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod action_registry;
pub mod host;
pub mod run_events;

pub use action_registry::{ActionContext, ActionError, ActionRegistry, HardeningAction, NodeError};
pub use host::{CommandOutput, Host};
pub use run_events::{NoopEventSink, RunEvent, RunEventSink};
