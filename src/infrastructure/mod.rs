//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `actions/` - Built-in hardening recipes and their step executor
//! - `events/` - Run event sinks (JSON lines)
//! - `host/` - Host implementations (System, Scripted)

pub mod actions;
pub mod events;
pub mod host;

// Re-export for convenience
pub use actions::{default_registry, Recipe};
pub use events::JsonEventSink;
pub use host::{ScriptedHost, SystemHost};
