//! Event Sink Implementations
//!
//! Provides concrete implementations of RunEventSink:
//! - JsonEventSink: NDJSON output for automation
//!
//! The interactive run view lives with the terminal UI in the binary.

mod json;

pub use json::JsonEventSink;
