//! Error types for archsecure
//!
//! Library code returns `ArchsecureResult`; the binary wraps it in `anyhow`.
//! Per-node run failures are not errors of this kind: they live in
//! [`crate::domain::ports::NodeError`] and end up in the run report.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for archsecure operations
pub type ArchsecureResult<T> = Result<T, ArchsecureError>;

/// Main error type for archsecure operations
#[derive(Error, Debug)]
pub enum ArchsecureError {
    /// Two options in the catalog share a label
    #[error("duplicate option label '{label}' (labels must be unique across the whole tree)")]
    DuplicateLabel { label: String },

    /// A catalog option uses one of the synthesized navigation labels
    #[error("option label '{label}' is reserved for menu navigation")]
    ReservedLabel { label: String },

    /// A group was declared without children
    #[error("group '{label}' has no options")]
    EmptyGroup { label: String },

    /// More than one radio checked in the same sibling set
    #[error("radio options '{first}' and '{second}' are both checked in the same group")]
    ConflictingRadios { first: String, second: String },

    /// Label not present in the tree
    #[error("unknown option '{label}'")]
    UnknownLabel { label: String },

    /// Label names a group or navigation node where a checkbox/radio is required
    #[error("option '{label}' cannot be selected directly; select one of its entries instead")]
    NotSelectable { label: String },

    /// Catalog file could not be parsed
    #[error("invalid catalog in {file}: {message}")]
    InvalidCatalog { file: PathBuf, message: String },

    /// Config file could not be parsed
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
