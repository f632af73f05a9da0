//! Selection tree
//!
//! The hierarchical option model the operator edits before a run.
//!
//! - `spec` - caller-supplied option descriptions and their validation
//! - `node` - node data and kinds
//! - `tree` - the arena, cascading checked state, radio exclusivity, cursors

mod node;
mod spec;
mod tree;

pub use node::{MenuCommand, NodeId, NodeKind, SelectionNode};
pub use spec::OptionSpec;
pub use tree::{
    Indicator, LevelId, Row, SelectionTree, TreeLevel, ABORT_LABEL, BACK_LABEL, EXECUTE_LABEL,
};
