//! Domain Layer
//!
//! The selection model and the ports the runner talks through. Nothing in
//! here touches the terminal, the file system or external programs.
//!
//! ## Structure
//!
//! - `selection/` - Option tree arena (SelectionTree, SelectionNode, OptionSpec)
//! - `navigator` - Operator input dispatch over the tree
//! - `value_objects/` - RunStatus and RunSummary
//! - `ports/` - Action registry and run event interfaces

pub mod navigator;
pub mod ports;
pub mod selection;
pub mod value_objects;
