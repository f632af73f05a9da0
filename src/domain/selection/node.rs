//! Selection node data.

use super::tree::LevelId;

/// Index of a node in the selection arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

/// What a root action node asks the caller to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    /// Run the selected hardening options
    Execute,
    /// Leave without changing anything
    Abort,
}

/// Node kind
///
/// `Group` owns the child level it points at. `Action` and `Terminal` nodes
/// are synthesized by the tree and carry no checked state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Checkbox,
    Radio,
    Group(LevelId),
    Action(MenuCommand),
    /// The "back" entry at the end of every non-root level
    Terminal,
}

impl NodeKind {
    /// Checkbox or radio: the only kinds `select` toggles.
    pub fn is_toggleable(&self) -> bool {
        matches!(self, NodeKind::Checkbox | NodeKind::Radio)
    }

    /// Action or terminal: ends navigation at its level.
    pub fn ends_navigation(&self) -> bool {
        matches!(self, NodeKind::Action(_) | NodeKind::Terminal)
    }
}

/// A node in the selection arena
#[derive(Debug, Clone)]
pub struct SelectionNode {
    pub(crate) label: String,
    pub(crate) kind: NodeKind,
    pub(crate) checked: bool,
    pub(crate) level: LevelId,
}

impl SelectionNode {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Own checked flag. Always false for groups and synthesized nodes; use
    /// [`SelectionTree::effective_checked`](super::SelectionTree::effective_checked)
    /// for the displayed state.
    pub fn checked(&self) -> bool {
        self.checked
    }

    /// Level this node is listed in
    pub fn level(&self) -> LevelId {
        self.level
    }
}
