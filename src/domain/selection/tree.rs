//! Arena-backed selection tree.
//!
//! Every menu level is a [`TreeLevel`] stored in one arena together with all
//! nodes. A group node owns its child level (`NodeKind::Group(level)`); the
//! child level points back at its parent with a plain index, so there are no
//! reference cycles and the whole tree is a single owned value.

use super::node::{MenuCommand, NodeId, NodeKind, SelectionNode};
use super::spec::{validate, OptionSpec};
use crate::error::{ArchsecureError, ArchsecureResult};

/// Label of the synthesized entry that returns to the parent level
pub const BACK_LABEL: &str = "<- Back";
/// Label of the synthesized root entry that starts the run
pub const EXECUTE_LABEL: &str = "Secure Computer!";
/// Label of the synthesized root entry that leaves without running
pub const ABORT_LABEL: &str = "Abort";

pub(crate) const RESERVED_LABELS: &[&str] = &[BACK_LABEL, EXECUTE_LABEL, ABORT_LABEL];

/// Index of a level in the selection arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LevelId(pub(crate) usize);

const ROOT: LevelId = LevelId(0);

/// One menu level: ordered nodes plus a cursor
#[derive(Debug, Clone)]
pub struct TreeLevel {
    nodes: Vec<NodeId>,
    position: usize,
    parent: Option<LevelId>,
    owner: Option<NodeId>,
}

impl TreeLevel {
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Cursor position, always `< nodes().len()`
    pub fn position(&self) -> usize {
        self.position
    }

    /// Non-owning link to the enclosing level (`None` for the root)
    pub fn parent(&self) -> Option<LevelId> {
        self.parent
    }

    /// Group node that owns this level (`None` for the root)
    pub fn owner(&self) -> Option<NodeId> {
        self.owner
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Indicator shown next to a label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    Checkbox(bool),
    Radio(bool),
    /// Effective-checked state of a group
    Group(bool),
    None,
}

/// Rendering tuple for one node of a level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row<'t> {
    pub node: NodeId,
    pub label: &'t str,
    pub indicator: Indicator,
    pub is_cursor: bool,
}

/// The whole option hierarchy
#[derive(Debug, Clone)]
pub struct SelectionTree {
    nodes: Vec<SelectionNode>,
    levels: Vec<TreeLevel>,
}

impl SelectionTree {
    /// Build a tree from caller-supplied options.
    ///
    /// Every non-root level gets one trailing [`BACK_LABEL`] node; the root
    /// gets [`EXECUTE_LABEL`] and [`ABORT_LABEL`] instead.
    pub fn build(specs: &[OptionSpec]) -> ArchsecureResult<Self> {
        validate(specs)?;

        let mut tree = Self {
            nodes: Vec::new(),
            levels: Vec::new(),
        };
        let root = tree.push_level(None);
        tree.populate(root, specs);
        tree.push_node(root, EXECUTE_LABEL, NodeKind::Action(MenuCommand::Execute), false);
        tree.push_node(root, ABORT_LABEL, NodeKind::Action(MenuCommand::Abort), false);
        Ok(tree)
    }

    fn populate(&mut self, level: LevelId, specs: &[OptionSpec]) {
        for spec in specs {
            match spec {
                OptionSpec::Checkbox { label, checked, .. } => {
                    self.push_node(level, label, NodeKind::Checkbox, *checked);
                }
                OptionSpec::Radio { label, checked, .. } => {
                    self.push_node(level, label, NodeKind::Radio, *checked);
                }
                OptionSpec::Group {
                    label, children, ..
                } => {
                    let child = self.push_level(Some(level));
                    let owner = self.push_node(level, label, NodeKind::Group(child), false);
                    self.levels[child.0].owner = Some(owner);
                    self.populate(child, children);
                    self.push_node(child, BACK_LABEL, NodeKind::Terminal, false);
                }
            }
        }
    }

    fn push_level(&mut self, parent: Option<LevelId>) -> LevelId {
        let id = LevelId(self.levels.len());
        self.levels.push(TreeLevel {
            nodes: Vec::new(),
            position: 0,
            parent,
            owner: None,
        });
        id
    }

    fn push_node(&mut self, level: LevelId, label: &str, kind: NodeKind, checked: bool) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(SelectionNode {
            label: label.to_string(),
            kind,
            checked: checked && kind.is_toggleable(),
            level,
        });
        self.levels[level.0].nodes.push(id);
        id
    }

    /// Export the caller-supplied part of the tree with current checked states.
    /// Descriptions are not kept in the tree; see `Catalog::export`.
    pub fn to_specs(&self) -> Vec<OptionSpec> {
        self.specs_for(ROOT)
    }

    fn specs_for(&self, level: LevelId) -> Vec<OptionSpec> {
        self.levels[level.0]
            .nodes
            .iter()
            .filter_map(|&id| {
                let node = &self.nodes[id.0];
                match node.kind {
                    NodeKind::Checkbox => Some(OptionSpec::Checkbox {
                        label: node.label.clone(),
                        checked: node.checked,
                        description: None,
                    }),
                    NodeKind::Radio => Some(OptionSpec::Radio {
                        label: node.label.clone(),
                        checked: node.checked,
                        description: None,
                    }),
                    NodeKind::Group(child) => Some(OptionSpec::Group {
                        label: node.label.clone(),
                        description: None,
                        children: self.specs_for(child),
                    }),
                    NodeKind::Action(_) | NodeKind::Terminal => None,
                }
            })
            .collect()
    }

    pub fn root(&self) -> LevelId {
        ROOT
    }

    pub fn level(&self, id: LevelId) -> &TreeLevel {
        &self.levels[id.0]
    }

    pub fn node(&self, id: NodeId) -> &SelectionNode {
        &self.nodes[id.0]
    }

    /// Node under the cursor of `level`
    pub fn current(&self, level: LevelId) -> NodeId {
        let lvl = &self.levels[level.0];
        lvl.nodes[lvl.position]
    }

    /// Number of levels between `level` and the root
    pub fn depth(&self, level: LevelId) -> usize {
        let mut depth = 0;
        let mut cursor = self.levels[level.0].parent;
        while let Some(parent) = cursor {
            depth += 1;
            cursor = self.levels[parent.0].parent;
        }
        depth
    }

    /// Find a caller-supplied node by label. Synthesized nodes are not found.
    pub fn find(&self, label: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|n| !n.kind.ends_navigation() && n.label == label)
            .map(NodeId)
    }

    /// Root options in display order, without the action nodes
    pub fn top_level_options(&self) -> Vec<NodeId> {
        self.levels[ROOT.0]
            .nodes
            .iter()
            .copied()
            .filter(|&id| !self.nodes[id.0].kind.ends_navigation())
            .collect()
    }

    /// Leaves report their own flag; a group is checked when any of its
    /// non-terminal children is. Computed on every call, never cached.
    pub fn effective_checked(&self, id: NodeId) -> bool {
        let node = &self.nodes[id.0];
        match node.kind {
            NodeKind::Checkbox | NodeKind::Radio => node.checked,
            NodeKind::Group(child) => self.levels[child.0]
                .nodes
                .iter()
                .filter(|&&c| self.nodes[c.0].kind != NodeKind::Terminal)
                .any(|&c| self.effective_checked(c)),
            NodeKind::Action(_) | NodeKind::Terminal => false,
        }
    }

    /// Toggle the node at `position` in `level`.
    ///
    /// A checkbox flips. A radio becomes checked and every other radio in the
    /// same level is unchecked in the same call. Any other kind is left alone.
    /// Returns whether the node was toggleable.
    pub fn toggle(&mut self, level: LevelId, position: usize) -> bool {
        let Some(&target) = self.levels[level.0].nodes.get(position) else {
            return false;
        };

        match self.nodes[target.0].kind {
            NodeKind::Checkbox => {
                let node = &mut self.nodes[target.0];
                node.checked = !node.checked;
                true
            }
            NodeKind::Radio => {
                for &sibling in &self.levels[level.0].nodes {
                    let node = &mut self.nodes[sibling.0];
                    if node.kind == NodeKind::Radio {
                        node.checked = sibling == target;
                    }
                }
                true
            }
            _ => false,
        }
    }

    /// Move the cursor by `delta`, clamped to the level bounds. Never wraps.
    pub fn navigate(&mut self, level: LevelId, delta: isize) {
        let lvl = &mut self.levels[level.0];
        let last = lvl.nodes.len().saturating_sub(1) as isize;
        let target = (lvl.position as isize).saturating_add(delta).clamp(0, last);
        lvl.position = target as usize;
    }

    /// Check a leaf by label, with the same radio exclusivity as [`toggle`](Self::toggle).
    /// An already checked checkbox stays checked.
    pub fn check(&mut self, label: &str) -> ArchsecureResult<()> {
        let id = self.find(label).ok_or_else(|| ArchsecureError::UnknownLabel {
            label: label.to_string(),
        })?;
        let node = &self.nodes[id.0];
        if !node.kind.is_toggleable() {
            return Err(ArchsecureError::NotSelectable {
                label: label.to_string(),
            });
        }
        if node.kind == NodeKind::Checkbox && node.checked {
            return Ok(());
        }

        let level = node.level;
        let position = self.levels[level.0]
            .nodes
            .iter()
            .position(|&n| n == id)
            .unwrap_or_default();
        self.toggle(level, position);
        Ok(())
    }

    /// Uncheck every checkbox and radio in `level` and all levels below it.
    pub fn clear(&mut self, level: LevelId) {
        let ids = self.levels[level.0].nodes.clone();
        for id in ids {
            match self.nodes[id.0].kind {
                NodeKind::Checkbox | NodeKind::Radio => self.nodes[id.0].checked = false,
                NodeKind::Group(child) => self.clear(child),
                NodeKind::Action(_) | NodeKind::Terminal => {}
            }
        }
    }

    /// Checked leaf labels, depth-first in display order
    pub fn checked_labels(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_checked(ROOT, &mut out);
        out
    }

    /// Checked leaf labels below a group, or the node itself when it is a checked leaf
    pub fn checked_under(&self, id: NodeId) -> Vec<String> {
        let node = &self.nodes[id.0];
        match node.kind {
            NodeKind::Group(child) => {
                let mut out = Vec::new();
                self.collect_checked(child, &mut out);
                out
            }
            NodeKind::Checkbox | NodeKind::Radio if node.checked => vec![node.label.clone()],
            _ => Vec::new(),
        }
    }

    fn collect_checked(&self, level: LevelId, out: &mut Vec<String>) {
        for &id in &self.levels[level.0].nodes {
            let node = &self.nodes[id.0];
            match node.kind {
                NodeKind::Checkbox | NodeKind::Radio if node.checked => out.push(node.label.clone()),
                NodeKind::Group(child) => self.collect_checked(child, out),
                _ => {}
            }
        }
    }

    /// Whether `level` lists at least one radio node
    pub fn has_radios(&self, level: LevelId) -> bool {
        self.levels[level.0]
            .nodes
            .iter()
            .any(|&id| self.nodes[id.0].kind == NodeKind::Radio)
    }

    /// The checked radio among the direct entries of `level`
    pub fn radio_choice(&self, level: LevelId) -> Option<NodeId> {
        self.levels[level.0].nodes.iter().copied().find(|&id| {
            let node = &self.nodes[id.0];
            node.kind == NodeKind::Radio && node.checked
        })
    }

    /// Rendering tuples for `level`
    pub fn rows(&self, level: LevelId) -> Vec<Row<'_>> {
        let lvl = &self.levels[level.0];
        lvl.nodes
            .iter()
            .enumerate()
            .map(|(i, &id)| {
                let node = &self.nodes[id.0];
                let indicator = match node.kind {
                    NodeKind::Checkbox => Indicator::Checkbox(node.checked),
                    NodeKind::Radio => Indicator::Radio(node.checked),
                    NodeKind::Group(_) => Indicator::Group(self.effective_checked(id)),
                    NodeKind::Action(_) | NodeKind::Terminal => Indicator::None,
                };
                Row {
                    node: id,
                    label: &node.label,
                    indicator,
                    is_cursor: i == lvl.position,
                }
            })
            .collect()
    }
}
