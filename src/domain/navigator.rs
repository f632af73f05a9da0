//! Menu navigation.
//!
//! Interprets operator input against the level currently shown. The
//! navigator holds only the tree it works on and the level it is looking
//! at; it never renders.

use super::selection::{LevelId, MenuCommand, NodeKind, SelectionTree};

/// Operator input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavInput {
    Up,
    Down,
    /// Toggle a leaf, enter a group, or trigger an action/back node
    Select,
    /// Back out one level; at the root this ends the session
    Cancel,
    /// Uncheck everything in the current level and below
    Clear,
}

/// Why the session ended without a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    /// The operator picked the abort entry
    Selected,
    /// The operator cancelled at the root level
    Cancelled,
}

/// Result of handling one input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOutcome {
    /// Keep reading input (state may have changed)
    Continue,
    /// Run the selected options
    Execute,
    /// End the session without running anything
    Abort(AbortReason),
}

impl MenuOutcome {
    pub fn is_finished(&self) -> bool {
        !matches!(self, MenuOutcome::Continue)
    }
}

/// Dispatches input over a [`SelectionTree`]
#[derive(Debug)]
pub struct Navigator<'t> {
    tree: &'t mut SelectionTree,
    level: LevelId,
}

impl<'t> Navigator<'t> {
    /// Start at the root level
    pub fn new(tree: &'t mut SelectionTree) -> Self {
        let level = tree.root();
        Self { tree, level }
    }

    /// Level currently shown
    pub fn level(&self) -> LevelId {
        self.level
    }

    pub fn tree(&self) -> &SelectionTree {
        &*self.tree
    }

    pub fn depth(&self) -> usize {
        self.tree.depth(self.level)
    }

    pub fn handle(&mut self, input: NavInput) -> MenuOutcome {
        match input {
            NavInput::Up => {
                self.tree.navigate(self.level, -1);
                MenuOutcome::Continue
            }
            NavInput::Down => {
                self.tree.navigate(self.level, 1);
                MenuOutcome::Continue
            }
            NavInput::Clear => {
                self.tree.clear(self.level);
                MenuOutcome::Continue
            }
            NavInput::Cancel => match self.tree.level(self.level).parent() {
                Some(parent) => {
                    self.level = parent;
                    MenuOutcome::Continue
                }
                None => MenuOutcome::Abort(AbortReason::Cancelled),
            },
            NavInput::Select => self.select(),
        }
    }

    fn select(&mut self) -> MenuOutcome {
        let current = self.tree.current(self.level);
        match self.tree.node(current).kind() {
            NodeKind::Checkbox | NodeKind::Radio => {
                let position = self.tree.level(self.level).position();
                self.tree.toggle(self.level, position);
                MenuOutcome::Continue
            }
            NodeKind::Group(child) => {
                self.level = child;
                MenuOutcome::Continue
            }
            NodeKind::Terminal => {
                if let Some(parent) = self.tree.level(self.level).parent() {
                    self.level = parent;
                }
                MenuOutcome::Continue
            }
            NodeKind::Action(MenuCommand::Execute) => MenuOutcome::Execute,
            NodeKind::Action(MenuCommand::Abort) => MenuOutcome::Abort(AbortReason::Selected),
        }
    }
}
