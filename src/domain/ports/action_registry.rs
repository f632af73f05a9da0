//! Action Registry Port
//!
//! Maps an option label to the operation that enacts it on the host. The
//! selection tree knows nothing about side effects; the runner looks each
//! top-level option up here by label.
//!
//! Every call is wrapped so that an action can only ever produce success or
//! a [`NodeError`]: returned errors and panics are both converted.

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};

use thiserror::Error;

use crate::domain::selection::{NodeId, NodeKind, SelectionTree};

/// Node-local input handed to an action
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActionContext {
    /// Label of the top-level option
    pub label: String,
    /// The checked radio among the option's direct entries
    pub choice: Option<String>,
    /// Every checked leaf under the option, depth-first
    pub selected: Vec<String>,
}

impl ActionContext {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn with_choice(mut self, choice: impl Into<String>) -> Self {
        self.choice = Some(choice.into());
        self
    }

    pub fn with_selected(mut self, selected: Vec<String>) -> Self {
        self.selected = selected;
        self
    }

    /// Build the context for `id` from the current tree state.
    ///
    /// A group whose direct entries include radios must have one of them
    /// checked; otherwise this is a [`NodeError::NoSelection`].
    pub fn resolve(tree: &SelectionTree, id: NodeId) -> Result<Self, NodeError> {
        let node = tree.node(id);
        let label = node.label().to_string();

        let choice = match node.kind() {
            NodeKind::Group(level) => {
                let choice = tree
                    .radio_choice(level)
                    .map(|c| tree.node(c).label().to_string());
                if choice.is_none() && tree.has_radios(level) {
                    return Err(NodeError::NoSelection { label });
                }
                choice
            }
            _ => None,
        };

        Ok(Self {
            selected: tree.checked_under(id),
            label,
            choice,
        })
    }

    pub fn is_selected(&self, label: &str) -> bool {
        self.selected.iter().any(|s| s == label)
    }
}

/// Failure reported by an action
#[derive(Error, Debug)]
pub enum ActionError {
    /// A required program is not installed
    #[error("required tool '{0}' is not installed")]
    MissingTool(String),

    /// A program ran and exited unsuccessfully
    #[error("'{program}' failed ({status}){}", format_stderr(.stderr))]
    CommandFailed {
        program: String,
        status: String,
        stderr: String,
    },

    /// A program could not be started
    #[error("could not run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// File access failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The action cannot be carried out on this host or with this input
    #[error("{0}")]
    Unsupported(String),

    /// The change was applied but the target state does not hold afterwards
    #[error("verification failed: {0}")]
    Verification(String),

    /// A boolean action returned false
    #[error("action reported failure")]
    Declined,
}

fn format_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {}", trimmed)
    }
}

/// Why a single option ended as failed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NodeError {
    /// The option's label has no registry entry
    #[error("no action registered for '{label}'")]
    Unregistered { label: String },

    /// The option needs a radio choice and none was checked
    #[error("'{label}' needs one of its options chosen")]
    NoSelection { label: String },

    /// The action returned an error or panicked
    #[error("{reason}")]
    ActionFailed { label: String, reason: String },
}

impl NodeError {
    pub fn label(&self) -> &str {
        match self {
            NodeError::Unregistered { label }
            | NodeError::NoSelection { label }
            | NodeError::ActionFailed { label, .. } => label,
        }
    }
}

/// An operation that enacts one option on the host
///
/// Implementations check whether the target state already holds and return
/// `Ok(())` without side effects when it does.
pub trait HardeningAction {
    /// Whether the action needs [`ActionContext::choice`] to be set
    fn requires_choice(&self) -> bool {
        false
    }

    fn apply(&self, ctx: &ActionContext) -> Result<(), ActionError>;
}

struct FnAction<F>(F);

impl<F> HardeningAction for FnAction<F>
where
    F: Fn(&ActionContext) -> bool,
{
    fn apply(&self, ctx: &ActionContext) -> Result<(), ActionError> {
        if (self.0)(ctx) {
            Ok(())
        } else {
            Err(ActionError::Declined)
        }
    }
}

/// Label-keyed set of hardening actions
#[derive(Default)]
pub struct ActionRegistry {
    entries: HashMap<String, Box<dyn HardeningAction>>,
}

impl std::fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut labels: Vec<_> = self.entries.keys().collect();
        labels.sort();
        f.debug_struct("ActionRegistry")
            .field("labels", &labels)
            .finish()
    }
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        label: impl Into<String>,
        action: impl HardeningAction + 'static,
    ) -> &mut Self {
        self.entries.insert(label.into(), Box::new(action));
        self
    }

    /// Register a plain boolean function
    pub fn register_fn(
        &mut self,
        label: impl Into<String>,
        f: impl Fn(&ActionContext) -> bool + 'static,
    ) -> &mut Self {
        self.register(label, FnAction(f))
    }

    pub fn contains(&self, label: &str) -> bool {
        self.entries.contains_key(label)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Top-level options of `tree` that have no entry
    pub fn unregistered<'t>(&self, tree: &'t SelectionTree) -> Vec<&'t str> {
        tree.top_level_options()
            .into_iter()
            .map(|id| tree.node(id).label())
            .filter(|label| !self.contains(label))
            .collect()
    }

    /// Call the action registered for `ctx.label`.
    pub fn invoke(&self, ctx: &ActionContext) -> Result<(), NodeError> {
        let action = self
            .entries
            .get(&ctx.label)
            .ok_or_else(|| NodeError::Unregistered {
                label: ctx.label.clone(),
            })?;

        if action.requires_choice() && ctx.choice.is_none() {
            return Err(NodeError::NoSelection {
                label: ctx.label.clone(),
            });
        }

        match panic::catch_unwind(AssertUnwindSafe(|| action.apply(ctx))) {
            Ok(Ok(())) => Ok(()),
            Ok(Err(err)) => Err(NodeError::ActionFailed {
                label: ctx.label.clone(),
                reason: err.to_string(),
            }),
            Err(payload) => Err(NodeError::ActionFailed {
                label: ctx.label.clone(),
                reason: format!("action panicked: {}", panic_message(payload.as_ref())),
            }),
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "unknown panic"
    }
}
