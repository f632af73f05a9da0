//! Built-in hardening actions
//!
//! Each top-level option of the built-in catalog maps to a [`Recipe`]: a
//! plan function that turns the operator's selection into idempotent
//! [`Step`]s, executed against a [`Host`].

mod apparmor;
mod firewall;
mod kernel;
pub mod steps;
mod system;
mod vpn;

use std::rc::Rc;

use tracing::info;

use crate::catalog::labels;
use crate::config::VpnConfig;
use crate::domain::ports::{ActionContext, ActionError, ActionRegistry, HardeningAction, Host};

pub use steps::{execute, Cmd, Outcome, Step};

type Plan = dyn Fn(&ActionContext) -> Result<Vec<Step>, ActionError>;

/// Hardening action built from a step plan
pub struct Recipe {
    host: Rc<dyn Host>,
    requires_choice: bool,
    plan: Box<Plan>,
}

impl Recipe {
    pub fn new(
        host: Rc<dyn Host>,
        plan: impl Fn(&ActionContext) -> Result<Vec<Step>, ActionError> + 'static,
    ) -> Self {
        Self {
            host,
            requires_choice: false,
            plan: Box::new(plan),
        }
    }

    /// Refuse to run unless one of the option's radios is checked
    pub fn requiring_choice(mut self) -> Self {
        self.requires_choice = true;
        self
    }
}

impl HardeningAction for Recipe {
    fn requires_choice(&self) -> bool {
        self.requires_choice
    }

    fn apply(&self, ctx: &ActionContext) -> Result<(), ActionError> {
        let steps = (self.plan)(ctx)?;
        if steps.is_empty() {
            return Err(ActionError::Unsupported(format!(
                "none of the selected entries under '{}' has a recipe",
                ctx.label
            )));
        }
        let outcomes = execute(self.host.as_ref(), &steps)?;
        let changed = outcomes
            .iter()
            .filter(|o| **o == Outcome::Changed)
            .count();
        info!(option = %ctx.label, steps = steps.len(), changed, "recipe applied");
        Ok(())
    }
}

/// Registry with a recipe for every top-level option of the built-in catalog
pub fn default_registry(host: Rc<dyn Host>, vpn: &VpnConfig) -> ActionRegistry {
    let vpn_config = vpn.clone();
    let mut registry = ActionRegistry::new();
    registry
        .register(
            labels::FIREWALL,
            Recipe::new(host.clone(), firewall::plan).requiring_choice(),
        )
        .register(labels::KERNEL, Recipe::new(host.clone(), kernel::plan))
        .register(labels::APPARMOR, Recipe::new(host.clone(), apparmor::plan))
        .register(
            labels::VPN,
            Recipe::new(host.clone(), move |ctx| vpn::plan(ctx, &vpn_config)),
        )
        .register(labels::XORG, Recipe::new(host.clone(), |_| system::xorg()))
        .register(
            labels::TIMESTAMPS,
            Recipe::new(host.clone(), |_| system::timestamps()),
        )
        .register(
            labels::NTP_CLIENT,
            Recipe::new(host.clone(), |_| system::ntp_client()),
        )
        .register(
            labels::MAC_RANDOMIZE,
            Recipe::new(host, |_| system::mac_randomize()),
        );
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::domain::ports::NodeError;
    use crate::infrastructure::host::ScriptedHost;

    #[test]
    fn every_builtin_option_is_registered() {
        let tree = Catalog::builtin().build_tree(&[]).unwrap();
        let registry = default_registry(Rc::new(ScriptedHost::new()), &VpnConfig::default());

        assert!(registry.unregistered(&tree).is_empty());
        assert_eq!(registry.len(), tree.top_level_options().len());
    }

    #[test]
    fn firewall_without_choice_is_rejected_before_running() {
        let host = Rc::new(ScriptedHost::new());
        let registry = default_registry(host.clone(), &VpnConfig::default());

        let err = registry
            .invoke(&ActionContext::new(labels::FIREWALL))
            .unwrap_err();

        assert!(matches!(err, NodeError::NoSelection { .. }));
        assert!(host.commands().is_empty());
    }

    #[test]
    fn recipe_failure_carries_step_error() {
        let host = Rc::new(ScriptedHost::new());
        let registry = default_registry(host, &VpnConfig::default());

        let err = registry
            .invoke(&ActionContext::new(labels::MAC_RANDOMIZE))
            .unwrap_err();

        assert_eq!(err.to_string(), "required tool 'NetworkManager' is not installed");
    }

    #[test]
    fn nothing_planned_is_a_failure() {
        let recipe = Recipe::new(Rc::new(ScriptedHost::new()), |_| Ok(Vec::new()));
        let err = recipe.apply(&ActionContext::new("Custom")).unwrap_err();
        assert!(matches!(err, ActionError::Unsupported(_)));
    }
}
