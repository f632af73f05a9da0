//! Command handlers
//!
//! Each handler returns the process exit code.

pub mod apply;
pub mod interactive;
pub mod list;

use std::rc::Rc;

use anyhow::{Context, Result};
use tracing::warn;

use archsecure::application::{Pacing, RunReport};
use archsecure::catalog::Catalog;
use archsecure::config::Config;
use archsecure::domain::ports::ActionRegistry;
use archsecure::domain::selection::SelectionTree;
use archsecure::infrastructure::{default_registry, SystemHost};

use crate::cli::Cli;
use crate::ui::context::UiContext;

/// Exit code for a session the operator cancelled
pub const EXIT_CANCELLED: u8 = 130;

/// Everything a command needs, resolved from flags, environment and config
pub struct Session {
    pub config: Config,
    pub catalog: Catalog,
    pub ui: UiContext,
}

impl Session {
    pub fn new(cli: &Cli, config: Config) -> Result<Self> {
        let catalog_path = cli.catalog.clone().or_else(|| config.catalog.path.clone());
        let catalog = Catalog::load_or_builtin(catalog_path.as_deref())
            .context("loading option catalog")?;
        let ui = UiContext::new(cli.json, cli.color.map(Into::into), cli.no_animation, &config);
        Ok(Self {
            config,
            catalog,
            ui,
        })
    }

    /// Tree with the configured preselection plus `extra` checked
    pub fn tree(&self, extra: &[String]) -> Result<SelectionTree> {
        let labels: Vec<String> = self
            .config
            .catalog
            .preselect
            .iter()
            .chain(extra)
            .cloned()
            .collect();
        Ok(self.catalog.build_tree(&labels)?)
    }

    /// Registry of the built-in recipes; warns about options without one
    pub fn registry(&self, tree: &SelectionTree) -> ActionRegistry {
        let registry = default_registry(Rc::new(SystemHost::new()), &self.config.vpn);
        for label in registry.unregistered(tree) {
            warn!(label = %label, "option has no registered action");
            eprintln!(
                "warning: no action registered for '{}'; it will fail if selected",
                label
            );
        }
        registry
    }

    /// Indicator timing; no cosmetic ticks without animation
    pub fn pacing(&self) -> Pacing {
        let pacing = self.config.pacing();
        if self.ui.animation {
            pacing
        } else {
            Pacing {
                spinner_ticks: 0,
                ..pacing
            }
        }
    }
}

/// 130 when the run was cancelled, else 0 / 1 by failures
pub fn run_exit_code(report: &RunReport) -> u8 {
    if report.cancelled {
        EXIT_CANCELLED
    } else if report.is_success() {
        0
    } else {
        1
    }
}
