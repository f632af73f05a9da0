//! Non-interactive run over labels given on the command line

use std::sync::Arc;

use anyhow::{bail, Result};
use dialoguer::Confirm;
use tracing::info;

use archsecure::application::{CancelToken, HardeningRunner, Pacing, RunOptions};
use archsecure::domain::ports::RunEventSink;
use archsecure::infrastructure::JsonEventSink;

use super::{run_exit_code, Session};
use crate::ui::run_view::LineSink;

pub fn run(session: &Session, select: &[String], yes: bool, cancel: CancelToken) -> Result<u8> {
    let tree = session.tree(select)?;
    let planned: Vec<&str> = tree
        .top_level_options()
        .into_iter()
        .filter(|&id| tree.effective_checked(id))
        .map(|id| tree.node(id).label())
        .collect();
    info!(?planned, "apply requested");

    if !yes {
        if !session.ui.caps.stdin_is_tty {
            bail!("refusing to prompt without a terminal; pass --yes to apply");
        }
        let confirmed = Confirm::new()
            .with_prompt(format!("Apply {}?", planned.join(", ")))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Aborted; nothing was changed.");
            return Ok(0);
        }
    }

    let registry = session.registry(&tree);
    let sink: Arc<dyn RunEventSink> = if session.ui.json {
        Arc::new(JsonEventSink::stdout())
    } else {
        Arc::new(LineSink::stdout(session.ui))
    };
    let options = RunOptions::new()
        .with_pacing(Pacing::none())
        .with_cancel(cancel);
    let report = HardeningRunner::new(registry).run_with_events(&tree, &options, sink);
    Ok(run_exit_code(&report))
}
