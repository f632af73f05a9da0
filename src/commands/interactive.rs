//! Menu session followed by a run

use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{bail, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::info;

use archsecure::application::{CancelToken, HardeningRunner, RunOptions, RunReport};
use archsecure::domain::navigator::{AbortReason, MenuOutcome, Navigator};
use archsecure::domain::selection::SelectionTree;

use super::{run_exit_code, Session, EXIT_CANCELLED};
use crate::ui::input::{key_to_input, MenuKey};
use crate::ui::menu::{self, MenuStyle};
use crate::ui::run_view::{render_row, render_summary, ConsoleSink, RunRow};
use crate::ui::RawModeGuard;

pub fn run(session: &Session, cancel: CancelToken) -> Result<u8> {
    if !session.ui.interactive() {
        bail!("the menu needs a terminal; use 'archsecure apply --select <LABEL>' instead");
    }

    let mut tree = session.tree(&[])?;
    let registry = session.registry(&tree);

    let guard = RawModeGuard::enter()?;
    let outcome = select(&mut tree, session, &guard)?;
    info!(?outcome, checked = ?tree.checked_labels(), "menu closed");

    match outcome {
        MenuOutcome::Execute => {}
        MenuOutcome::Abort(AbortReason::Selected) | MenuOutcome::Continue => {
            drop(guard);
            println!("Aborted; nothing was changed.");
            return Ok(0);
        }
        MenuOutcome::Abort(AbortReason::Cancelled) => {
            drop(guard);
            return Ok(EXIT_CANCELLED);
        }
    }

    guard.clear(&mut io::stdout())?;
    let options = RunOptions::new()
        .with_pacing(session.pacing())
        .with_cancel(cancel.clone());
    let sink = Arc::new(ConsoleSink::new(
        session.ui,
        cancel,
        session.config.run.acknowledge,
    ));
    let report = HardeningRunner::new(registry).run_with_events(&tree, &options, sink);
    drop(guard);

    print_report(session, &report);
    Ok(run_exit_code(&report))
}

/// Read keys until the navigator reports a final outcome
fn select(
    tree: &mut SelectionTree,
    session: &Session,
    guard: &RawModeGuard,
) -> io::Result<MenuOutcome> {
    let mut nav = Navigator::new(tree);
    let mut out = io::stdout();
    loop {
        draw(&mut out, &nav, session, guard)?;
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        let outcome = match key_to_input(key) {
            Some(MenuKey::Nav(input)) => nav.handle(input),
            Some(MenuKey::Interrupt) => MenuOutcome::Abort(AbortReason::Cancelled),
            None => continue,
        };
        if outcome.is_finished() {
            return Ok(outcome);
        }
    }
}

fn draw(
    out: &mut impl Write,
    nav: &Navigator<'_>,
    session: &Session,
    guard: &RawModeGuard,
) -> io::Result<()> {
    let width = crossterm::terminal::size()
        .map(|(w, _)| w as usize)
        .unwrap_or(session.ui.caps.width as usize);
    let style = MenuStyle {
        width,
        unicode: session.ui.unicode,
        color: session.ui.color,
    };
    let text = menu::render(nav.tree(), nav.level(), &session.catalog, style);
    guard.clear(out)?;
    for line in text.lines() {
        write!(out, "{}\r\n", line)?;
    }
    out.flush()
}

/// Leave a record of the run on the normal screen
fn print_report(session: &Session, report: &RunReport) {
    for entry in &report.entries {
        let row = RunRow {
            label: entry.label.clone(),
            status: entry.status,
            frame: 0,
            error: entry.error.as_ref().map(ToString::to_string),
        };
        println!("{}", render_row(&row, &session.ui));
    }
    println!();
    println!("{}", render_summary(&report.summary(), report.cancelled));
}
