//! archsecure CLI
//!
//! Usage: archsecure [COMMAND]
//!
//! Commands:
//!   (none)  Pick hardening options from the menu, then apply them
//!   list    Print the option tree
//!   apply   Apply options given with --select

mod cli;
mod commands;
mod logging;
mod ui;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info, warn};

use archsecure::application::CancelToken;
use archsecure::config::Config;

use cli::{Cli, Commands};
use commands::Session;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> Result<u8> {
    let loaded = Config::discover(cli.config.as_deref())?;
    for warning in &loaded.warnings {
        eprintln!("warning: {}", warning);
    }

    let _log_guard = logging::init(&loaded.config.log, cli.verbose);
    info!(
        version = env!("CARGO_PKG_VERSION"),
        config = ?loaded.source,
        "archsecure starting"
    );
    for warning in &loaded.warnings {
        warn!(%warning, "config warning");
    }

    let cancel = CancelToken::new();
    let handler_token = cancel.clone();
    if let Err(err) = ctrlc::set_handler(move || handler_token.cancel()) {
        warn!(error = %err, "could not install Ctrl+C handler");
    }

    let result = dispatch(&cli, loaded.config, cancel);
    match &result {
        Ok(code) => info!(exit_code = code, "archsecure finished"),
        Err(err) => error!(error = %format!("{:#}", err), "archsecure failed"),
    }
    result
}

fn dispatch(cli: &Cli, config: Config, cancel: CancelToken) -> Result<u8> {
    let session = Session::new(cli, config)?;
    match &cli.command {
        None => commands::interactive::run(&session, cancel),
        Some(Commands::List) => commands::list::run(&session),
        Some(Commands::Apply { select, yes }) => {
            commands::apply::run(&session, select, *yes, cancel)
        }
    }
}
