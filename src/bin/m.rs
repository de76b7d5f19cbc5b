// src/bin/m.rs

use anyhow::Result;
use clap::Parser;
use colored::*;
use mycli::{
    cli::{Cli, dispatcher},
    core::config_loader::{self, Config},
    state::AppState,
};

/// The main entry point of the `m` application.
/// It sets up logging, loads the configuration, dispatches to the correct handler,
/// and performs centralized error handling.
fn main() {
    let cli = Cli::parse().hoist_verbose();
    init_logging(cli.verbose);

    if let Err(e) = run_cli(cli) {
        eprintln!("\n{}: {:#}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins; otherwise `--verbose` switches from warnings to debug output.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn run_cli(cli: Cli) -> Result<()> {
    log::debug!("CLI args parsed: {:?}", cli);

    let config_path = config_loader::resolve_config_path(cli.config.as_deref())?;
    let config = Config::load(&config_path)?;
    log::debug!("Using configuration '{}'.", config_path.display());

    let state = AppState::new(config_path, config);
    dispatcher::dispatch(cli.args, &state)
}
