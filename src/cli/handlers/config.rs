// src/cli/handlers/config.rs

use anyhow::Result;
use colored::*;

use crate::{
    cli::{args::ConfigArgs, handlers::commons},
    state::AppState,
};

/// The main handler for the `config` command.
pub fn handle(args: Vec<String>, state: &AppState) -> Result<()> {
    let Some(_config_args) = commons::parse_args::<ConfigArgs>(&args)? else {
        return Ok(());
    };

    let path = state.config_path();
    let status = if path.is_file() { "" } else { " (not found, using defaults)" };
    println!(
        "{} {}{}",
        "Config file:".blue(),
        path.display(),
        status.dimmed()
    );
    println!("{}", "---".dimmed());
    print!("{}", serde_yaml::to_string(state.config().data())?);
    Ok(())
}
