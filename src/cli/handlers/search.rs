// src/cli/handlers/search.rs

use anyhow::{Context, Result};
use colored::*;

use crate::{
    cli::{args::SearchArgs, handlers::commons},
    core::{
        command_builder::{self, SearchOptions},
        search_tree::SearchTree,
        template_engine::TemplateEngine,
    },
    state::AppState,
    system::executor,
};

/// The main handler for the `search` command.
///
/// Commands run one after another. A failing command is reported and the rest still run.
pub fn handle(args: Vec<String>, state: &AppState) -> Result<()> {
    let Some(search_args) = commons::parse_args::<SearchArgs>(&args)? else {
        return Ok(());
    };

    let tree = SearchTree::from_value(&state.config().search_tree())
        .context("Invalid `commands.search` configuration")?;
    let options = SearchOptions {
        options: search_args.options,
        group: search_args.group,
    };
    let commands =
        command_builder::build_commands(&search_args.needle, &options, &tree, &TemplateEngine::new())?;

    if commands.is_empty() {
        println!("{}", "No search paths matched.".yellow());
        return Ok(());
    }

    if search_args.dry_run {
        for command in &commands {
            println!("{}", command);
        }
        return Ok(());
    }

    for command in &commands {
        println!("{} {}", "run".green().bold(), command.dimmed());
        match executor::execute_and_capture_output(command) {
            Ok(output) => print!("{}", output),
            Err(e) => eprintln!("{} {}", "Warning:".yellow().bold(), e),
        }
    }
    Ok(())
}
