// src/cli/dispatcher.rs

use anyhow::{Result, anyhow};
use clap::CommandFactory;

use crate::{
    cli::{Cli, handlers},
    state::AppState,
};

/// Defines a system command, its aliases, and its handler.
struct CommandDefinition {
    name: &'static str,
    aliases: &'static [&'static str],
    about: &'static str,
    handler: fn(Vec<String>, &AppState) -> Result<()>,
}

/// The single source of truth for all system commands.
static COMMAND_REGISTRY: &[CommandDefinition] = &[
    CommandDefinition {
        name: "create",
        aliases: &["new"],
        about: "Create a new file from a template",
        handler: handlers::create::handle,
    },
    CommandDefinition {
        name: "list",
        aliases: &["ls"],
        about: "List the configured templates",
        handler: handlers::list::handle,
    },
    CommandDefinition {
        name: "search",
        aliases: &["s"],
        about: "Search the configured path groups",
        handler: handlers::search::handle,
    },
    CommandDefinition {
        name: "config",
        aliases: &["cfg"],
        about: "Show the configuration in use",
        handler: handlers::config::handle,
    },
];

/// Finds a command definition in the registry by its name or alias.
fn find_command(name: &str) -> Option<&'static CommandDefinition> {
    COMMAND_REGISTRY
        .iter()
        .find(|cmd| cmd.name == name || cmd.aliases.contains(&name))
}

/// Name, aliases and description of every registered command, in registry order.
pub fn command_summaries() -> impl Iterator<Item = (&'static str, &'static [&'static str], &'static str)>
{
    COMMAND_REGISTRY
        .iter()
        .map(|cmd| (cmd.name, cmd.aliases, cmd.about))
}

/// Routes `<command> [args...]` to its handler. Without a command, prints the help.
pub fn dispatch(all_args: Vec<String>, state: &AppState) -> Result<()> {
    log::debug!("Dispatching args: {:?}", all_args);

    let Some((name, rest)) = all_args.split_first() else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let command = find_command(name).ok_or_else(|| {
        anyhow!(
            "Unknown command '{}'. Run `m --help` to see the available commands.",
            name
        )
    })?;
    (command.handler)(rest.to_vec(), state)
}
