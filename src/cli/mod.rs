// src/cli/mod.rs

use clap::Parser;
use colored::*;
use std::path::PathBuf;

/// Argument structs of each command.
pub mod args;
/// Command registry and routing.
pub mod dispatcher;
/// One handler per command.
pub mod handlers;

/// Builds the command overview appended to the generated help.
fn build_commands_help() -> String {
    let mut help = format!("{}\n", "Commands:".yellow().bold());
    for (name, aliases, about) in dispatcher::command_summaries() {
        let label = if aliases.is_empty() {
            name.to_string()
        } else {
            format!("{} ({})", name, aliases.join(", "))
        };
        help.push_str(&format!("  {:<16} {}\n", label.cyan().bold(), about));
    }
    help.push_str(&format!(
        "\n{}",
        "Run `m <command> --help` for the options of a command.".dimmed()
    ));
    help
}

/// m: a personal scaffolding and search helper.
#[derive(Parser, Debug)]
#[command(
    name = "m",
    author,
    version,
    about,
    after_help = build_commands_help(),
    styles = clap::builder::Styles::styled()
        .header(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .usage(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .literal(clap::builder::styling::AnsiColor::Cyan.on_default().bold())
        .placeholder(clap::builder::styling::AnsiColor::Green.on_default()),
)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Print debug information while running.
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file to use instead of the default one.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// The command followed by its own arguments.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    pub args: Vec<String>,
}

impl Cli {
    /// Lifts `-v`/`--verbose` given after the command into the global flag.
    ///
    /// Scanning stops at `--`, so a literal `--verbose` can still be passed through.
    pub fn hoist_verbose(mut self) -> Self {
        let mut args = Vec::with_capacity(self.args.len());
        let mut passthrough = false;
        for arg in std::mem::take(&mut self.args) {
            if !passthrough && (arg == "-v" || arg == "--verbose") {
                self.verbose = true;
                continue;
            }
            if arg == "--" {
                passthrough = true;
            }
            args.push(arg);
        }
        self.args = args;
        self
    }
}
