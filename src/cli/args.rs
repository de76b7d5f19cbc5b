// src/cli/args.rs
use clap::Parser;

/// Creates a new file from a configured template.
#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true)]
pub struct CreateArgs {
    /// Name, or unambiguous prefix of a name, of a configured template.
    pub template: String,

    /// Base name of the file to create.
    pub basename: String,

    /// Key selecting an entry of the template's keyed data set.
    #[arg(long, short)]
    pub key: Option<String>,

    /// Do not ask for user input, use defaults for unspecified values.
    #[arg(long)]
    pub autosolve: bool,
}

/// Lists the configured templates.
#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true)]
pub struct ListArgs {}

/// Searches the configured path groups for a term.
#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true)]
pub struct SearchArgs {
    /// The term to search for.
    pub needle: String,

    /// Options for the search tool. Replaces any configured `arguments`.
    #[arg(long, short, allow_hyphen_values = true)]
    pub options: Option<String>,

    /// Only search the groups below this key.
    #[arg(long, short)]
    pub group: Option<String>,

    /// Print the commands instead of running them.
    #[arg(long)]
    pub dry_run: bool,
}

/// Shows the configuration file in use and its contents.
#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true)]
pub struct ConfigArgs {}
