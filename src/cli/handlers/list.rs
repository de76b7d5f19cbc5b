// src/cli/handlers/list.rs

use anyhow::Result;
use colored::*;

use crate::{
    cli::{args::ListArgs, handlers::commons},
    models::TemplateSpec,
    state::AppState,
};

const HEADER: [&str; 5] = ["Name", "Source path", "Target path", "Suffix", "Prefix"];

/// The main handler for the `list` command.
pub fn handle(args: Vec<String>, state: &AppState) -> Result<()> {
    let Some(_list_args) = commons::parse_args::<ListArgs>(&args)? else {
        return Ok(());
    };

    let templates = state.config().templates()?;
    println!("{}", "Available templates:".yellow().bold());
    if templates.is_empty() {
        println!("  {}", "(none configured)".dimmed());
        return Ok(());
    }

    let rows: Vec<Vec<String>> = templates.iter().map(|(name, spec)| row(name, spec)).collect();
    let mut lines = commons::format_table(&HEADER, &rows).into_iter();
    if let Some(header) = lines.next() {
        println!("{}", header.bold());
    }
    for line in lines {
        println!("{}", line);
    }
    Ok(())
}

fn row(name: &str, spec: &TemplateSpec) -> Vec<String> {
    vec![
        name.to_string(),
        spec.filepath.clone(),
        spec.target.path.clone(),
        spec.target.suffix.clone().unwrap_or_default(),
        spec.target.prefix.clone().unwrap_or_default(),
    ]
}
