// src/cli/handlers/create.rs

use anyhow::{Context, Result};
use colored::*;

use crate::{
    cli::{args::CreateArgs, handlers::commons},
    core::{
        fetch::HttpFetcher,
        namespace_builder::{CreateOptions, NamespaceBuilder},
        prompt::{AutosolvePrompter, Prompter, TerminalPrompter},
        renderer::{self, RenderOutcome},
        template_engine::TemplateEngine,
    },
    state::AppState,
};

/// The main handler for the `create` command.
pub fn handle(args: Vec<String>, state: &AppState) -> Result<()> {
    let Some(create_args) = commons::parse_args::<CreateArgs>(&args)? else {
        return Ok(());
    };

    let mut terminal = TerminalPrompter;
    let mut autosolve = AutosolvePrompter;
    let prompter: &mut dyn Prompter = if create_args.autosolve {
        &mut autosolve
    } else {
        &mut terminal
    };
    let fetcher = HttpFetcher::default();
    let engine = TemplateEngine::new();
    let options = CreateOptions {
        key: create_args.key.clone(),
    };

    let resolved = NamespaceBuilder::new(state.config(), &engine, prompter, &fetcher).resolve(
        &create_args.template,
        &create_args.basename,
        &options,
    )?;
    for (key, value) in resolved.namespace.iter() {
        log::debug!("namespace: {} = {}", key, value);
    }

    println!(
        "{}",
        format!(
            "Creating new {} file as {} ...",
            resolved.name,
            resolved.target_path.display()
        )
        .green()
    );

    let outcome = renderer::render_file(
        &engine,
        &resolved.source_path,
        &resolved.target_path,
        &resolved.namespace,
        resolved.permissions,
    )
    .with_context(|| format!("Could not create '{}'", resolved.target_path.display()))?;
    if outcome == RenderOutcome::Copied {
        log::info!(
            "'{}' is not a template; copied it unchanged.",
            resolved.source_path.display()
        );
    }
    Ok(())
}
