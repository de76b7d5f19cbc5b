// src/core/command_builder.rs

use serde_json::json;
use std::collections::HashSet;

use crate::{
    constants::DEFAULT_SEARCH_EXECUTABLE,
    core::{
        meta::merged_meta_for,
        search_tree::{SearchError, SearchTree},
        template_engine::TemplateEngine,
    },
};

/// Caller-supplied options for a search.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// Free-form options for the search tool. Replaces any configured `arguments`.
    pub options: Option<String>,
    /// Only leaves with this key somewhere on their path are searched.
    pub group: Option<String>,
}

/// Builds one shell command per matching leaf, deduplicated in first-seen order.
///
/// Commands have the shape `<executable> <options> "<term>" <paths...>`.
/// Nothing is executed here.
pub fn build_commands(
    needle: &str,
    options: &SearchOptions,
    tree: &SearchTree,
    engine: &TemplateEngine,
) -> Result<Vec<String>, SearchError> {
    log::debug!("Search options: {:?}", options);
    let mut seen = HashSet::new();
    let mut commands = Vec::new();

    for leaf in tree.leaves() {
        if options.group.as_deref().is_some_and(|g| !leaf.in_group(g)) {
            continue;
        }

        let meta = merged_meta_for(leaf.path.as_slice(), tree);
        let executable = meta.executable().unwrap_or(DEFAULT_SEARCH_EXECUTABLE);
        let search_options = options
            .options
            .as_deref()
            .or(meta.arguments())
            .unwrap_or_default();
        let search_term = match meta.search_template() {
            Some(template) => engine
                .render(template, &json!({ "search_term": needle }))
                .map_err(|reason| SearchError::SearchTemplate {
                    template: template.to_string(),
                    reason,
                })?,
            None => needle.to_string(),
        };

        let command = format!(
            "{} {} \"{}\" {}",
            executable,
            search_options,
            search_term,
            leaf.paths.join(" ")
        );
        log::debug!(
            "path: {:?} | paths: {:?} | meta: {:?} | cmd: {}",
            leaf.path,
            leaf.paths,
            meta,
            command
        );

        if seen.insert(command.clone()) {
            commands.push(command);
        }
    }

    Ok(commands)
}
