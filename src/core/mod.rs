// src/core/mod.rs

/// Search commands from the tree and caller options.
pub mod command_builder;
/// Locating and loading the configuration.
pub mod config_loader;
/// Remote keyed data sets.
pub mod fetch;
/// Per-level search settings and their merging.
pub mod meta;
/// Values available to templates.
pub mod namespace;
/// Template resolution and namespace composition.
pub mod namespace_builder;
/// Environment and home expansion of configured paths.
pub mod paths;
/// Interactive and non-interactive answers.
pub mod prompt;
/// Rendering or copying a template into place.
pub mod renderer;
/// The typed search tree and its leaf walk.
pub mod search_tree;
/// The handlebars wrapper.
pub mod template_engine;
