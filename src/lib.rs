//! # mycli
//!
//! A personal scaffolding tool driven by a declarative configuration tree.
//!
//! - **Templates**: `create` resolves a registered template by unique prefix,
//!   composes a substitution namespace and renders (or copies) the source file
//!   into the target directory.
//! - **Search**: `search` walks an arbitrarily nested tree of path groups and
//!   builds one search-tool command per group.

/// Command-line parsing, dispatch and handlers.
pub mod cli;
/// Names and defaults shared across the crate.
pub mod constants;
/// Template resolution and search-command building.
pub mod core;
/// Serde models of the configuration file.
pub mod models;
/// State handed to every command handler.
pub mod state;
/// Running commands on the host.
pub mod system;
