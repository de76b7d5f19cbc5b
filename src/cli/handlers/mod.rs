// src/cli/handlers/mod.rs

/// Helpers shared by handlers.
pub mod commons;
/// `config`
pub mod config;
/// `create`
pub mod create;
/// `list`
pub mod list;
/// `search`
pub mod search;
