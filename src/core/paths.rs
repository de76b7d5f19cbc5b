// src/core/paths.rs

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::path::{Path, PathBuf};
use thiserror::Error;

lazy_static! {
    // `$NAME`, `${NAME}` and `%NAME%`.
    static ref ENV_VAR_RE: Regex = Regex::new(
        r"\$([A-Za-z_][A-Za-z0-9_]*)|\$\{([A-Za-z_][A-Za-z0-9_]*)\}|%([A-Za-z_][A-Za-z0-9_]*)%"
    )
    .expect("environment variable pattern is valid");
}

/// Failures while expanding a configured path.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PathError {
    #[error("Environment variable '{name}' is not defined (referenced in '{input}').")]
    UndefinedVariable { name: String, input: String },
    #[error("Could not determine the current directory: {0}")]
    CurrentDir(String),
}

/// Looks up an environment variable by name.
pub type EnvLookup = dyn Fn(&str) -> Option<String>;

/// Reads from the process environment.
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Expands `$NAME`, `${NAME}` and `%NAME%` references. Any undefined variable is an error.
pub fn expand_env(input: &str, lookup: &EnvLookup) -> Result<String, PathError> {
    let mut missing: Option<String> = None;

    let expanded = ENV_VAR_RE.replace_all(input, |caps: &Captures<'_>| {
        let name = caps
            .get(1)
            .or_else(|| caps.get(2))
            .or_else(|| caps.get(3))
            .map(|m| m.as_str())
            .unwrap_or_default();
        match lookup(name) {
            Some(value) => value,
            None => {
                missing.get_or_insert_with(|| name.to_string());
                String::new()
            }
        }
    });

    match missing {
        Some(name) => Err(PathError::UndefinedVariable {
            name,
            input: input.to_string(),
        }),
        None => Ok(expanded.into_owned()),
    }
}

/// Expands environment variables and a leading `~`, then makes the result absolute.
pub fn expand_path(input: &str, lookup: &EnvLookup) -> Result<PathBuf, PathError> {
    let with_env = expand_env(input, lookup)?;
    let with_home = shellexpand::tilde(&with_env).into_owned();
    absolutize(Path::new(&with_home))
}

/// Joins relative paths onto the current directory without touching the filesystem.
fn absolutize(path: &Path) -> Result<PathBuf, PathError> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|e| PathError::CurrentDir(e.to_string()))?
            .join(path)
    };
    Ok(dunce::simplified(&absolute).to_path_buf())
}
