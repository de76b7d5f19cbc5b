// src/state.rs

use std::path::{Path, PathBuf};

use crate::core::config_loader::Config;

/// What every command handler gets: the loaded configuration and where it came from.
///
/// Built once at startup and only ever borrowed immutably afterwards.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    config_path: PathBuf,
    config: Config,
}

impl AppState {
    /// Wraps a loaded configuration and the path it was resolved from.
    pub fn new(config_path: PathBuf, config: Config) -> Self {
        Self {
            config_path,
            config,
        }
    }

    /// The loaded configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The configuration path in use, whether or not the file exists.
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }
}
