//! # Config Loader
//!
//! Loads the user's configuration tree once and exposes typed views over the
//! regions the rest of the application reads: `globals`, the template registry
//! under `commands.templates.create`, and the raw search tree under
//! `commands.search`.
//!
//! The resulting [`Config`] is immutable. It is built in `main` and handed to
//! every handler by reference; nothing else loads or mutates configuration.
use crate::{
    constants::{APP_CONFIG_DIR, CONFIG_ENV_VAR, CONFIG_FILENAME},
    models::{GlobalsConfig, TemplateSpec},
};
use serde_yaml::{Mapping, Value};
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Failures while locating, reading or interpreting the configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not find system config directory.")]
    ConfigDirNotFound,
    #[error("Could not read configuration file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse YAML file at '{path}': {source}")]
    YamlParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("Failed to parse TOML file at '{path}': {source}")]
    TomlParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Invalid entry '{name}' in '{region}': {source}")]
    InvalidEntry {
        region: &'static str,
        name: String,
        #[source]
        source: serde_yaml::Error,
    },
}

type ConfigResult<T> = Result<T, ConfigError>;

/// The parsed configuration tree plus the path it was read from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    source: Option<PathBuf>,
    data: Value,
}

impl Config {
    /// Loads the configuration from `path`. A missing file yields an empty configuration.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.is_file() {
            log::debug!("No configuration file at '{}'. Using an empty one.", path.display());
            return Ok(Self {
                source: Some(path.to_path_buf()),
                data: Value::Mapping(Mapping::new()),
            });
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        let data = if is_toml {
            let table: toml::Table =
                toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
                    path: path.to_path_buf(),
                    source,
                })?;
            serde_yaml::to_value(table).map_err(|source| ConfigError::YamlParse {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            parse_yaml(&content).map_err(|source| ConfigError::YamlParse {
                path: path.to_path_buf(),
                source,
            })?
        };

        log::debug!("Loaded configuration from '{}'.", path.display());
        Ok(Self {
            source: Some(path.to_path_buf()),
            data,
        })
    }

    /// Builds a configuration from a YAML document held in memory.
    pub fn from_yaml_str(content: &str) -> Result<Self, serde_yaml::Error> {
        Ok(Self {
            source: None,
            data: parse_yaml(content)?,
        })
    }

    /// The file this configuration was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// The raw configuration tree.
    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Walks down the tree by mapping keys.
    pub fn dig(&self, keys: &[&str]) -> Option<&Value> {
        keys.iter().try_fold(&self.data, |node, key| node.get(*key))
    }

    /// The `globals` region. Absent or null yields the defaults.
    pub fn globals(&self) -> ConfigResult<GlobalsConfig> {
        match self.dig(&["globals"]) {
            Some(value) if !value.is_null() => serde_yaml::from_value(value.clone()).map_err(
                |source| ConfigError::InvalidEntry {
                    region: "globals",
                    name: "globals".to_string(),
                    source,
                },
            ),
            _ => Ok(GlobalsConfig::default()),
        }
    }

    /// The template registry, in declaration order.
    pub fn templates(&self) -> ConfigResult<Vec<(String, TemplateSpec)>> {
        let Some(Value::Mapping(registry)) = self.dig(&["commands", "templates", "create"]) else {
            return Ok(Vec::new());
        };

        registry
            .iter()
            .map(|(name, spec)| {
                let name = scalar_to_string(name).unwrap_or_default();
                let spec = serde_yaml::from_value(spec.clone()).map_err(|source| {
                    ConfigError::InvalidEntry {
                        region: "commands.templates.create",
                        name: name.clone(),
                        source,
                    }
                })?;
                Ok((name, spec))
            })
            .collect()
    }

    /// The raw search tree, wrapped under its root key so every leaf path starts with it.
    pub fn search_tree(&self) -> Value {
        let mut root = Mapping::new();
        let tree = self
            .dig(&["commands", "search"])
            .cloned()
            .unwrap_or(Value::Mapping(Mapping::new()));
        root.insert(Value::String(crate::constants::SEARCH_ROOT_KEY.to_string()), tree);
        Value::Mapping(root)
    }
}

/// Parses YAML, treating an empty document as an empty mapping.
fn parse_yaml(content: &str) -> Result<Value, serde_yaml::Error> {
    let value: Value = serde_yaml::from_str(content)?;
    Ok(if value.is_null() {
        Value::Mapping(Mapping::new())
    } else {
        value
    })
}

/// Determines which configuration file to use.
///
/// Priority: explicit path > `MYCLI_CONFIG` > `<config dir>/mycli/config.yaml`.
pub fn resolve_config_path(explicit: Option<&Path>) -> ConfigResult<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    if let Some(path) = env::var(CONFIG_ENV_VAR).ok().filter(|p| !p.trim().is_empty()) {
        return Ok(PathBuf::from(path));
    }
    dirs::config_dir()
        .map(|dir| dir.join(APP_CONFIG_DIR).join(CONFIG_FILENAME))
        .ok_or(ConfigError::ConfigDirNotFound)
}

/// Renders a scalar YAML value as text. Returns `None` for null, sequences and mappings.
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}
