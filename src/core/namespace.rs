// src/core/namespace.rs

use chrono::NaiveDate;
use serde_json::{Map, Value as JsonValue};
use serde_yaml::{Mapping, Value as YamlValue};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::core::config_loader::scalar_to_string;

/// A value available for substitution while rendering a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamespaceValue {
    Text(String),
    Date(NaiveDate),
    Path(PathBuf),
    List(Vec<String>),
}

impl NamespaceValue {
    /// Converts a configuration value. Nested mappings and nulls have no namespace form.
    pub fn from_yaml(value: &YamlValue) -> Option<Self> {
        match value {
            YamlValue::Sequence(items) => Some(Self::List(
                items.iter().filter_map(scalar_to_string).collect(),
            )),
            other => scalar_to_string(other).map(Self::Text),
        }
    }

    fn to_json(&self) -> JsonValue {
        match self {
            Self::Text(s) => JsonValue::String(s.clone()),
            Self::Date(d) => JsonValue::String(d.format("%Y-%m-%d").to_string()),
            Self::Path(p) => JsonValue::String(p.display().to_string()),
            Self::List(items) => {
                JsonValue::Array(items.iter().cloned().map(JsonValue::String).collect())
            }
        }
    }
}

impl std::fmt::Display for NamespaceValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s}"),
            Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Self::Path(p) => write!(f, "{}", p.display()),
            Self::List(items) => write!(f, "{}", items.join(", ")),
        }
    }
}

impl From<&str> for NamespaceValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for NamespaceValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<PathBuf> for NamespaceValue {
    fn from(value: PathBuf) -> Self {
        Self::Path(value)
    }
}

impl From<NaiveDate> for NamespaceValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

/// The flat set of named values a template is rendered against. Later inserts win.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Namespace {
    values: BTreeMap<String, NamespaceValue>,
}

impl Namespace {
    /// An empty namespace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key`, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<NamespaceValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Drops `key`, returning its value if it was set.
    pub fn remove(&mut self, key: &str) -> Option<NamespaceValue> {
        self.values.remove(key)
    }

    /// The value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&NamespaceValue> {
        self.values.get(key)
    }

    /// Shorthand for the display form of a value.
    pub fn get_str(&self, key: &str) -> Option<String> {
        self.get(key).map(ToString::to_string)
    }

    /// Merges every convertible entry of a configuration mapping over the current values.
    pub fn merge_mapping(&mut self, mapping: &Mapping) {
        for (key, value) in mapping {
            let Some(key) = scalar_to_string(key) else {
                continue;
            };
            match NamespaceValue::from_yaml(value) {
                Some(value) => self.insert(key, value),
                None => log::debug!("Skipping namespace key '{}': unsupported value.", key),
            }
        }
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &NamespaceValue)> {
        self.values.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no entry is set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The template engine's view of this namespace.
    pub fn to_json(&self) -> JsonValue {
        let map: Map<String, JsonValue> = self
            .values
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect();
        JsonValue::Object(map)
    }
}
