// src/core/meta.rs

use serde_yaml::Mapping;
use std::collections::BTreeMap;

use crate::core::{config_loader::scalar_to_string, search_tree::SearchTree};

/// Key whose value extends the inherited `arguments` instead of replacing them.
pub const ADD_ARGUMENTS_KEY: &str = "add_arguments";
/// Options passed to the search executable.
pub const ARGUMENTS_KEY: &str = "arguments";
/// Search tool to run instead of the default.
pub const EXECUTABLE_KEY: &str = "executable";
/// Template applied to the search term, which it sees as `search_term`.
pub const SEARCH_TEMPLATE_KEY: &str = "search_template";

/// Per-level settings controlling how a leaf's search command is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Meta {
    values: BTreeMap<String, String>,
}

impl Meta {
    /// Reads the scalar entries of a `meta` mapping.
    pub fn from_mapping(mapping: &Mapping) -> Self {
        let values = mapping
            .iter()
            .filter_map(|(k, v)| Some((scalar_to_string(k)?, scalar_to_string(v)?)))
            .collect();
        Self { values }
    }

    /// The merged value of `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// The configured search tool.
    pub fn executable(&self) -> Option<&str> {
        self.get(EXECUTABLE_KEY)
    }

    /// The accumulated search tool options.
    pub fn arguments(&self) -> Option<&str> {
        self.get(ARGUMENTS_KEY)
    }

    /// The template wrapped around the search term.
    pub fn search_template(&self) -> Option<&str> {
        self.get(SEARCH_TEMPLATE_KEY)
    }

    /// Folds a deeper level into this one.
    ///
    /// `add_arguments` is appended to the running `arguments`; every other key
    /// overwrites. A level that sets `arguments` itself still replaces them.
    pub fn merge(&mut self, level: &Self) {
        let mut level = level.values.clone();

        if let Some(extra) = level.remove(ADD_ARGUMENTS_KEY) {
            let combined = match self.values.remove(ARGUMENTS_KEY) {
                Some(current) => format!("{} {}", current, extra),
                None => extra,
            };
            self.values.insert(ARGUMENTS_KEY.to_string(), combined);
        }

        self.values.extend(level);
    }
}

/// Accumulates every `meta` from the root down to the node at `path`.
pub fn merged_meta_for<S: AsRef<str>>(path: &[S], tree: &SearchTree) -> Meta {
    let mut merged = Meta::default();
    let mut node = tree.root();

    if let Some(meta) = node.meta() {
        merged.merge(meta);
    }
    for key in path {
        let Some(child) = node.child(key.as_ref()) else {
            break;
        };
        if let Some(meta) = child.meta() {
            merged.merge(meta);
        }
        node = child;
    }

    merged
}
