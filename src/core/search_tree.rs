//! # Search Tree
//!
//! A statically shaped view of the `commands.search` configuration. Users nest
//! path groups as deep as they like; every list of strings is a leaf and every
//! mapping is an internal node that may carry a `meta` mapping for its level.
//!
//! Shape errors are caught once, when the raw configuration is adapted, so a
//! malformed tree produces no leaves at all instead of a partial walk.
use serde_yaml::{Mapping, Value};
use thiserror::Error;

use crate::{
    constants::META_KEY,
    core::{config_loader::scalar_to_string, meta::Meta},
};

/// Failures while adapting the search tree or building its commands.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SearchError {
    #[error(
        "Only paths (strings) are allowed in arrays for search config! Offending entry: '{}'",
        .path.join(".")
    )]
    MalformedConfig { path: Vec<String> },
    #[error("Failed to apply search template '{template}': {reason}")]
    SearchTemplate { template: String, reason: String },
}

/// A node of the search tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchNode {
    /// A group of filesystem paths.
    Leaf(Vec<String>),
    /// A mapping level, with its optional `meta` and its children in declaration order.
    Internal {
        meta: Option<Meta>,
        children: Vec<(String, SearchNode)>,
    },
}

impl SearchNode {
    /// Adapts a raw configuration value. `path` locates `value` for error reporting.
    fn from_value(value: &Value, path: &mut Vec<String>) -> Result<Option<Self>, SearchError> {
        match value {
            Value::Sequence(items) => {
                let strings: Option<Vec<String>> =
                    items.iter().map(|v| v.as_str().map(str::to_string)).collect();
                match strings {
                    Some(paths) => Ok(Some(Self::Leaf(paths))),
                    None => Err(SearchError::MalformedConfig { path: path.clone() }),
                }
            }
            Value::Mapping(mapping) => Self::from_mapping(mapping, path).map(Some),
            Value::Tagged(tagged) => Self::from_value(&tagged.value, path),
            // Scalars are neither groups nor paths.
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => Ok(None),
        }
    }

    fn from_mapping(mapping: &Mapping, path: &mut Vec<String>) -> Result<Self, SearchError> {
        let mut meta = None;
        let mut children = Vec::with_capacity(mapping.len());

        for (key, value) in mapping {
            let Some(key) = scalar_to_string(key) else {
                continue;
            };
            if key == META_KEY && value.is_mapping() {
                meta = value.as_mapping().map(Meta::from_mapping);
                continue;
            }

            path.push(key.clone());
            let child = Self::from_value(value, path)?;
            path.pop();

            if let Some(child) = child {
                children.push((key, child));
            }
        }

        Ok(Self::Internal { meta, children })
    }

    /// This level's `meta`, if it is an internal node that has one.
    pub fn meta(&self) -> Option<&Meta> {
        match self {
            Self::Internal { meta, .. } => meta.as_ref(),
            Self::Leaf(_) => None,
        }
    }

    /// The child stored under `key`.
    pub fn child(&self, key: &str) -> Option<&Self> {
        match self {
            Self::Internal { children, .. } => children
                .iter()
                .find_map(|(k, node)| (k == key).then_some(node)),
            Self::Leaf(_) => None,
        }
    }
}

/// The whole search configuration, rooted at an internal node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTree {
    root: SearchNode,
}

impl SearchTree {
    /// Adapts the raw configuration. Any list that is not entirely strings aborts the adaptation.
    pub fn from_value(value: &Value) -> Result<Self, SearchError> {
        let mut path = Vec::new();
        let root = match SearchNode::from_value(value, &mut path)? {
            Some(node @ SearchNode::Internal { .. }) => node,
            // A bare list at the root has no key to name it by.
            Some(SearchNode::Leaf(_)) => {
                return Err(SearchError::MalformedConfig { path: Vec::new() });
            }
            None => SearchNode::Internal {
                meta: None,
                children: Vec::new(),
            },
        };
        Ok(Self { root })
    }

    /// The root node. Always internal.
    pub fn root(&self) -> &SearchNode {
        &self.root
    }

    /// The node reached by following `path` from the root.
    pub fn node_at<S: AsRef<str>>(&self, path: &[S]) -> Option<&SearchNode> {
        path.iter()
            .try_fold(&self.root, |node, key| node.child(key.as_ref()))
    }

    /// Iterates every leaf, depth first, in declaration order.
    pub fn leaves(&self) -> Leaves<'_> {
        let mut stack = Vec::new();
        push_children(&mut stack, &[], &self.root);
        Leaves { stack }
    }
}

/// A discovered leaf: its key path from the root and its paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf<'a> {
    /// Keys from the root down to this leaf.
    pub path: Vec<&'a str>,
    /// The filesystem paths of the group.
    pub paths: &'a [String],
}

impl Leaf<'_> {
    /// Whether `group` is one of the keys on this leaf's path.
    pub fn in_group(&self, group: &str) -> bool {
        self.path.iter().any(|key| *key == group)
    }
}

/// Stack-based walk over a [`SearchTree`].
#[derive(Debug)]
pub struct Leaves<'a> {
    stack: Vec<(Vec<&'a str>, &'a SearchNode)>,
}

fn push_children<'a>(
    stack: &mut Vec<(Vec<&'a str>, &'a SearchNode)>,
    prefix: &[&'a str],
    node: &'a SearchNode,
) {
    if let SearchNode::Internal { children, .. } = node {
        // Reversed so the first declared child is popped first.
        for (key, child) in children.iter().rev() {
            let mut path = prefix.to_vec();
            path.push(key.as_str());
            stack.push((path, child));
        }
    }
}

impl<'a> Iterator for Leaves<'a> {
    type Item = Leaf<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((path, node)) = self.stack.pop() {
            match node {
                SearchNode::Leaf(paths) => return Some(Leaf { path, paths }),
                SearchNode::Internal { .. } => push_children(&mut self.stack, &path, node),
            }
        }
        None
    }
}
