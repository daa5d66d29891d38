//! Path-addressed configuration tree
//!
//! Every configuration layer is read into a [`ConfigTree`]: a nested map whose
//! leaves are strings, booleans and integers. Values are addressed with
//! dot-separated paths such as `platform.config.project`. Paths are
//! case-sensitive, and a missing path is distinct from a present empty string.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single value stored in a [`ConfigTree`].
///
/// Nulls, lists and floats are carried through unchanged when a file contains
/// them, so loading and saving a user's config never drops unrelated settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<ConfigValue>),
    Tree(ConfigTree),
}

impl ConfigValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_tree(&self) -> Option<&ConfigTree> {
        match self {
            Self::Tree(t) => Some(t),
            _ => None,
        }
    }

    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Tree(_) => "tree",
        }
    }

    /// Interpret a raw command-line argument.
    ///
    /// JSON literals (`true`, `42`, `{"a": 1}`) keep their type; anything that
    /// is not valid JSON is stored as a plain string.
    pub fn parse_literal(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_else(|_| Self::String(raw.to_string()))
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::String(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(i) => write!(f, "{}", i),
            Self::Float(x) => write!(f, "{}", x),
            other => match serde_json::to_string(other) {
                Ok(json) => f.write_str(&json),
                Err(_) => Err(fmt::Error),
            },
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<ConfigTree> for ConfigValue {
    fn from(value: ConfigTree) -> Self {
        Self::Tree(value)
    }
}

/// Nested key/value store addressed by dot-separated paths.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigTree {
    entries: BTreeMap<String, ConfigValue>,
}

impl ConfigTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the value at `path`.
    ///
    /// Returns `None` when any segment is missing, when an intermediate
    /// segment is not a tree, or when the path itself is malformed.
    pub fn get(&self, path: &str) -> Option<&ConfigValue> {
        let segments = split_path(path).ok()?;
        let (leaf, parents) = segments.split_last()?;

        let mut node = self;
        for segment in parents {
            node = node.entries.get(*segment)?.as_tree()?;
        }
        node.entries.get(*leaf)
    }

    /// Look up the nested tree at `path`.
    pub fn get_tree(&self, path: &str) -> Option<&ConfigTree> {
        self.get(path).and_then(ConfigValue::as_tree)
    }

    /// Look up a string leaf at `path`.
    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(ConfigValue::as_str)
    }

    /// Store `value` at `path`, creating intermediate trees as needed.
    ///
    /// Any existing value at `path` is overwritten. Fails if an intermediate
    /// segment already holds a non-tree value.
    pub fn set(&mut self, path: &str, value: impl Into<ConfigValue>) -> Result<()> {
        let segments = split_path(path)?;
        let Some((leaf, parents)) = segments.split_last() else {
            return Err(Error::InvalidPath {
                path: path.to_string(),
            });
        };

        let mut node = self;
        for (depth, segment) in parents.iter().enumerate() {
            let entry = node
                .entries
                .entry((*segment).to_string())
                .or_insert_with(|| ConfigValue::Tree(ConfigTree::new()));
            node = match entry {
                ConfigValue::Tree(tree) => tree,
                _ => {
                    return Err(Error::NotATree {
                        path: path.to_string(),
                        parent: parents[..=depth].join("."),
                    });
                }
            };
        }

        node.entries.insert((*leaf).to_string(), value.into());
        Ok(())
    }

    /// Remove the value at `path`, returning it if it existed.
    pub fn unset(&mut self, path: &str) -> Option<ConfigValue> {
        let segments = split_path(path).ok()?;
        let (leaf, parents) = segments.split_last()?;

        let mut node = self;
        for segment in parents {
            node = match node.entries.get_mut(*segment)? {
                ConfigValue::Tree(tree) => tree,
                _ => return None,
            };
        }
        node.entries.remove(*leaf)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate over the top-level entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

fn split_path(path: &str) -> Result<Vec<&str>> {
    let segments: Vec<&str> = path.split('.').collect();
    if path.is_empty() || segments.iter().any(|s| s.is_empty()) {
        return Err(Error::InvalidPath {
            path: path.to_string(),
        });
    }
    Ok(segments)
}
