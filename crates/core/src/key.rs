//! Namespaced item keys.
//!
//! An item key (e.g. `kmv:stone`) is the stable identity of an item definition.
//! Inventories compare items by key, and snapshots persist keys rather than
//! in-memory handles, so keys are validated once at the boundary and are
//! ordered for deterministic iteration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Namespace used when a key omits one.
pub const DEFAULT_NAMESPACE: &str = "kmv";

const MAX_NAMESPACE_LEN: usize = 64;
const MAX_PATH_LEN: usize = 128;

/// Error returned when parsing an invalid [`ItemKey`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemKeyError {
    input: String,
    reason: &'static str,
}

impl ItemKeyError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }

    /// The rejected input, trimmed.
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for ItemKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid item key {:?}: {}", self.input, self.reason)
    }
}

impl std::error::Error for ItemKeyError {}

/// A key of the form `namespace:path`.
///
/// Ordering is lexical by `(namespace, path)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemKey {
    namespace: String,
    path: String,
}

impl ItemKey {
    /// Parse `namespace:path`, or a bare `path` in [`DEFAULT_NAMESPACE`].
    pub fn parse(input: &str) -> Result<Self, ItemKeyError> {
        Self::parse_in(input, DEFAULT_NAMESPACE)
    }

    /// Parse using a caller-provided namespace for bare paths.
    pub fn parse_in(input: &str, default_namespace: &str) -> Result<Self, ItemKeyError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ItemKeyError::new(trimmed, "key cannot be empty"));
        }

        let (namespace, path) = trimmed
            .split_once(':')
            .unwrap_or((default_namespace, trimmed));
        let namespace = namespace.trim();
        let path = path.trim();

        if namespace.is_empty() {
            return Err(ItemKeyError::new(trimmed, "namespace cannot be empty"));
        }
        if namespace.len() > MAX_NAMESPACE_LEN {
            return Err(ItemKeyError::new(trimmed, "namespace too long (max 64)"));
        }
        if !namespace.chars().all(is_namespace_char) {
            return Err(ItemKeyError::new(
                trimmed,
                "namespace has invalid characters (allowed: a-z0-9_.-)",
            ));
        }

        if path.is_empty() {
            return Err(ItemKeyError::new(trimmed, "path cannot be empty"));
        }
        if path.len() > MAX_PATH_LEN {
            return Err(ItemKeyError::new(trimmed, "path too long (max 128)"));
        }
        if !path.chars().all(|c| is_namespace_char(c) || c == '/') {
            return Err(ItemKeyError::new(
                trimmed,
                "path has invalid characters (allowed: a-z0-9_./-)",
            ));
        }

        Ok(Self {
            namespace: namespace.to_string(),
            path: path.to_string(),
        })
    }

    /// Key namespace.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Key path.
    pub fn path(&self) -> &str {
        &self.path
    }
}

fn is_namespace_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '_' | '-' | '.')
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

impl FromStr for ItemKey {
    type Err = ItemKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ItemKey {
    type Error = ItemKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ItemKey> for String {
    fn from(key: ItemKey) -> Self {
        key.to_string()
    }
}
