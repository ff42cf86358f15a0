#![warn(missing_docs)]
//! Item catalog primitives shared across the workspace.

pub mod catalog;
pub mod item;
pub mod key;
mod loader;

use serde::Deserialize;
use thiserror::Error;

pub use catalog::ItemCatalog;
pub use item::{ItemDefinition, ItemFlags, ItemHandle, DEFAULT_MAX_STACK_SIZE};
pub use key::{ItemKey, ItemKeyError, DEFAULT_NAMESPACE};
pub use loader::{catalog_from_file, catalog_from_str};

/// One item entry as written in a JSON catalog file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemEntry {
    /// Item key (`namespace:path` or bare `path`).
    pub key: String,
    /// Display name; defaults to the key path.
    #[serde(default)]
    pub name: Option<String>,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Maximum units per slot.
    #[serde(default = "default_max_stack_size")]
    pub max_stack_size: u32,
    /// Consumed on use.
    #[serde(default)]
    pub consumable: bool,
    /// Can be equipped.
    #[serde(default)]
    pub equippable: bool,
    /// Quest item.
    #[serde(default)]
    pub quest: bool,
}

fn default_max_stack_size() -> u32 {
    DEFAULT_MAX_STACK_SIZE
}

/// Errors emitted while building or loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Wrap IO errors when reading catalog files.
    #[error("failed to read item catalog: {0}")]
    Io(#[from] std::io::Error),
    /// Wrap serde parsing issues.
    #[error("failed to parse item catalog: {0}")]
    Parse(#[from] serde_json::Error),
    /// An entry carried a malformed key.
    #[error(transparent)]
    InvalidKey(#[from] ItemKeyError),
    /// An entry declared a stack size of zero.
    #[error("item {key} must have a max stack size of at least 1")]
    InvalidStackSize {
        /// Offending item.
        key: ItemKey,
    },
    /// Two entries share a key.
    #[error("item {key} is already registered")]
    DuplicateKey {
        /// Offending item.
        key: ItemKey,
    },
    /// A lookup named an item the catalog does not contain.
    #[error("unknown item {key}")]
    UnknownItem {
        /// Requested item.
        key: ItemKey,
    },
}
