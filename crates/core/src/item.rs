//! Item definitions - identity, stacking limits, and category flags

use std::sync::Arc;

use bitflags::bitflags;

use crate::key::ItemKey;
use crate::CatalogError;

/// Stack limit used when a definition does not specify one.
pub const DEFAULT_MAX_STACK_SIZE: u32 = 64;

/// Shared, read-only handle to a catalog entry.
pub type ItemHandle = Arc<ItemDefinition>;

bitflags! {
    /// Category flags carried by an item definition.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ItemFlags: u8 {
        /// Item is used up when used.
        const CONSUMABLE = 0b0000_0001;
        /// Item can be equipped.
        const EQUIPPABLE = 0b0000_0010;
        /// Item belongs to a quest.
        const QUEST = 0b0000_0100;
    }
}

/// Immutable description of an item type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDefinition {
    key: ItemKey,
    name: String,
    description: String,
    max_stack_size: u32,
    flags: ItemFlags,
}

impl ItemDefinition {
    /// Create a definition. `max_stack_size` must be at least 1.
    pub fn new(
        key: ItemKey,
        name: impl Into<String>,
        max_stack_size: u32,
    ) -> Result<Self, CatalogError> {
        if max_stack_size == 0 {
            return Err(CatalogError::InvalidStackSize { key });
        }
        Ok(Self {
            key,
            name: name.into(),
            description: String::new(),
            max_stack_size,
            flags: ItemFlags::empty(),
        })
    }

    /// Attach a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Replace the category flags.
    pub fn with_flags(mut self, flags: ItemFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Stable identity of this item.
    pub fn key(&self) -> &ItemKey {
        &self.key
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free-form description (may be empty).
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Maximum number of units one slot can hold (always >= 1).
    pub fn max_stack_size(&self) -> u32 {
        self.max_stack_size
    }

    /// Category flags.
    pub fn flags(&self) -> ItemFlags {
        self.flags
    }

    /// Whether the item is consumed on use.
    pub fn is_consumable(&self) -> bool {
        self.flags.contains(ItemFlags::CONSUMABLE)
    }

    /// Whether the item can be equipped.
    pub fn is_equippable(&self) -> bool {
        self.flags.contains(ItemFlags::EQUIPPABLE)
    }

    /// Whether the item is a quest item.
    pub fn is_quest_item(&self) -> bool {
        self.flags.contains(ItemFlags::QUEST)
    }

    /// Whether `other` denotes the same item type.
    pub fn same_item(&self, other: &ItemDefinition) -> bool {
        std::ptr::eq(self, other) || self.key == other.key
    }
}
