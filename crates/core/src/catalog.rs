//! Item catalog: the owner of every item definition.
//!
//! Inventories never own definitions; they hold [`ItemHandle`]s handed out by
//! the catalog and compare them by key.

use std::collections::HashMap;
use std::sync::Arc;

use crate::{CatalogError, ItemDefinition, ItemFlags, ItemHandle, ItemKey};

/// Registry of item definitions in registration order.
#[derive(Debug, Default, Clone)]
pub struct ItemCatalog {
    items: Vec<ItemHandle>,
    by_key: HashMap<ItemKey, usize>,
}

impl ItemCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Small catalog used when no catalog file is configured.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        let entries: [(&str, &str, u32, ItemFlags); 6] = [
            ("stone", "Stone", 64, ItemFlags::empty()),
            ("dirt", "Dirt", 64, ItemFlags::empty()),
            ("torch", "Torch", 64, ItemFlags::empty()),
            ("apple", "Apple", 16, ItemFlags::CONSUMABLE),
            ("iron_sword", "Iron Sword", 1, ItemFlags::EQUIPPABLE),
            ("ancient_map", "Ancient Map", 1, ItemFlags::QUEST),
        ];
        for (path, name, max_stack, flags) in entries {
            let key = ItemKey::parse(path).expect("builtin keys are valid");
            let def = ItemDefinition::new(key, name, max_stack)
                .expect("builtin stack sizes are positive")
                .with_flags(flags);
            catalog.register(def).expect("builtin keys are unique");
        }
        catalog
    }

    /// Register a definition, returning its shared handle.
    pub fn register(&mut self, definition: ItemDefinition) -> Result<ItemHandle, CatalogError> {
        if self.by_key.contains_key(definition.key()) {
            return Err(CatalogError::DuplicateKey {
                key: definition.key().clone(),
            });
        }
        let handle = Arc::new(definition);
        self.by_key.insert(handle.key().clone(), self.items.len());
        self.items.push(Arc::clone(&handle));
        Ok(handle)
    }

    /// Look up a definition by key.
    pub fn get(&self, key: &ItemKey) -> Option<&ItemHandle> {
        self.by_key.get(key).map(|&index| &self.items[index])
    }

    /// Look up a definition by its textual key. Malformed keys find nothing.
    pub fn lookup(&self, key: &str) -> Option<&ItemHandle> {
        ItemKey::parse(key).ok().and_then(|key| self.get(&key))
    }

    /// Resolve a textual key, reporting why it failed.
    pub fn resolve(&self, key: &str) -> Result<ItemHandle, CatalogError> {
        let key = ItemKey::parse(key)?;
        self.get(&key)
            .cloned()
            .ok_or(CatalogError::UnknownItem { key })
    }

    /// Iterate definitions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ItemHandle> {
        self.items.iter()
    }

    /// Number of registered definitions.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog has no definitions.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_and_lookup() {
        let mut catalog = ItemCatalog::new();
        let key = ItemKey::parse("stone").unwrap();
        let handle = catalog
            .register(ItemDefinition::new(key.clone(), "Stone", 64).unwrap())
            .unwrap();

        assert!(Arc::ptr_eq(catalog.get(&key).unwrap(), &handle));
        assert!(Arc::ptr_eq(catalog.lookup("kmv:stone").unwrap(), &handle));
        assert!(catalog.lookup("Not A Key").is_none());
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let mut catalog = ItemCatalog::new();
        let key = ItemKey::parse("stone").unwrap();
        catalog
            .register(ItemDefinition::new(key.clone(), "Stone", 64).unwrap())
            .unwrap();
        let err = catalog
            .register(ItemDefinition::new(key, "Other", 32).unwrap())
            .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateKey { .. }));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn resolve_reports_failures() {
        let catalog = ItemCatalog::builtin();
        assert_eq!(catalog.resolve("apple").unwrap().max_stack_size(), 16);
        assert!(matches!(
            catalog.resolve("kmv:diamond"),
            Err(CatalogError::UnknownItem { .. })
        ));
        assert!(matches!(
            catalog.resolve("???"),
            Err(CatalogError::InvalidKey(_))
        ));
    }

    #[test]
    fn builtin_iterates_in_registration_order() {
        let catalog = ItemCatalog::builtin();
        let keys: Vec<String> = catalog.iter().map(|item| item.key().to_string()).collect();
        assert_eq!(keys.first().map(String::as_str), Some("kmv:stone"));
        assert_eq!(keys.len(), catalog.len());
        assert!(catalog
            .lookup("iron_sword")
            .is_some_and(|sword| sword.is_equippable()));
    }
}
