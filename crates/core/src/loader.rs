use std::{fs, path::Path};

use crate::{CatalogError, ItemCatalog, ItemDefinition, ItemEntry, ItemFlags, ItemKey};

/// Load an item catalog from a JSON file on disk.
pub fn catalog_from_file(path: &Path) -> Result<ItemCatalog, CatalogError> {
    let data = fs::read_to_string(path)?;
    catalog_from_str(&data)
}

/// Load an item catalog from an in-memory JSON array of entries.
pub fn catalog_from_str(input: &str) -> Result<ItemCatalog, CatalogError> {
    let entries: Vec<ItemEntry> = serde_json::from_str(input)?;
    let mut catalog = ItemCatalog::new();
    for entry in entries {
        catalog.register(definition_from_entry(entry)?)?;
    }
    Ok(catalog)
}

fn definition_from_entry(entry: ItemEntry) -> Result<ItemDefinition, CatalogError> {
    let key = ItemKey::parse(&entry.key)?;
    let name = entry.name.unwrap_or_else(|| key.path().to_string());

    let mut flags = ItemFlags::empty();
    flags.set(ItemFlags::CONSUMABLE, entry.consumable);
    flags.set(ItemFlags::EQUIPPABLE, entry.equippable);
    flags.set(ItemFlags::QUEST, entry.quest);

    Ok(ItemDefinition::new(key, name, entry.max_stack_size)?
        .with_description(entry.description)
        .with_flags(flags))
}
