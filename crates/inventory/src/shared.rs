//! Thread-safe handle to an inventory.
//!
//! None of the store's operations are atomic across their scan and mutate
//! phases on their own, so every call here holds one lock for its whole
//! duration, observer dispatch included.

use std::sync::{Arc, Mutex};

use slotvault_core::{ItemDefinition, ItemHandle};

use crate::observer::{InventoryObserver, ObserverId};
use crate::{AddOutcome, Inventory, InventoryError, InventorySnapshot, RemoveOutcome};

/// Cloneable, lock-guarded inventory for multi-threaded hosts.
#[derive(Debug, Clone)]
pub struct SharedInventory {
    inner: Arc<Mutex<Inventory>>,
}

impl SharedInventory {
    /// Wrap an inventory.
    pub fn new(inventory: Inventory) -> Self {
        Self {
            inner: Arc::new(Mutex::new(inventory)),
        }
    }

    /// Run `f` with exclusive access to the inventory.
    pub fn with<R>(&self, f: impl FnOnce(&mut Inventory) -> R) -> Result<R, InventoryError> {
        let mut guard = self.inner.lock().map_err(|_| InventoryError::Poisoned)?;
        Ok(f(&mut guard))
    }

    /// See [`Inventory::add_item`].
    pub fn add_item(&self, item: &ItemHandle, amount: u32) -> Result<AddOutcome, InventoryError> {
        self.with(|inv| inv.add_item(item, amount))
    }

    /// See [`Inventory::remove_item`].
    pub fn remove_item(
        &self,
        item: &ItemDefinition,
        amount: u32,
    ) -> Result<RemoveOutcome, InventoryError> {
        self.with(|inv| inv.remove_item(item, amount))
    }

    /// See [`Inventory::remaining_space`].
    pub fn remaining_space(&self, item: &ItemDefinition) -> Result<u64, InventoryError> {
        self.with(|inv| inv.remaining_space(item))
    }

    /// See [`Inventory::can_add`].
    pub fn can_add(&self, item: &ItemDefinition, amount: u32) -> Result<bool, InventoryError> {
        self.with(|inv| inv.can_add(item, amount))
    }

    /// See [`Inventory::has_item`].
    pub fn has_item(&self, item: &ItemDefinition, amount: u32) -> Result<bool, InventoryError> {
        self.with(|inv| inv.has_item(item, amount))
    }

    /// See [`Inventory::count_item`].
    pub fn count_item(&self, item: &ItemDefinition) -> Result<u64, InventoryError> {
        self.with(|inv| inv.count_item(item))
    }

    /// See [`Inventory::snapshot`].
    pub fn snapshot(&self) -> Result<InventorySnapshot, InventoryError> {
        self.with(|inv| inv.snapshot())
    }

    /// See [`Inventory::subscribe`].
    pub fn subscribe<O>(&self, observer: O) -> Result<ObserverId, InventoryError>
    where
        O: InventoryObserver + 'static,
    {
        self.with(|inv| inv.subscribe(observer))
    }

    /// See [`Inventory::unsubscribe`].
    pub fn unsubscribe(&self, id: ObserverId) -> Result<bool, InventoryError> {
        self.with(|inv| inv.unsubscribe(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    use slotvault_core::ItemCatalog;

    #[test]
    fn concurrent_adds_never_overfill() {
        let catalog = ItemCatalog::builtin();
        let stone = catalog.lookup("stone").unwrap().clone();
        let shared = SharedInventory::new(Inventory::new(4).unwrap());

        let workers: Vec<_> = (0..8)
            .map(|_| {
                let shared = shared.clone();
                let stone = stone.clone();
                thread::spawn(move || {
                    let mut placed = 0u64;
                    for _ in 0..50 {
                        placed += u64::from(shared.add_item(&stone, 1).unwrap().placed);
                    }
                    placed
                })
            })
            .collect();
        let placed: u64 = workers.into_iter().map(|w| w.join().unwrap()).sum();

        assert_eq!(placed, 4 * 64);
        assert_eq!(shared.count_item(&stone).unwrap(), 4 * 64);
        assert_eq!(shared.remaining_space(&stone).unwrap(), 0);
    }

    #[test]
    fn poisoned_lock_is_reported() {
        let shared = SharedInventory::new(Inventory::default());
        let clone = shared.clone();
        let _ = thread::spawn(move || {
            clone
                .with(|_| panic!("observer blew up"))
                .expect("lock was healthy")
        })
        .join();

        let catalog = ItemCatalog::builtin();
        let dirt = catalog.lookup("dirt").unwrap();
        assert_eq!(shared.has_item(dirt, 1), Err(InventoryError::Poisoned));
    }
}
