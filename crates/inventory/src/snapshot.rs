//! Serializable inventory contents.
//!
//! Snapshots persist item keys, not handles; loading one resolves every key
//! against a catalog and re-validates stack counts.

use serde::{Deserialize, Serialize};
use slotvault_core::{ItemCatalog, ItemKey};

use crate::observer::{ChangeKind, InventoryChange};
use crate::{Inventory, InventoryError, Slot};

/// One occupied slot in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSnapshot {
    /// Item key.
    pub item: ItemKey,
    /// Units held.
    pub count: u32,
}

/// Inventory contents in slot order; `None` marks an empty slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    /// Slots in index order.
    pub slots: Vec<Option<SlotSnapshot>>,
}

impl InventorySnapshot {
    /// Total units across all slots.
    pub fn total_units(&self) -> u64 {
        self.slots
            .iter()
            .flatten()
            .map(|slot| u64::from(slot.count))
            .sum()
    }
}

impl Inventory {
    /// Capture the current contents.
    pub fn snapshot(&self) -> InventorySnapshot {
        InventorySnapshot {
            slots: self
                .slots()
                .iter()
                .map(|slot| {
                    slot.stack().map(|stack| SlotSnapshot {
                        item: stack.item().key().clone(),
                        count: stack.count(),
                    })
                })
                .collect(),
        }
    }

    /// Build an inventory from a snapshot. Its length is the snapshot's length.
    pub fn from_snapshot(
        snapshot: &InventorySnapshot,
        catalog: &ItemCatalog,
    ) -> Result<Self, InventoryError> {
        if snapshot.slots.is_empty() {
            return Err(InventoryError::InvalidSlotCount);
        }
        Ok(Self::from_slots(resolve_slots(snapshot, catalog)?))
    }

    /// Replace this inventory's contents with a snapshot of the same length.
    ///
    /// Nothing changes if the snapshot fails validation. Observers keep their
    /// registration and are notified once.
    pub fn restore(
        &mut self,
        snapshot: &InventorySnapshot,
        catalog: &ItemCatalog,
    ) -> Result<(), InventoryError> {
        if snapshot.slots.len() != self.len() {
            return Err(InventoryError::SlotCountMismatch {
                expected: self.len(),
                found: snapshot.slots.len(),
            });
        }
        let slots = resolve_slots(snapshot, catalog)?;
        let touched = self
            .slots()
            .iter()
            .zip(&slots)
            .enumerate()
            .filter(|(_, (old, new))| old != new)
            .map(|(index, _)| index)
            .collect::<Vec<_>>();

        self.replace_slots(slots);
        if !touched.is_empty() {
            self.notify(InventoryChange {
                kind: ChangeKind::Restored,
                item: None,
                amount: snapshot.total_units(),
                touched,
            });
        }
        Ok(())
    }
}

fn resolve_slots(
    snapshot: &InventorySnapshot,
    catalog: &ItemCatalog,
) -> Result<Vec<Slot>, InventoryError> {
    snapshot
        .slots
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let mut slot = Slot::empty();
            let Some(entry) = entry else {
                return Ok(slot);
            };
            let item = catalog
                .get(&entry.item)
                .ok_or_else(|| InventoryError::UnknownItem {
                    slot: index,
                    key: entry.item.clone(),
                })?;
            if entry.count == 0 || entry.count > item.max_stack_size() {
                return Err(InventoryError::InvalidStackCount {
                    slot: index,
                    key: entry.item.clone(),
                    count: entry.count,
                    max: item.max_stack_size(),
                });
            }
            slot.assign(item, entry.count);
            Ok(slot)
        })
        .collect()
}
