use slotvault_core::ItemKey;
use thiserror::Error;

/// Errors from constructing, restoring, or sharing an inventory.
///
/// Add/remove/query operations never fail with an error; their shortfalls are
/// reported through [`AddOutcome`](crate::AddOutcome) and
/// [`RemoveOutcome`](crate::RemoveOutcome).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InventoryError {
    /// An inventory needs at least one slot.
    #[error("inventory must have at least one slot")]
    InvalidSlotCount,

    /// A snapshot references an item the catalog does not know.
    #[error("slot {slot} references unknown item {key}")]
    UnknownItem {
        /// Slot index in the snapshot.
        slot: usize,
        /// Unresolved key.
        key: ItemKey,
    },

    /// A snapshot stack is empty or exceeds the item's limit.
    #[error("slot {slot} holds {count} of {key}, allowed range is 1..={max}")]
    InvalidStackCount {
        /// Slot index in the snapshot.
        slot: usize,
        /// Item in the slot.
        key: ItemKey,
        /// Recorded count.
        count: u32,
        /// The item's stack limit.
        max: u32,
    },

    /// A snapshot does not match the inventory's fixed length.
    #[error("snapshot has {found} slots, inventory has {expected}")]
    SlotCountMismatch {
        /// Inventory length.
        expected: usize,
        /// Snapshot length.
        found: usize,
    },

    /// Another thread panicked while holding the inventory lock.
    #[error("inventory lock poisoned")]
    Poisoned,
}
