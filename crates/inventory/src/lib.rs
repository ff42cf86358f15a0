#![warn(missing_docs)]
//! Slot-based inventory store.
//!
//! An [`Inventory`] is a fixed number of slots, each empty or holding a stack
//! of one item type bounded by that item's stack limit. Adds and removals use
//! a deterministic first-fit scan, report exactly how much they applied, and
//! notify registered observers after every change.

mod error;
mod inventory;
pub mod observer;
mod shared;
mod slot;
mod snapshot;

pub use error::InventoryError;
pub use inventory::{AddOutcome, Inventory, RemoveOutcome, DEFAULT_SLOT_COUNT};
pub use observer::{ChangeKind, InventoryChange, InventoryObserver, ObserverId};
pub use shared::SharedInventory;
pub use slot::{Slot, SlotStack};
pub use snapshot::{InventorySnapshot, SlotSnapshot};
