//! Change notification for inventory mutations.
//!
//! Observers are registered on the inventory itself and called after a
//! mutation completes. They receive a description of what changed plus the
//! full slot sequence, so a presentation layer can simply re-read everything.

use std::fmt;

use slotvault_core::ItemKey;
use tracing::trace;

use crate::Slot;

/// What kind of mutation happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// Units were placed by an add.
    Added,
    /// Units were taken by a remove.
    Removed,
    /// Every slot was emptied.
    Cleared,
    /// Contents were replaced from a snapshot.
    Restored,
}

/// Description of one completed mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryChange {
    /// Mutation kind.
    pub kind: ChangeKind,
    /// Item added or removed; `None` for whole-inventory changes.
    pub item: Option<ItemKey>,
    /// Units applied (for clear/restore: units discarded/now held).
    pub amount: u64,
    /// Indices of slots whose contents changed, ascending.
    pub touched: Vec<usize>,
}

/// Receives inventory change notifications.
pub trait InventoryObserver: Send {
    /// Called once per mutating call that changed at least one slot.
    fn on_inventory_changed(&mut self, change: &InventoryChange, slots: &[Slot]);
}

impl<F> InventoryObserver for F
where
    F: FnMut(&InventoryChange, &[Slot]) + Send,
{
    fn on_inventory_changed(&mut self, change: &InventoryChange, slots: &[Slot]) {
        self(change, slots)
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(u64);

#[derive(Default)]
pub(crate) struct ObserverList {
    next_id: u64,
    entries: Vec<(ObserverId, Box<dyn InventoryObserver>)>,
}

impl ObserverList {
    pub(crate) fn subscribe(&mut self, observer: Box<dyn InventoryObserver>) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, observer));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Call every observer in subscription order.
    pub(crate) fn notify(&mut self, change: &InventoryChange, slots: &[Slot]) {
        trace!(
            observers = self.entries.len(),
            kind = ?change.kind,
            "dispatching inventory change"
        );
        for (_, observer) in &mut self.entries {
            observer.on_inventory_changed(change, slots);
        }
    }
}

impl fmt::Debug for ObserverList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverList")
            .field("observers", &self.entries.len())
            .finish()
    }
}
