//! Fixed-capacity inventory with first-fit stacking.
//!
//! Placement is deterministic: adds top up existing stacks of the same item in
//! slot order before claiming empty slots (also in slot order), and removals
//! drain matching slots in slot order.

use slotvault_core::{ItemDefinition, ItemHandle};
use tracing::{debug, warn};

use crate::observer::{ChangeKind, InventoryChange, InventoryObserver, ObserverId, ObserverList};
use crate::{InventoryError, Slot};

/// Number of slots in a default inventory.
pub const DEFAULT_SLOT_COUNT: usize = 36;

/// Result of [`Inventory::add_item`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddOutcome {
    /// Units the caller asked to add.
    pub requested: u32,
    /// Units actually placed.
    pub placed: u32,
}

impl AddOutcome {
    /// At least one unit was placed. Partial placement still counts.
    pub fn is_success(&self) -> bool {
        self.placed > 0
    }

    /// Every requested unit was placed.
    pub fn is_complete(&self) -> bool {
        self.requested > 0 && self.placed == self.requested
    }

    /// Units that did not fit and were dropped.
    pub fn remainder(&self) -> u32 {
        self.requested - self.placed
    }
}

/// Result of [`Inventory::remove_item`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveOutcome {
    /// Units the caller asked to remove.
    pub requested: u32,
    /// Units actually removed: either all requested or none.
    pub removed: u32,
}

impl RemoveOutcome {
    /// The full amount was removed.
    pub fn is_success(&self) -> bool {
        self.removed > 0 && self.removed == self.requested
    }
}

/// Ordered, fixed-length sequence of stackable slots.
#[derive(Debug)]
pub struct Inventory {
    slots: Box<[Slot]>,
    observers: ObserverList,
}

impl Inventory {
    /// Create an inventory with `slot_count` empty slots.
    pub fn new(slot_count: usize) -> Result<Self, InventoryError> {
        if slot_count == 0 {
            return Err(InventoryError::InvalidSlotCount);
        }
        Ok(Self::from_slots(vec![Slot::empty(); slot_count]))
    }

    pub(crate) fn from_slots(slots: Vec<Slot>) -> Self {
        debug_assert!(!slots.is_empty());
        Self {
            slots: slots.into_boxed_slice(),
            observers: ObserverList::default(),
        }
    }

    /// Number of slots. Never changes after construction.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// All slots in index order.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// A single slot, or `None` if `index` is out of range.
    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    /// Place up to `amount` units of `item`.
    ///
    /// Existing non-full stacks of the item are topped up first, then empty
    /// slots are claimed, each scan in index order. Units that do not fit are
    /// dropped; the outcome tells how many were placed. Observers are notified
    /// once if anything was placed.
    pub fn add_item(&mut self, item: &ItemHandle, amount: u32) -> AddOutcome {
        if amount == 0 {
            debug!(item = %item.key(), "ignoring add of zero units");
            return AddOutcome {
                requested: 0,
                placed: 0,
            };
        }

        let mut remaining = amount;
        let mut touched = Vec::new();

        for (index, slot) in self.slots.iter_mut().enumerate() {
            if remaining == 0 {
                break;
            }
            if slot.holds(item) && !slot.is_full() {
                remaining = slot.add(remaining);
                touched.push(index);
            }
        }

        for (index, slot) in self.slots.iter_mut().enumerate() {
            if remaining == 0 {
                break;
            }
            if slot.is_empty() {
                remaining -= slot.assign(item, remaining);
                touched.push(index);
            }
        }

        let outcome = AddOutcome {
            requested: amount,
            placed: amount - remaining,
        };

        if !outcome.is_success() {
            warn!(item = %item.key(), amount, "inventory full, nothing added");
            return outcome;
        }
        if remaining > 0 {
            warn!(
                item = %item.key(),
                placed = outcome.placed,
                remainder = remaining,
                "inventory could not fit the full amount"
            );
        } else {
            debug!(item = %item.key(), placed = outcome.placed, slots = ?touched, "added items");
        }

        touched.sort_unstable();
        self.notify(InventoryChange {
            kind: ChangeKind::Added,
            item: Some(item.key().clone()),
            amount: u64::from(outcome.placed),
            touched,
        });
        outcome
    }

    /// Remove exactly `amount` units of `item`, or nothing at all.
    ///
    /// If fewer than `amount` units are held the inventory is left untouched.
    /// Otherwise matching slots are drained in index order; emptied slots are
    /// cleared. Observers are notified once on success.
    pub fn remove_item(&mut self, item: &ItemDefinition, amount: u32) -> RemoveOutcome {
        let mut outcome = RemoveOutcome {
            requested: amount,
            removed: 0,
        };
        if amount == 0 {
            debug!(item = %item.key(), "ignoring removal of zero units");
            return outcome;
        }

        let held = self.count_item(item);
        if held < u64::from(amount) {
            debug!(item = %item.key(), amount, held, "not enough items to remove");
            return outcome;
        }

        let mut remaining = amount;
        let mut touched = Vec::new();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if remaining == 0 {
                break;
            }
            if slot.holds(item) {
                remaining -= slot.take(remaining);
                touched.push(index);
            }
        }
        outcome.removed = amount - remaining;

        debug!(item = %item.key(), removed = outcome.removed, slots = ?touched, "removed items");
        self.notify(InventoryChange {
            kind: ChangeKind::Removed,
            item: Some(item.key().clone()),
            amount: u64::from(outcome.removed),
            touched,
        });
        outcome
    }

    /// Total units of `item` that could still be added.
    pub fn remaining_space(&self, item: &ItemDefinition) -> u64 {
        self.slots
            .iter()
            .map(|slot| u64::from(slot.space_for(item)))
            .sum()
    }

    /// Whether `amount` units of `item` would fit right now.
    pub fn can_add(&self, item: &ItemDefinition, amount: u32) -> bool {
        self.remaining_space(item) >= u64::from(amount)
    }

    /// Whether at least `amount` units of `item` are held. Zero is always held.
    pub fn has_item(&self, item: &ItemDefinition, amount: u32) -> bool {
        let needed = u64::from(amount);
        if needed == 0 {
            return true;
        }
        let mut total = 0u64;
        for slot in self.slots.iter().filter(|slot| slot.holds(item)) {
            total += u64::from(slot.count());
            if total >= needed {
                return true;
            }
        }
        false
    }

    /// Total units of `item` across all slots.
    pub fn count_item(&self, item: &ItemDefinition) -> u64 {
        self.slots
            .iter()
            .filter(|slot| slot.holds(item))
            .map(|slot| u64::from(slot.count()))
            .sum()
    }

    /// Index of the first slot holding `item`.
    pub fn find_item(&self, item: &ItemDefinition) -> Option<usize> {
        self.slots.iter().position(|slot| slot.holds(item))
    }

    /// Number of empty slots.
    pub fn empty_slots(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_empty()).count()
    }

    /// Whether every slot is empty.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Slot::is_empty)
    }

    /// Whether no slot is empty. Occupied slots may still have stack space.
    pub fn is_full(&self) -> bool {
        self.slots.iter().all(|slot| !slot.is_empty())
    }

    /// Empty every slot, notifying observers if anything was held.
    pub fn clear(&mut self) {
        let mut discarded = 0u64;
        let mut touched = Vec::new();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if !slot.is_empty() {
                discarded += u64::from(slot.count());
                slot.clear();
                touched.push(index);
            }
        }
        if touched.is_empty() {
            return;
        }
        debug!(discarded, "cleared inventory");
        self.notify(InventoryChange {
            kind: ChangeKind::Cleared,
            item: None,
            amount: discarded,
            touched,
        });
    }

    /// Register an observer; it is called after every successful mutation.
    pub fn subscribe<O>(&mut self, observer: O) -> ObserverId
    where
        O: InventoryObserver + 'static,
    {
        self.observers.subscribe(Box::new(observer))
    }

    /// Remove an observer. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Number of registered observers.
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    pub(crate) fn replace_slots(&mut self, slots: Vec<Slot>) {
        self.slots = slots.into_boxed_slice();
    }

    pub(crate) fn notify(&mut self, change: InventoryChange) {
        self.observers.notify(&change, &self.slots);
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::from_slots(vec![Slot::empty(); DEFAULT_SLOT_COUNT])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use slotvault_core::ItemKey;

    fn item(path: &str, max: u32) -> ItemHandle {
        Arc::new(ItemDefinition::new(ItemKey::parse(path).unwrap(), path, max).unwrap())
    }

    fn contents(inv: &Inventory) -> Vec<Option<(String, u32)>> {
        inv.slots()
            .iter()
            .map(|slot| slot.item().map(|item| (item.key().path().to_string(), slot.count())))
            .collect()
    }

    fn recorded(inv: &mut Inventory) -> Arc<Mutex<Vec<InventoryChange>>> {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        inv.subscribe(move |change: &InventoryChange, _slots: &[Slot]| {
            sink.lock().unwrap().push(change.clone());
        });
        log
    }

    #[test]
    fn zero_slots_is_rejected() {
        assert_eq!(Inventory::new(0).unwrap_err(), InventoryError::InvalidSlotCount);
        assert_eq!(Inventory::default().len(), DEFAULT_SLOT_COUNT);
    }

    #[test]
    fn overflow_spills_into_next_empty_slot() {
        let a = item("a", 64);
        let mut inv = Inventory::new(2).unwrap();

        let outcome = inv.add_item(&a, 70);
        assert!(outcome.is_complete());
        assert_eq!(
            contents(&inv),
            vec![Some(("a".into(), 64)), Some(("a".into(), 6))]
        );

        let removed = inv.remove_item(&a, 64);
        assert!(removed.is_success());
        assert_eq!(contents(&inv), vec![None, Some(("a".into(), 6))]);
    }

    #[test]
    fn existing_stacks_fill_before_empty_slots() {
        let a = item("a", 64);
        let mut inv = Inventory::new(2).unwrap();
        inv.add_item(&a, 10);

        inv.add_item(&a, 5);
        assert_eq!(contents(&inv), vec![Some(("a".into(), 15)), None]);
    }

    #[test]
    fn partial_stacks_are_topped_up_in_index_order() {
        let a = item("a", 10);
        let b = item("b", 10);
        let mut inv = Inventory::new(4).unwrap();
        inv.add_item(&a, 4);
        inv.add_item(&b, 1);
        inv.add_item(&a, 13);
        inv.remove_item(&a, 10);
        // Slot 0 is drained first.
        assert_eq!(
            contents(&inv),
            vec![None, Some(("b".into(), 1)), Some(("a".into(), 7)), None]
        );

        inv.add_item(&a, 5);
        assert_eq!(
            contents(&inv),
            vec![
                Some(("a".into(), 2)),
                Some(("b".into(), 1)),
                Some(("a".into(), 10)),
                None
            ]
        );
    }

    #[test]
    fn capacity_boundary_drops_remainder() {
        let a = item("a", 64);
        let mut inv = Inventory::new(1).unwrap();

        let outcome = inv.add_item(&a, 65);
        assert!(outcome.is_success());
        assert!(!outcome.is_complete());
        assert_eq!(outcome.placed, 64);
        assert_eq!(outcome.remainder(), 1);
        assert_eq!(contents(&inv), vec![Some(("a".into(), 64))]);
    }

    #[test]
    fn add_to_full_inventory_fails_without_notification() {
        let a = item("a", 1);
        let b = item("b", 64);
        let mut inv = Inventory::new(2).unwrap();
        inv.add_item(&a, 2);
        let log = recorded(&mut inv);

        let outcome = inv.add_item(&b, 5);
        assert!(!outcome.is_success());
        assert_eq!(outcome.remainder(), 5);
        let more_a = inv.add_item(&a, 1);
        assert!(!more_a.is_success());
        assert!(log.lock().unwrap().is_empty());
        assert!(inv.is_full());
    }

    #[test]
    fn zero_amounts_are_no_ops() {
        let a = item("a", 64);
        let mut inv = Inventory::new(2).unwrap();
        let log = recorded(&mut inv);

        assert!(!inv.add_item(&a, 0).is_success());
        inv.add_item(&a, 3);
        assert!(!inv.remove_item(&a, 0).is_success());
        assert_eq!(inv.count_item(&a), 3);
        assert_eq!(log.lock().unwrap().len(), 1);
    }

    #[test]
    fn insufficient_stock_removes_nothing() {
        let a = item("a", 64);
        let mut inv = Inventory::new(3).unwrap();
        inv.add_item(&a, 100);
        let log = recorded(&mut inv);

        let outcome = inv.remove_item(&a, 101);
        assert!(!outcome.is_success());
        assert_eq!(outcome.removed, 0);
        assert_eq!(inv.count_item(&a), 100);
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn remove_all_then_has_nothing() {
        let a = item("a", 16);
        let mut inv = Inventory::new(5).unwrap();
        inv.add_item(&a, 40);
        let total = u32::try_from(inv.count_item(&a)).unwrap();

        assert!(inv.remove_item(&a, total).is_success());
        assert!(!inv.has_item(&a, 1));
        assert!(inv.is_empty());
    }

    #[test]
    fn has_item_sums_across_slots() {
        let a = item("a", 10);
        let b = item("b", 10);
        let mut inv = Inventory::new(4).unwrap();
        inv.add_item(&a, 25);

        assert!(inv.has_item(&a, 25));
        assert!(inv.has_item(&a, 11));
        assert!(!inv.has_item(&a, 26));
        assert!(!inv.has_item(&b, 1));
        assert!(inv.has_item(&b, 0));
        assert_eq!(inv.find_item(&a), Some(0));
        assert_eq!(inv.find_item(&b), None);
    }

    #[test]
    fn remaining_space_counts_empty_and_matching_slots() {
        let a = item("a", 64);
        let b = item("b", 16);
        let mut inv = Inventory::new(3).unwrap();
        inv.add_item(&a, 10);
        inv.add_item(&b, 4);

        assert_eq!(inv.remaining_space(&a), 54 + 64);
        assert_eq!(inv.remaining_space(&b), 12 + 16);
        assert!(inv.can_add(&a, 118));
        assert!(!inv.can_add(&a, 119));
        assert_eq!(inv.empty_slots(), 1);
    }

    #[test]
    fn observers_see_each_mutation_once() {
        let a = item("a", 64);
        let mut inv = Inventory::new(3).unwrap();
        inv.add_item(&a, 10);
        let log = recorded(&mut inv);

        inv.add_item(&a, 100);
        inv.remove_item(&a, 70);
        inv.clear();
        inv.clear();

        let log = log.lock().unwrap();
        assert_eq!(log.len(), 3);
        assert_eq!(log[0].kind, ChangeKind::Added);
        assert_eq!(log[0].amount, 100);
        assert_eq!(log[0].touched, vec![0, 1]);
        assert_eq!(log[1].kind, ChangeKind::Removed);
        assert_eq!(log[1].amount, 70);
        assert_eq!(log[1].touched, vec![0, 1]);
        assert_eq!(log[2].kind, ChangeKind::Cleared);
        assert_eq!(log[2].amount, 40);
        assert_eq!(log[2].item, None);
    }

    #[test]
    fn observers_read_post_mutation_slots() {
        let a = item("a", 64);
        let mut inv = Inventory::new(2).unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        inv.subscribe(move |_change: &InventoryChange, slots: &[Slot]| {
            let counts: Vec<u32> = slots.iter().map(Slot::count).collect();
            sink.lock().unwrap().push(counts);
        });

        inv.add_item(&a, 70);
        assert_eq!(*seen.lock().unwrap(), vec![vec![64, 6]]);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let a = item("a", 64);
        let mut inv = Inventory::new(1).unwrap();
        let hits = Arc::new(Mutex::new(0));
        let sink = Arc::clone(&hits);
        let id = inv.subscribe(move |_: &InventoryChange, _: &[Slot]| {
            *sink.lock().unwrap() += 1;
        });

        inv.add_item(&a, 1);
        assert!(inv.unsubscribe(id));
        assert!(!inv.unsubscribe(id));
        inv.add_item(&a, 1);
        assert_eq!(*hits.lock().unwrap(), 1);
        assert_eq!(inv.observer_count(), 0);
    }
}
