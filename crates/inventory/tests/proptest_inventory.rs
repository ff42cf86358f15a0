//! Property-based tests for inventory placement
//!
//! Validates inventory invariants:
//! - Occupied slots always hold between 1 and the item's stack limit
//! - Units are conserved: placed minus removed equals held
//! - Remaining space always matches an independent recount
//! - Add-then-remove of the same amount restores an empty inventory

use std::sync::Arc;

use proptest::prelude::*;
use slotvault_core::{ItemDefinition, ItemHandle, ItemKey};
use slotvault_inventory::Inventory;

#[derive(Debug, Clone)]
enum Op {
    Add { item: usize, amount: u32 },
    Remove { item: usize, amount: u32 },
}

fn palette() -> Vec<ItemHandle> {
    [("stone", 64), ("apple", 16), ("pearl", 3), ("sword", 1)]
        .into_iter()
        .map(|(path, max)| {
            Arc::new(ItemDefinition::new(ItemKey::parse(path).unwrap(), path, max).unwrap())
        })
        .collect()
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..4, 1u32..150).prop_map(|(item, amount)| Op::Add { item, amount }),
        (0usize..4, 1u32..150).prop_map(|(item, amount)| Op::Remove { item, amount }),
    ]
}

fn expected_space(inv: &Inventory, item: &ItemDefinition) -> u64 {
    let mut space = 0u64;
    for slot in inv.slots() {
        match slot.item() {
            None => space += u64::from(item.max_stack_size()),
            Some(held) if held.key() == item.key() => {
                space += u64::from(item.max_stack_size() - slot.count())
            }
            Some(_) => {}
        }
    }
    space
}

proptest! {
    /// Property: slot invariants hold after any sequence of operations
    #[test]
    fn slots_stay_within_limits(
        slot_count in 1usize..12,
        ops in prop::collection::vec(op_strategy(), 0..40),
    ) {
        let items = palette();
        let mut inv = Inventory::new(slot_count).unwrap();

        for op in ops {
            match op {
                Op::Add { item, amount } => { inv.add_item(&items[item], amount); }
                Op::Remove { item, amount } => { inv.remove_item(&items[item], amount); }
            }

            for slot in inv.slots() {
                match slot.item() {
                    None => {
                        prop_assert_eq!(slot.count(), 0);
                    }
                    Some(item) => {
                        prop_assert!(slot.count() > 0);
                        prop_assert!(slot.count() <= item.max_stack_size());
                    }
                }
            }
            prop_assert_eq!(inv.len(), slot_count);
        }
    }

    /// Property: held quantity equals everything placed minus everything removed
    #[test]
    fn units_are_conserved(
        slot_count in 1usize..12,
        ops in prop::collection::vec(op_strategy(), 0..40),
    ) {
        let items = palette();
        let mut inv = Inventory::new(slot_count).unwrap();
        let mut ledger = [0i64; 4];

        for op in ops {
            match op {
                Op::Add { item, amount } => {
                    let outcome = inv.add_item(&items[item], amount);
                    prop_assert_eq!(outcome.placed + outcome.remainder(), amount);
                    ledger[item] += i64::from(outcome.placed);
                }
                Op::Remove { item, amount } => {
                    let before = inv.count_item(&items[item]);
                    let outcome = inv.remove_item(&items[item], amount);
                    if before < u64::from(amount) {
                        prop_assert_eq!(outcome.removed, 0);
                    } else {
                        prop_assert_eq!(outcome.removed, amount);
                    }
                    ledger[item] -= i64::from(outcome.removed);
                }
            }
        }

        for (index, item) in items.iter().enumerate() {
            prop_assert_eq!(inv.count_item(item) as i64, ledger[index]);
        }
    }

    /// Property: remaining space matches an independent recount, and can_add agrees
    #[test]
    fn remaining_space_matches_recount(
        slot_count in 1usize..12,
        ops in prop::collection::vec(op_strategy(), 0..40),
        probe in 1u32..800,
    ) {
        let items = palette();
        let mut inv = Inventory::new(slot_count).unwrap();

        for op in ops {
            match op {
                Op::Add { item, amount } => { inv.add_item(&items[item], amount); }
                Op::Remove { item, amount } => { inv.remove_item(&items[item], amount); }
            }
        }

        for item in &items {
            let space = inv.remaining_space(item);
            prop_assert_eq!(space, expected_space(&inv, item));
            prop_assert_eq!(inv.can_add(item, probe), space >= u64::from(probe));
        }
    }

    /// Property: a full add succeeds exactly when can_add said it would
    #[test]
    fn can_add_predicts_complete_add(
        prefill in prop::collection::vec((0usize..4, 1u32..100), 0..10),
        item in 0usize..4,
        amount in 1u32..300,
    ) {
        let items = palette();
        let mut inv = Inventory::new(6).unwrap();
        for (i, n) in prefill {
            inv.add_item(&items[i], n);
        }

        let predicted = inv.can_add(&items[item], amount);
        let outcome = inv.add_item(&items[item], amount);
        prop_assert_eq!(outcome.is_complete(), predicted);
    }

    /// Property: add(k) then remove(k) on an empty inventory leaves it empty
    #[test]
    fn add_then_remove_round_trips(
        slot_count in 1usize..12,
        item in 0usize..4,
        amount in 1u32..200,
    ) {
        let items = palette();
        let mut inv = Inventory::new(slot_count).unwrap();

        let placed = inv.add_item(&items[item], amount).placed;
        let removed = inv.remove_item(&items[item], placed);
        prop_assert_eq!(removed.removed, placed);
        prop_assert!(inv.is_empty());
        prop_assert!(!inv.has_item(&items[item], 1));
    }

    /// Property: removing the full held total leaves none behind
    #[test]
    fn removing_everything_leaves_nothing(
        adds in prop::collection::vec((0usize..4, 1u32..100), 1..10),
        target in 0usize..4,
    ) {
        let items = palette();
        let mut inv = Inventory::new(8).unwrap();
        for (i, n) in adds {
            inv.add_item(&items[i], n);
        }

        let total = u32::try_from(inv.count_item(&items[target])).unwrap();
        inv.remove_item(&items[target], total);
        prop_assert!(!inv.has_item(&items[target], 1));
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn stacking_prefers_existing_stack() {
        let items = palette();
        let mut inv = Inventory::new(2).unwrap();
        inv.add_item(&items[0], 10);

        let outcome = inv.add_item(&items[0], 5);
        assert!(outcome.is_complete());
        assert_eq!(inv.slot(0).unwrap().count(), 15);
        assert!(inv.slot(1).unwrap().is_empty());
    }

    #[test]
    fn single_slot_drops_overflow() {
        let items = palette();
        let mut inv = Inventory::new(1).unwrap();

        let outcome = inv.add_item(&items[0], 65);
        assert!(outcome.is_success());
        assert_eq!(outcome.placed, 64);
        assert_eq!(outcome.remainder(), 1);
        assert_eq!(inv.count_item(&items[0]), 64);
    }
}
