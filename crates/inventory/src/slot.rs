//! A single inventory position and the stack it may hold.

use std::sync::Arc;

use slotvault_core::{ItemDefinition, ItemHandle};

/// Items of one type occupying a slot. `count` is always in `1..=max_stack_size`.
#[derive(Debug, Clone)]
pub struct SlotStack {
    item: ItemHandle,
    count: u32,
}

impl SlotStack {
    /// Item held by this stack.
    pub fn item(&self) -> &ItemHandle {
        &self.item
    }

    /// Number of units in the stack.
    pub fn count(&self) -> u32 {
        self.count
    }
}

/// One of the inventory's fixed positions: empty, or occupied by a stack.
///
/// Emptiness and a zero count are the same state; a slot whose stack drops to
/// zero is cleared immediately.
#[derive(Debug, Clone, Default)]
pub struct Slot {
    stack: Option<SlotStack>,
}

impl Slot {
    /// An empty slot.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether the slot holds nothing.
    pub fn is_empty(&self) -> bool {
        self.stack.is_none()
    }

    /// Whether the slot holds a stack at its item's limit.
    pub fn is_full(&self) -> bool {
        self.stack
            .as_ref()
            .is_some_and(|stack| stack.count >= stack.item.max_stack_size())
    }

    /// The stack held by this slot, if any.
    pub fn stack(&self) -> Option<&SlotStack> {
        self.stack.as_ref()
    }

    /// The item held by this slot, if any.
    pub fn item(&self) -> Option<&ItemHandle> {
        self.stack.as_ref().map(|stack| &stack.item)
    }

    /// Units held (0 when empty).
    pub fn count(&self) -> u32 {
        self.stack.as_ref().map_or(0, |stack| stack.count)
    }

    /// Whether the slot holds `item`.
    pub fn holds(&self, item: &ItemDefinition) -> bool {
        self.stack
            .as_ref()
            .is_some_and(|stack| stack.item.same_item(item))
    }

    /// How many more units of `item` this slot could take.
    pub fn space_for(&self, item: &ItemDefinition) -> u32 {
        match &self.stack {
            None => item.max_stack_size(),
            Some(stack) if stack.item.same_item(item) => {
                item.max_stack_size().saturating_sub(stack.count)
            }
            Some(_) => 0,
        }
    }

    /// Put `amount` units of `item` in the slot, replacing its contents.
    /// The amount is clamped to the item's limit; zero clears the slot.
    pub(crate) fn assign(&mut self, item: &ItemHandle, amount: u32) -> u32 {
        let count = amount.min(item.max_stack_size());
        self.stack = (count > 0).then(|| SlotStack {
            item: Arc::clone(item),
            count,
        });
        count
    }

    /// Grow the stack by up to `amount`, returning the units that did not fit.
    pub(crate) fn add(&mut self, amount: u32) -> u32 {
        let Some(stack) = self.stack.as_mut() else {
            return amount;
        };
        let space = stack.item.max_stack_size().saturating_sub(stack.count);
        let added = amount.min(space);
        stack.count += added;
        amount - added
    }

    /// Shrink the stack by up to `amount`, returning the units actually taken.
    pub(crate) fn take(&mut self, amount: u32) -> u32 {
        let Some(stack) = self.stack.as_mut() else {
            return 0;
        };
        let taken = amount.min(stack.count);
        stack.count -= taken;
        if stack.count == 0 {
            self.stack = None;
        }
        taken
    }

    pub(crate) fn clear(&mut self) {
        self.stack = None;
    }
}

impl PartialEq for Slot {
    fn eq(&self, other: &Self) -> bool {
        match (&self.stack, &other.stack) {
            (None, None) => true,
            (Some(a), Some(b)) => a.count == b.count && a.item.same_item(&b.item),
            _ => false,
        }
    }
}

impl Eq for Slot {}
