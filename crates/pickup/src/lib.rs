#![warn(missing_docs)]
//! World pickups and their hand-off to an inventory.
//!
//! A pickup is an item stack lying in the world. When the player asks to
//! collect it and is close enough, the agent offers the stack to the
//! inventory; the pickup disappears only if the inventory took at least one
//! unit. Anything that did not fit is dropped along with the world object.

use std::collections::BTreeMap;

use glam::Vec3;
use slotvault_core::ItemHandle;
use slotvault_inventory::Inventory;
use tracing::{debug, info, warn};

/// Default reach for collecting a pickup, in world units.
pub const DEFAULT_PICKUP_DISTANCE: f32 = 5.0;

/// Anything that can report where the player currently is.
pub trait PlayerLocator {
    /// World position of the player.
    fn position(&self) -> Vec3;
}

impl PlayerLocator for Vec3 {
    fn position(&self) -> Vec3 {
        *self
    }
}

/// An item stack waiting in the world.
#[derive(Debug, Clone)]
pub struct WorldPickup {
    /// Unique ID for this pickup.
    pub id: u64,
    /// Item offered.
    pub item: ItemHandle,
    /// Units offered.
    pub amount: u32,
    /// World position.
    pub position: Vec3,
}

impl WorldPickup {
    /// Distance from the player to this pickup.
    pub fn distance_to(&self, player: &impl PlayerLocator) -> f32 {
        self.position.distance(player.position())
    }
}

/// What happened when collecting a pickup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PickupResult {
    /// The inventory accepted some or all units; the pickup is gone.
    Collected {
        /// Units added to the inventory.
        placed: u32,
        /// Units that did not fit and were discarded.
        remainder: u32,
    },
    /// The player is too far away; the pickup stays.
    OutOfRange {
        /// Current distance to the pickup.
        distance: f32,
    },
    /// The inventory accepted nothing; the pickup stays.
    InventoryFull,
    /// No pickup with that ID exists.
    NotFound,
}

impl PickupResult {
    /// Whether the pickup was collected.
    pub fn is_collected(&self) -> bool {
        matches!(self, PickupResult::Collected { .. })
    }
}

/// Tracks world pickups and collects them into an inventory.
#[derive(Debug)]
pub struct PickupAgent {
    pickups: BTreeMap<u64, WorldPickup>,
    next_id: u64,
    pickup_distance: f32,
}

impl PickupAgent {
    /// Create an agent with the given reach. Negative or NaN reach is treated as zero.
    pub fn new(pickup_distance: f32) -> Self {
        Self {
            pickups: BTreeMap::new(),
            next_id: 1,
            pickup_distance: pickup_distance.max(0.0),
        }
    }

    /// Reach used for range checks.
    pub fn pickup_distance(&self) -> f32 {
        self.pickup_distance
    }

    /// Place a pickup in the world, returning its ID.
    ///
    /// Returns `None` for an empty stack; nothing is spawned.
    pub fn spawn(&mut self, item: ItemHandle, amount: u32, position: Vec3) -> Option<u64> {
        if amount == 0 {
            warn!(item = %item.key(), "refusing to spawn an empty pickup");
            return None;
        }
        let id = self.next_id;
        self.next_id += 1;
        debug!(id, item = %item.key(), amount, "spawned pickup");
        self.pickups.insert(
            id,
            WorldPickup {
                id,
                item,
                amount,
                position,
            },
        );
        Some(id)
    }

    /// Look up a pickup.
    pub fn get(&self, id: u64) -> Option<&WorldPickup> {
        self.pickups.get(&id)
    }

    /// Pickups in ascending ID order.
    pub fn pickups(&self) -> impl Iterator<Item = &WorldPickup> {
        self.pickups.values()
    }

    /// Number of pickups in the world.
    pub fn len(&self) -> usize {
        self.pickups.len()
    }

    /// Whether the world holds no pickups.
    pub fn is_empty(&self) -> bool {
        self.pickups.is_empty()
    }

    /// Try to collect one pickup into `inventory`.
    pub fn try_pickup(
        &mut self,
        id: u64,
        player: &impl PlayerLocator,
        inventory: &mut Inventory,
    ) -> PickupResult {
        let Some(pickup) = self.pickups.get(&id) else {
            return PickupResult::NotFound;
        };

        let distance = pickup.distance_to(player);
        if distance > self.pickup_distance {
            debug!(id, distance, reach = self.pickup_distance, "pickup out of range");
            return PickupResult::OutOfRange { distance };
        }

        let outcome = inventory.add_item(&pickup.item, pickup.amount);
        if !outcome.is_success() {
            return PickupResult::InventoryFull;
        }

        if let Some(pickup) = self.pickups.remove(&id) {
            info!(
                id,
                item = %pickup.item.key(),
                placed = outcome.placed,
                "collected pickup"
            );
        }
        PickupResult::Collected {
            placed: outcome.placed,
            remainder: outcome.remainder(),
        }
    }

    /// Try every pickup within reach, in ascending ID order.
    pub fn collect_in_range(
        &mut self,
        player: &impl PlayerLocator,
        inventory: &mut Inventory,
    ) -> Vec<(u64, PickupResult)> {
        let in_range: Vec<u64> = self
            .pickups
            .values()
            .filter(|pickup| pickup.distance_to(player) <= self.pickup_distance)
            .map(|pickup| pickup.id)
            .collect();

        in_range
            .into_iter()
            .map(|id| (id, self.try_pickup(id, player, inventory)))
            .collect()
    }
}

impl Default for PickupAgent {
    fn default() -> Self {
        Self::new(DEFAULT_PICKUP_DISTANCE)
    }
}
